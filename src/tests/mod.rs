mod concurrency_tests;
mod group_tests;

use crate::core::models::User;
use crate::core::services::GroupService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> GroupService<InMemoryLogging, InMemoryStorage> {
    let _ = env_logger::builder().is_test(true).try_init();
    GroupService::new(InMemoryStorage::new(), InMemoryLogging::new())
}

pub async fn register(service: &GroupService<InMemoryLogging, InMemoryStorage>, email: &str) -> User {
    service.register_user(email).await.unwrap()
}
