pub mod in_memory;

use crate::core::errors::ServiceError;
use crate::core::models::audit::AppLog;
use async_trait::async_trait;

/// Application action log, queryable after the fact.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        group_id: Option<&str>,
        details: serde_json::Value,
        member_id: Option<&str>,
    ) -> Result<(), ServiceError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, ServiceError>;
    async fn get_group_logs(&self, group_id: &str) -> Result<Vec<AppLog>, ServiceError>;
}
