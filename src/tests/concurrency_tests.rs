use super::{create_test_service, register};
use crate::core::errors::ServiceError;
use crate::core::models::{ExpenseRecord, Group, GroupMember, MemberId, Role, User};
use crate::core::services::GroupService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::{Storage, in_memory::InMemoryStorage};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// In-memory storage whose renames take a while to land.
struct SlowRenameStorage {
    inner: InMemoryStorage,
    delay: Duration,
}

#[async_trait]
impl Storage for SlowRenameStorage {
    async fn create_user_if_not_exists(&self, user: User) -> Result<User, ServiceError> {
        self.inner.create_user_if_not_exists(user).await
    }
    async fn get_user(&self, user_id: &MemberId) -> Result<Option<User>, ServiceError> {
        self.inner.get_user(user_id).await
    }
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        self.inner.get_user_by_email(email).await
    }
    async fn save_group(&self, group: Group) -> Result<(), ServiceError> {
        self.inner.save_group(group).await
    }
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, ServiceError> {
        self.inner.get_group(group_id).await
    }
    async fn add_member(&self, group_id: &str, member: GroupMember) -> Result<(Group, bool), ServiceError> {
        self.inner.add_member(group_id, member).await
    }
    async fn rename_group(&self, group_id: &str, name: &str) -> Result<Group, ServiceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.rename_group(group_id, name).await
    }
    async fn delete_group(&self, group_id: &str) -> Result<(), ServiceError> {
        self.inner.delete_group(group_id).await
    }
    async fn get_member_groups(&self, member_id: &MemberId) -> Result<Vec<Group>, ServiceError> {
        self.inner.get_member_groups(member_id).await
    }
    async fn append_expense(&self, record: ExpenseRecord) -> Result<ExpenseRecord, ServiceError> {
        self.inner.append_expense(record).await
    }
    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<ExpenseRecord>, ServiceError> {
        self.inner.get_group_expenses(group_id).await
    }
}

#[tokio::test]
async fn test_rename_in_flight_keeps_concurrent_invite() {
    let _ = env_logger::builder().is_test(true).try_init();
    let service = Arc::new(GroupService::new(
        SlowRenameStorage {
            inner: InMemoryStorage::new(),
            delay: Duration::from_millis(50),
        },
        InMemoryLogging::new(),
    ));
    let alice = service.register_user("alice@example.com").await.unwrap();
    let bob = service.register_user("bob@example.com").await.unwrap();
    let group = service.create_group("Flat", &alice.id).await.unwrap();

    let rename = tokio::spawn({
        let service = Arc::clone(&service);
        let group_id = group.id.clone();
        let alice_id = alice.id.clone();
        async move { service.rename_group(&group_id, "Flat 2B", &alice_id).await }
    });
    tokio::task::yield_now().await;

    service
        .invite_member(&group.id, "bob@example.com", &alice.id)
        .await
        .unwrap();
    service
        .add_expense(&group.id, &bob.id, 10.0, "Bin bags")
        .await
        .unwrap();
    let renamed = rename.await.unwrap().unwrap();

    assert_eq!(renamed.name, "Flat 2B");
    assert_eq!(renamed.member_ids(), vec![alice.id.clone(), bob.id.clone()]);

    let details = service.get_group_details(&group.id, &alice.id).await.unwrap();
    assert_eq!(details.group.name, "Flat 2B");
    assert_eq!(details.simplified_debts.len(), 1);
    assert_eq!(details.simplified_debts[0].from, alice.id);
    assert_eq!(details.simplified_debts[0].to, bob.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_admit_one_user_per_email() {
    let service = Arc::new(create_test_service());

    let attempts: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.register_user("carol@example.com").await })
        })
        .collect();

    let mut registered = Vec::new();
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(user) => registered.push(user),
            Err(err) => assert!(matches!(err, ServiceError::EmailAlreadyRegistered(_))),
        }
    }

    assert_eq!(registered.len(), 1);
    let group = service.create_group("Solo", &registered[0].id).await.unwrap();
    assert_eq!(group.created_by, registered[0].id);
}

#[tokio::test]
async fn test_storage_mutates_groups_in_place() {
    let storage = InMemoryStorage::new();
    let user = storage
        .create_user_if_not_exists(User {
            id: MemberId::from("u1"),
            email: "dave@example.com".to_string(),
        })
        .await
        .unwrap();
    let duplicate = storage
        .create_user_if_not_exists(User {
            id: MemberId::from("u2"),
            email: "dave@example.com".to_string(),
        })
        .await;
    assert!(matches!(duplicate, Err(ServiceError::EmailAlreadyRegistered(_))));
    assert_eq!(storage.get_user(&MemberId::from("u2")).await.unwrap(), None);
    assert_eq!(
        storage.get_user_by_email("dave@example.com").await.unwrap(),
        Some(user.clone())
    );

    let now = Utc::now();
    let member = |id: &str| GroupMember {
        member_id: MemberId::from(id),
        role: Role::Member,
        joined_at: now,
    };
    storage
        .save_group(Group {
            id: "g1".to_string(),
            name: "Cabin".to_string(),
            created_by: user.id.clone(),
            members: vec![GroupMember {
                role: Role::Owner,
                ..member("u1")
            }],
            created_at: now,
        })
        .await
        .unwrap();

    let (group, added) = storage.add_member("g1", member("u3")).await.unwrap();
    assert!(added);
    assert_eq!(group.members.len(), 2);
    let (group, added) = storage.add_member("g1", member("u3")).await.unwrap();
    assert!(!added);
    assert_eq!(group.members.len(), 2);

    let group = storage.rename_group("g1", "Lake cabin").await.unwrap();
    assert_eq!(group.name, "Lake cabin");
    assert_eq!(group.members.len(), 2);

    assert!(matches!(
        storage.add_member("missing", member("u3")).await,
        Err(ServiceError::GroupNotFound(_))
    ));
    assert!(matches!(
        storage.rename_group("missing", "x").await,
        Err(ServiceError::GroupNotFound(_))
    ));
}

#[tokio::test]
async fn test_group_logs_are_scoped_to_members() {
    let service = create_test_service();
    let alice = register(&service, "alice@example.com").await;
    let outsider = register(&service, "outsider@example.com").await;
    let trip = service.create_group("Trip", &alice.id).await.unwrap();
    let other = service.create_group("Other", &alice.id).await.unwrap();
    service
        .add_expense(&trip.id, &alice.id, 12.0, "Fuel")
        .await
        .unwrap();
    service.rename_group(&other.id, "Other 2", &alice.id).await.unwrap();

    let logs = service.get_group_logs(&trip.id, &alice.id).await.unwrap();
    let actions: Vec<&str> = logs.iter().map(|log| log.action.as_str()).collect();
    assert_eq!(actions, vec![crate::constants::GROUP_CREATED, crate::constants::EXPENSE_ADDED]);
    assert!(logs.iter().all(|log| log.group_id.as_deref() == Some(trip.id.as_str())));

    let result = service.get_group_logs(&trip.id, &outsider.id).await;
    assert!(matches!(result, Err(ServiceError::NotGroupMember(_))));
}
