use super::{create_test_service, register};
use crate::constants::{GROUP_CREATED, GROUP_DELETED, MEMBER_INVITED, USER_REGISTERED};
use crate::core::errors::ServiceError;
use crate::core::models::{MemberId, Role};

#[tokio::test]
async fn test_register_user_normalizes_and_rejects_duplicates() {
    let service = create_test_service();

    let alice = register(&service, "  Alice@Example.com ").await;
    assert_eq!(alice.email, "alice@example.com");

    let result = service.register_user("alice@example.com").await;
    assert!(matches!(result, Err(ServiceError::EmailAlreadyRegistered(_))));

    let result = service.register_user("not-an-email").await;
    assert!(matches!(result, Err(ServiceError::InvalidInput(field, _)) if field == "email"));
}

#[tokio::test]
async fn test_create_group_makes_creator_owner() {
    let service = create_test_service();
    let alice = register(&service, "alice@example.com").await;

    let group = service.create_group("Trip", &alice.id).await.unwrap();

    assert_eq!(group.name, "Trip");
    assert_eq!(group.created_by, alice.id);
    assert_eq!(group.members.len(), 1);
    assert_eq!(group.members[0].member_id, alice.id);
    assert_eq!(group.members[0].role, Role::Owner);

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].action, USER_REGISTERED);
    assert_eq!(logs[1].action, GROUP_CREATED);
}

#[tokio::test]
async fn test_create_group_validation() {
    let service = create_test_service();
    let alice = register(&service, "alice@example.com").await;

    let result = service.create_group("   ", &alice.id).await;
    assert!(matches!(result, Err(ServiceError::InvalidInput(_, _))));

    let result = service.create_group("Trip", &MemberId::from("ghost")).await;
    assert!(matches!(result, Err(ServiceError::UserNotFound(_))));
}

#[tokio::test]
async fn test_invite_member_is_idempotent() {
    let service = create_test_service();
    let alice = register(&service, "alice@example.com").await;
    let bob = register(&service, "bob@example.com").await;
    let group = service.create_group("Flat", &alice.id).await.unwrap();

    let updated = service
        .invite_member(&group.id, "bob@example.com", &alice.id)
        .await
        .unwrap();
    assert_eq!(updated.member_ids(), vec![alice.id.clone(), bob.id.clone()]);
    assert_eq!(updated.members[1].role, Role::Member);

    let again = service
        .invite_member(&group.id, "BOB@example.com", &bob.id)
        .await
        .unwrap();
    assert_eq!(again.members.len(), 2);

    let invites = service
        .get_app_logs()
        .await
        .unwrap()
        .into_iter()
        .filter(|log| log.action == MEMBER_INVITED)
        .count();
    assert_eq!(invites, 1);
}

#[tokio::test]
async fn test_invite_requires_membership_and_known_email() {
    let service = create_test_service();
    let alice = register(&service, "alice@example.com").await;
    let mallory = register(&service, "mallory@example.com").await;
    let group = service.create_group("Flat", &alice.id).await.unwrap();

    let result = service
        .invite_member(&group.id, "mallory@example.com", &mallory.id)
        .await;
    assert!(matches!(result, Err(ServiceError::NotGroupMember(_))));

    let result = service
        .invite_member(&group.id, "nobody@example.com", &alice.id)
        .await;
    assert!(matches!(result, Err(ServiceError::UserNotFound(_))));

    let result = service
        .invite_member("missing", "mallory@example.com", &alice.id)
        .await;
    assert!(matches!(result, Err(ServiceError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_only_creator_can_rename_or_delete() {
    let service = create_test_service();
    let alice = register(&service, "alice@example.com").await;
    let bob = register(&service, "bob@example.com").await;
    let group = service.create_group("Flat", &alice.id).await.unwrap();
    service
        .invite_member(&group.id, "bob@example.com", &alice.id)
        .await
        .unwrap();

    let result = service.rename_group(&group.id, "Bob's flat", &bob.id).await;
    assert!(matches!(result, Err(ServiceError::NotGroupOwner(_))));
    let result = service.delete_group(&group.id, &bob.id).await;
    assert!(matches!(result, Err(ServiceError::NotGroupOwner(_))));

    let renamed = service.rename_group(&group.id, "Flat 2B", &alice.id).await.unwrap();
    assert_eq!(renamed.name, "Flat 2B");

    service
        .add_expense(&group.id, &bob.id, 40.0, "Groceries")
        .await
        .unwrap();
    service.delete_group(&group.id, &alice.id).await.unwrap();

    let result = service.get_group_details(&group.id, &alice.id).await;
    assert!(matches!(result, Err(ServiceError::GroupNotFound(_))));
    assert!(service.list_groups(&bob.id).await.unwrap().is_empty());

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.last().map(|log| log.action.as_str()), Some(GROUP_DELETED));
}

#[tokio::test]
async fn test_list_groups_only_returns_memberships() {
    let service = create_test_service();
    let alice = register(&service, "alice@example.com").await;
    let bob = register(&service, "bob@example.com").await;
    let shared = service.create_group("Shared", &alice.id).await.unwrap();
    service.create_group("Private", &alice.id).await.unwrap();
    service
        .invite_member(&shared.id, "bob@example.com", &alice.id)
        .await
        .unwrap();

    assert_eq!(service.list_groups(&alice.id).await.unwrap().len(), 2);
    let bob_groups = service.list_groups(&bob.id).await.unwrap();
    assert_eq!(bob_groups.len(), 1);
    assert_eq!(bob_groups[0].id, shared.id);
}
