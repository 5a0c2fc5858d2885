use crate::core::errors::ServiceError;
use crate::core::models::{ExpenseRecord, Group, GroupMember, MemberId, User};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<MemberId, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, MemberId>>>,
    groups: Arc<RwLock<HashMap<String, Group>>>,
    expenses: Arc<RwLock<HashMap<String, Vec<ExpenseRecord>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user_if_not_exists(&self, user: User) -> Result<User, ServiceError> {
        let mut users_by_email = self.users_by_email.write().await;
        if users_by_email.contains_key(&user.email) {
            return Err(ServiceError::EmailAlreadyRegistered(user.email));
        }
        users_by_email.insert(user.email.clone(), user.id.clone());
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &MemberId) -> Result<Option<User>, ServiceError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let users_by_email = self.users_by_email.read().await;
        let users = self.users.read().await;
        Ok(users_by_email
            .get(email)
            .and_then(|user_id| users.get(user_id).cloned()))
    }

    async fn save_group(&self, group: Group) -> Result<(), ServiceError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, ServiceError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn add_member(&self, group_id: &str, member: GroupMember) -> Result<(Group, bool), ServiceError> {
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(group_id)
            .ok_or_else(|| ServiceError::GroupNotFound(group_id.to_string()))?;
        if group.is_member(&member.member_id) {
            return Ok((group.clone(), false));
        }
        group.members.push(member);
        Ok((group.clone(), true))
    }

    async fn rename_group(&self, group_id: &str, name: &str) -> Result<Group, ServiceError> {
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(group_id)
            .ok_or_else(|| ServiceError::GroupNotFound(group_id.to_string()))?;
        group.name = name.to_string();
        Ok(group.clone())
    }

    async fn delete_group(&self, group_id: &str) -> Result<(), ServiceError> {
        let mut groups = self.groups.write().await;
        let mut expenses = self.expenses.write().await;
        expenses.remove(group_id);
        groups.remove(group_id);
        Ok(())
    }

    async fn get_member_groups(&self, member_id: &MemberId) -> Result<Vec<Group>, ServiceError> {
        let groups = self.groups.read().await;
        let mut member_groups: Vec<Group> = groups
            .values()
            .filter(|g| g.is_member(member_id))
            .cloned()
            .collect();
        member_groups.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(member_groups)
    }

    async fn append_expense(&self, mut record: ExpenseRecord) -> Result<ExpenseRecord, ServiceError> {
        let groups = self.groups.read().await;
        if !groups.contains_key(&record.group_id) {
            return Err(ServiceError::GroupNotFound(record.group_id));
        }
        let mut expenses = self.expenses.write().await;
        let group_expenses = expenses.entry(record.group_id.clone()).or_default();
        record.expense.sequence = group_expenses.len() as u64 + 1;
        group_expenses.push(record.clone());
        Ok(record)
    }

    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<ExpenseRecord>, ServiceError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.get(group_id).cloned().unwrap_or_default())
    }
}
