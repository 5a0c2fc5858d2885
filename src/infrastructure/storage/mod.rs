use crate::core::errors::ServiceError;
use crate::core::models::{ExpenseRecord, Group, GroupMember, MemberId, User};
use async_trait::async_trait;

/// Group, member-directory and expense records. The settlement engine never reaches in here;
/// the service reads a snapshot and hands it over.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Inserts the user unless its email is taken, in which case `EmailAlreadyRegistered`.
    async fn create_user_if_not_exists(&self, user: User) -> Result<User, ServiceError>;
    async fn get_user(&self, user_id: &MemberId) -> Result<Option<User>, ServiceError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
    async fn save_group(&self, group: Group) -> Result<(), ServiceError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, ServiceError>;
    /// Appends `member` to the group's roster in place. Returns the updated group and whether
    /// the member was new; an existing member leaves the group untouched.
    async fn add_member(&self, group_id: &str, member: GroupMember) -> Result<(Group, bool), ServiceError>;
    async fn rename_group(&self, group_id: &str, name: &str) -> Result<Group, ServiceError>;
    /// Removes the group together with all of its expenses.
    async fn delete_group(&self, group_id: &str) -> Result<(), ServiceError>;
    async fn get_member_groups(&self, member_id: &MemberId) -> Result<Vec<Group>, ServiceError>;
    /// Stores the expense under the group's next sequence number and returns the stored record.
    async fn append_expense(&self, record: ExpenseRecord) -> Result<ExpenseRecord, ServiceError>;
    /// Expenses of one group in sequence order.
    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<ExpenseRecord>, ServiceError>;
}

pub mod in_memory;
