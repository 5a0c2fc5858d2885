use crate::constants::{
    EXPENSE_ADDED, GROUP_CREATED, GROUP_DELETED, GROUP_DETAILS_QUERIED, GROUP_RENAMED, MAX_DESCRIPTION_LENGTH,
    MAX_EMAIL_LENGTH, MAX_EXPENSE_AMOUNT, MAX_GROUP_NAME_LENGTH, MEMBER_INVITED, USER_REGISTERED,
};
use crate::core::errors::{FieldError, ServiceError};
use crate::core::models::{
    ExpenseRecord, Group, GroupExpense, GroupMember, MemberBalance, MemberId, Money, Role, Transfer, User,
    audit::AppLog,
};
use crate::core::settlement;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

/// Everything the group-detail view renders: the group, its history, and the settle-up plan.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct GroupDetails {
    pub group: Group,
    pub expenses: Vec<ExpenseRecord>,
    pub members_details: Vec<User>,
    /// Net balance per member, in roster order.
    pub balances: Vec<MemberBalance>,
    pub simplified_debts: Vec<Transfer>,
}

pub struct GroupService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
}

impl<L: LoggingService, S: Storage> GroupService<L, S> {
    pub fn new(storage: S, logging: L) -> Self {
        info!("Initializing GroupService");
        GroupService { storage, logging }
    }

    async fn require_user(&self, user_id: &MemberId) -> Result<User, ServiceError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))
    }

    async fn validate_group_membership(&self, group_id: &str, member_id: &MemberId) -> Result<Group, ServiceError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| ServiceError::GroupNotFound(group_id.to_string()))?;
        if !group.is_member(member_id) {
            warn!("User {} is not a member of group {}", member_id, group_id);
            return Err(ServiceError::NotGroupMember(member_id.to_string()));
        }
        Ok(group)
    }

    async fn validate_group_and_owner(&self, group_id: &str, owner_id: &MemberId) -> Result<Group, ServiceError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| ServiceError::GroupNotFound(group_id.to_string()))?;
        if !group.is_owner(owner_id) {
            warn!("User {} attempted an owner-only change on group {}", owner_id, group_id);
            return Err(ServiceError::NotGroupOwner(owner_id.to_string()));
        }
        Ok(group)
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), ServiceError> {
        if value.trim().is_empty() {
            return Err(invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.chars().count() > max_length {
            return Err(invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), ServiceError> {
        self.validate_string_input("email", email, MAX_EMAIL_LENGTH)?;
        let valid = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
            None => false,
        };
        if !valid || email.chars().any(char::is_whitespace) {
            return Err(invalid_input(
                "email",
                "Invalid email".to_string(),
                format!("{} is not a valid email address", email),
            ));
        }
        Ok(())
    }

    /// Checks a major-unit amount from the boundary and rounds it to minor units, once.
    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<Money, ServiceError> {
        if !amount.is_finite() {
            return Err(invalid_input(
                field,
                "Invalid Amount".to_string(),
                "Amount must be a finite number".to_string(),
            ));
        }
        if amount <= 0.0 {
            return Err(invalid_input(
                field,
                "Invalid Amount".to_string(),
                "Amount must be greater than 0".to_string(),
            ));
        }
        if amount > MAX_EXPENSE_AMOUNT {
            return Err(invalid_input(
                field,
                "Amount Too Large".to_string(),
                format!("Amount cannot exceed {}", MAX_EXPENSE_AMOUNT),
            ));
        }
        let money = Money::from_major(amount)
            .map_err(|e| invalid_input(field, "Invalid Amount".to_string(), e.to_string()))?;
        if !money.is_positive() {
            return Err(invalid_input(
                field,
                "Invalid Amount".to_string(),
                "Amount rounds to zero".to_string(),
            ));
        }
        Ok(money)
    }

    // USER DIRECTORY

    pub async fn register_user(&self, email: &str) -> Result<User, ServiceError> {
        let email = email.trim().to_lowercase();
        self.validate_email(&email)?;
        let user = self
            .storage
            .create_user_if_not_exists(User {
                id: MemberId::new(Uuid::new_v4().to_string()),
                email,
            })
            .await
            .inspect_err(|e| warn!("Registration rejected: {}", e))?;
        info!("Registered user {}", user.id);

        self.logging
            .log_action(USER_REGISTERED, None, json!({ "user_id": user.id }), Some(user.id.as_str()))
            .await?;
        Ok(user)
    }

    // GROUP MANAGEMENT

    pub async fn create_group(&self, name: &str, created_by: &MemberId) -> Result<Group, ServiceError> {
        self.validate_string_input("name", name, MAX_GROUP_NAME_LENGTH)?;
        self.require_user(created_by).await?;
        info!("Creating group '{}' for user {}", name, created_by);

        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            created_by: created_by.clone(),
            members: vec![GroupMember {
                member_id: created_by.clone(),
                role: Role::Owner,
                joined_at: now,
            }],
            created_at: now,
        };
        self.storage.save_group(group.clone()).await?;
        debug!("Group created with ID: {}", group.id);

        self.logging
            .log_action(
                GROUP_CREATED,
                Some(group.id.as_str()),
                json!({ "name": group.name }),
                Some(created_by.as_str()),
            )
            .await?;
        Ok(group)
    }

    pub async fn list_groups(&self, member_id: &MemberId) -> Result<Vec<Group>, ServiceError> {
        self.require_user(member_id).await?;
        self.storage.get_member_groups(member_id).await
    }

    /// Adds the directory user behind `email` to the group. Inviting an existing member is a no-op.
    pub async fn invite_member(&self, group_id: &str, email: &str, invited_by: &MemberId) -> Result<Group, ServiceError> {
        self.validate_group_membership(group_id, invited_by).await?;
        let email = email.trim().to_lowercase();
        let invitee = self
            .storage
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(email.clone()))?;

        let member = GroupMember {
            member_id: invitee.id.clone(),
            role: Role::Member,
            joined_at: Utc::now(),
        };
        let (group, added) = self.storage.add_member(group_id, member).await?;
        if !added {
            debug!("User {} already in group {}", invitee.id, group_id);
            return Ok(group);
        }
        info!("User {} invited to group {} by {}", invitee.id, group_id, invited_by);

        self.logging
            .log_action(
                MEMBER_INVITED,
                Some(group_id),
                json!({ "member_id": invitee.id }),
                Some(invited_by.as_str()),
            )
            .await?;
        Ok(group)
    }

    pub async fn rename_group(&self, group_id: &str, new_name: &str, renamed_by: &MemberId) -> Result<Group, ServiceError> {
        self.validate_group_and_owner(group_id, renamed_by).await?;
        self.validate_string_input("name", new_name, MAX_GROUP_NAME_LENGTH)?;

        let group = self.storage.rename_group(group_id, new_name.trim()).await?;
        info!("Group {} renamed to '{}'", group_id, group.name);

        self.logging
            .log_action(
                GROUP_RENAMED,
                Some(group_id),
                json!({ "name": group.name }),
                Some(renamed_by.as_str()),
            )
            .await?;
        Ok(group)
    }

    pub async fn delete_group(&self, group_id: &str, deleted_by: &MemberId) -> Result<(), ServiceError> {
        self.validate_group_and_owner(group_id, deleted_by).await?;
        self.storage.delete_group(group_id).await?;
        info!("Group {} and its expenses deleted by {}", group_id, deleted_by);

        self.logging
            .log_action(GROUP_DELETED, Some(group_id), json!({}), Some(deleted_by.as_str()))
            .await?;
        Ok(())
    }

    // EXPENSES

    /// Records an expense paid by `paid_by` and shared by everyone in the group right now.
    pub async fn add_expense(
        &self,
        group_id: &str,
        paid_by: &MemberId,
        amount: f64,
        description: &str,
    ) -> Result<ExpenseRecord, ServiceError> {
        let group = self.validate_group_membership(group_id, paid_by).await?;
        self.validate_string_input("description", description, MAX_DESCRIPTION_LENGTH)?;
        let amount = self.validate_amount_input("amount", amount)?;
        info!("Adding expense of {} to group {} paid by {}", amount, group_id, paid_by);

        let expense = GroupExpense::new(0, paid_by.clone(), amount)
            .with_description(description.trim())
            .with_participants(group.member_ids());
        let record = self
            .storage
            .append_expense(ExpenseRecord {
                id: Uuid::new_v4().to_string(),
                group_id: group_id.to_string(),
                expense,
                created_at: Utc::now(),
            })
            .await?;
        debug!("Expense {} stored as #{}", record.id, record.expense.sequence);

        self.logging
            .log_action(
                EXPENSE_ADDED,
                Some(group_id),
                json!({
                    "expense_id": record.id,
                    "sequence": record.expense.sequence,
                    "amount": record.expense.amount,
                }),
                Some(paid_by.as_str()),
            )
            .await?;
        Ok(record)
    }

    // SUMMARY & DEBT SIMPLIFICATION

    /// Recomputes balances and the settle-up plan from the group's current expense list.
    pub async fn get_group_details(&self, group_id: &str, viewer: &MemberId) -> Result<GroupDetails, ServiceError> {
        let group = self.validate_group_membership(group_id, viewer).await?;
        let expenses = self.storage.get_group_expenses(group_id).await?;

        let roster = group.roster()?;
        let history: Vec<GroupExpense> = expenses.iter().map(|r| r.expense.clone()).collect();
        let plan = settlement::settle(&roster, &history).inspect_err(|e| {
            warn!("Settlement failed for group {}: {}", group_id, e);
        })?;

        let balances = roster
            .members()
            .iter()
            .map(|member| MemberBalance {
                member_id: member.clone(),
                net_balance: plan.balances.get(member).copied().unwrap_or_default(),
            })
            .collect();

        let lookups = roster.members().iter().map(|member| self.storage.get_user(member));
        let members_details = futures::future::try_join_all(lookups)
            .await?
            .into_iter()
            .flatten()
            .collect();

        self.logging
            .log_action(
                GROUP_DETAILS_QUERIED,
                Some(group_id),
                json!({
                    "expenses": expenses.len(),
                    "transfers": plan.transfers.len(),
                }),
                Some(viewer.as_str()),
            )
            .await?;

        Ok(GroupDetails {
            group,
            expenses,
            members_details,
            balances,
            simplified_debts: plan.transfers,
        })
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, ServiceError> {
        self.logging.get_logs().await
    }

    /// Action history of one group, oldest first. Only members may read it.
    pub async fn get_group_logs(&self, group_id: &str, viewer: &MemberId) -> Result<Vec<AppLog>, ServiceError> {
        self.validate_group_membership(group_id, viewer).await?;
        self.logging.get_group_logs(group_id).await
    }
}

fn invalid_input(field: &str, title: String, description: String) -> ServiceError {
    ServiceError::InvalidInput(
        field.to_string(),
        FieldError {
            field: field.to_string(),
            title,
            description,
        },
    )
}
