use super::member::{MemberId, Roster};
use crate::core::errors::SettlementError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Owner,
    Member,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Owner => "OWNER",
            Role::Member => "MEMBER",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupMember {
    pub member_id: MemberId,
    pub role: Role,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub joined_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub created_by: MemberId,
    /// Members in the order they joined. This order is the settlement roster order.
    pub members: Vec<GroupMember>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

impl GroupMember {
    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }
}

impl Group {
    pub fn is_member(&self, member_id: &MemberId) -> bool {
        self.members.iter().any(|m| &m.member_id == member_id)
    }

    pub fn is_owner(&self, member_id: &MemberId) -> bool {
        self.members
            .iter()
            .any(|m| &m.member_id == member_id && m.is_owner())
    }

    pub fn member_ids(&self) -> Vec<MemberId> {
        self.members.iter().map(|m| m.member_id.clone()).collect()
    }

    pub fn roster(&self) -> Result<Roster, SettlementError> {
        Roster::new(self.member_ids())
    }
}
