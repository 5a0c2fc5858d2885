use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use utoipa::ToSchema;

use crate::core::errors::SettlementError;

/// Opaque member identifier. The derived `Ord` (lexical) is the tie-break order for settlement.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        MemberId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        MemberId(id.to_string())
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        MemberId(id)
    }
}

/// Ordered, non-empty, duplicate-free list of the members of one group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    members: Vec<MemberId>,
}

impl Roster {
    pub fn new(members: Vec<MemberId>) -> Result<Self, SettlementError> {
        if members.is_empty() {
            return Err(SettlementError::InvalidRoster(
                "a group needs at least one member".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member) {
                return Err(SettlementError::InvalidRoster(format!(
                    "member {} is listed more than once",
                    member
                )));
            }
        }
        Ok(Roster { members })
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
