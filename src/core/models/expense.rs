use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::member::MemberId;
use super::money::Money;

/// One shared expense, paid by a single member and owed by its sharers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupExpense {
    pub sequence: u64,
    pub payer: MemberId,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    /// Members sharing the cost. `None` splits across the whole roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<MemberId>>,
}

impl GroupExpense {
    pub fn new(sequence: u64, payer: impl Into<MemberId>, amount: Money) -> Self {
        GroupExpense {
            sequence,
            payer: payer.into(),
            amount,
            description: String::new(),
            participants: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_participants<I, M>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberId>,
    {
        self.participants = Some(participants.into_iter().map(Into::into).collect());
        self
    }
}

/// A stored group expense as the expense collaborator hands it out.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseRecord {
    pub id: String,
    pub group_id: String,
    #[serde(flatten)]
    pub expense: GroupExpense,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}
