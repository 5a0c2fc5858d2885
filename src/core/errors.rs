use crate::core::models::MemberId;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

/// Rejections raised by the settlement engine. None of them is retryable: the same input fails
/// the same way until the caller supplies a consistent snapshot.
#[derive(Error, Debug, Serialize, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// Roster is empty or lists a member twice
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    /// Expense payer is not in the roster
    #[error("Expense #{sequence} is paid by {payer}, who is not a group member")]
    UnknownPayer { sequence: u64, payer: MemberId },

    /// Expense sharer is not in the roster
    #[error("Expense #{sequence} is shared with {participant}, who is not a group member")]
    UnknownParticipant { sequence: u64, participant: MemberId },

    /// Expense amount is zero or negative
    #[error("Expense #{sequence} has non-positive amount {amount}")]
    NonPositiveAmount { sequence: u64, amount: i64 },

    /// Expense lists an empty set of sharers
    #[error("Expense #{0} has no participants")]
    NoParticipants(u64),

    /// Running balance left the representable range
    #[error("Balance overflow while applying expense #{0}")]
    AmountOverflow(u64),

    /// Balances handed to the simplifier do not sum to zero
    #[error("Balances do not sum to zero (residual {0} minor units)")]
    Unbalanced(i128),
}

#[derive(Error, Debug, Serialize)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("User {0} is not a group member")]
    NotGroupMember(String),
    #[error("User {0} is not group owner")]
    NotGroupOwner(String),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Settlement failed: {0}")]
    Settlement(#[from] SettlementError),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
}
