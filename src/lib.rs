pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::{ServiceError, SettlementError};
pub use crate::core::models::{GroupExpense, MemberId, Money, Roster, Transfer};
pub use crate::core::services::GroupService;
pub use crate::core::settlement::{BalanceAggregator, DebtSimplifier, SettlementPlan, settle};
pub use infrastructure::logging::in_memory::InMemoryLogging;
pub use infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
