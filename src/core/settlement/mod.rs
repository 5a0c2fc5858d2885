//! Group expense settlement: net balances per member, then the shortest transfer plan that
//! zeroes them. Pure and synchronous; every call recomputes from the expense list it is given.

mod aggregator;
mod simplifier;

pub use aggregator::BalanceAggregator;
pub use simplifier::DebtSimplifier;

use crate::core::errors::SettlementError;
use crate::core::models::{Balances, GroupExpense, MemberId, Money, Roster, Transfer};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettlementPlan {
    pub balances: Balances,
    pub transfers: Vec<Transfer>,
}

/// A property a settlement plan failed to satisfy.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanViolation {
    #[error("balances sum to {0} instead of zero")]
    NonZeroSum(i128),
    #[error("transfer #{0} is not a positive payment between two distinct members")]
    InvalidTransfer(usize),
    #[error("transfer #{0} names a member without a balance")]
    UnknownMember(usize),
    #[error("{0} is left with {1} after applying every transfer")]
    Unsettled(MemberId, Money),
    #[error("{count} transfers exceed the limit of {limit}")]
    TooManyTransfers { count: usize, limit: usize },
}

impl SettlementPlan {
    /// Members that still have something to pay or receive.
    pub fn unsettled_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    /// Re-applies every transfer to the balances and checks conservation, positivity,
    /// full settlement and the `n - 1` transfer bound.
    pub fn verify(&self) -> Result<(), PlanViolation> {
        let sum: i128 = self.balances.values().map(|m| m.minor() as i128).sum();
        if sum != 0 {
            return Err(PlanViolation::NonZeroSum(sum));
        }

        let limit = self.unsettled_count().saturating_sub(1);
        if self.transfers.len() > limit {
            return Err(PlanViolation::TooManyTransfers {
                count: self.transfers.len(),
                limit,
            });
        }

        let mut remaining: BTreeMap<&MemberId, i128> = self
            .balances
            .iter()
            .map(|(member, balance)| (member, balance.minor() as i128))
            .collect();
        for (i, transfer) in self.transfers.iter().enumerate() {
            if !transfer.amount.is_positive() || transfer.from == transfer.to {
                return Err(PlanViolation::InvalidTransfer(i));
            }
            let amount = transfer.amount.minor() as i128;
            *remaining
                .get_mut(&transfer.from)
                .ok_or(PlanViolation::UnknownMember(i))? += amount;
            *remaining
                .get_mut(&transfer.to)
                .ok_or(PlanViolation::UnknownMember(i))? -= amount;
        }

        match remaining.into_iter().find(|(_, left)| *left != 0) {
            Some((member, left)) => Err(PlanViolation::Unsettled(
                member.clone(),
                Money::from_minor(left as i64),
            )),
            None => Ok(()),
        }
    }
}

/// Computes balances for `expenses` over `roster` and the transfers that settle them.
/// Either both succeed or nothing is returned.
pub fn settle(roster: &Roster, expenses: &[GroupExpense]) -> Result<SettlementPlan, SettlementError> {
    let balances = BalanceAggregator.aggregate(roster, expenses)?;
    let transfers = DebtSimplifier.simplify(&balances)?;
    let plan = SettlementPlan {
        balances,
        transfers,
    };
    debug_assert_eq!(plan.verify(), Ok(()));
    debug!(
        "Settlement plan: {} transfers for {} unsettled members",
        plan.transfers.len(),
        plan.unsettled_count()
    );
    Ok(plan)
}
