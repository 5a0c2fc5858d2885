use crate::core::errors::SettlementError;
use crate::core::models::{Balances, MemberId, Money, Transfer};
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Heap entry: outstanding magnitude in minor units, then the lexically smallest member on ties.
type Party = (u64, Reverse<MemberId>);

/// Reduces net balances to a short list of point-to-point transfers.
pub struct DebtSimplifier;

impl DebtSimplifier {
    /// Greedy largest-versus-largest matching: the biggest debtor pays the biggest creditor
    /// `min(credit, debt)`, and whoever reaches zero drops out. Each step zeroes at least one
    /// party, so `n` non-zero balances settle in at most `n - 1` transfers.
    ///
    /// Balances must sum to zero; anything else is rejected before a transfer is emitted.
    pub fn simplify(&self, balances: &Balances) -> Result<Vec<Transfer>, SettlementError> {
        let residual: i128 = balances.values().map(|m| m.minor() as i128).sum();
        if residual != 0 {
            return Err(SettlementError::Unbalanced(residual));
        }

        let mut creditors: BinaryHeap<Party> = BinaryHeap::new();
        let mut debtors: BinaryHeap<Party> = BinaryHeap::new();
        for (member, balance) in balances {
            let magnitude = balance.minor().unsigned_abs();
            if balance.is_positive() {
                creditors.push((magnitude, Reverse(member.clone())));
            } else if balance.is_negative() {
                debtors.push((magnitude, Reverse(member.clone())));
            }
        }

        let mut transfers = Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));
        // Zero sum means both heaps run dry on the same step
        while let Some((credit, Reverse(creditor))) = creditors.pop() {
            let Some((debt, Reverse(debtor))) = debtors.pop() else {
                break;
            };

            // Bounded by a creditor's balance, so it fits back into i64
            let amount = credit.min(debt);
            transfers.push(Transfer {
                from: debtor.clone(),
                to: creditor.clone(),
                amount: Money::from_minor(amount as i64),
            });

            if credit > amount {
                creditors.push((credit - amount, Reverse(creditor)));
            }
            if debt > amount {
                debtors.push((debt - amount, Reverse(debtor)));
            }
        }
        debug_assert!(creditors.is_empty() && debtors.is_empty());

        debug!("Simplified debts: {:?}", transfers);
        Ok(transfers)
    }
}
