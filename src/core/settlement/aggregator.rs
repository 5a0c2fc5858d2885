use crate::core::errors::SettlementError;
use crate::core::models::{Balances, GroupExpense, MemberId, Money, Roster};
use log::debug;
use std::collections::HashMap;

/// Folds a group's expense history into one net balance per roster member.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Splits every expense evenly across its sharers (the whole roster unless the expense lists
    /// participants), credits the payer with the full amount and debits each sharer its share.
    ///
    /// Leftover minor units from an uneven split go one each to the sharers other than the payer,
    /// taken from the end of the roster backwards, so each expense nets to exactly zero.
    ///
    /// Every roster member appears in the result, including those at zero. Any invalid expense
    /// fails the whole call.
    pub fn aggregate(
        &self,
        roster: &Roster,
        expenses: &[GroupExpense],
    ) -> Result<Balances, SettlementError> {
        debug!(
            "Aggregating {} expenses across {} members",
            expenses.len(),
            roster.len()
        );
        let index: HashMap<&MemberId, usize> = roster
            .members()
            .iter()
            .enumerate()
            .map(|(i, member)| (member, i))
            .collect();
        let mut running = vec![Money::ZERO; roster.len()];

        for expense in expenses {
            let sequence = expense.sequence;
            if !expense.amount.is_positive() {
                return Err(SettlementError::NonPositiveAmount {
                    sequence,
                    amount: expense.amount.minor(),
                });
            }
            let payer = *index
                .get(&expense.payer)
                .ok_or_else(|| SettlementError::UnknownPayer {
                    sequence,
                    payer: expense.payer.clone(),
                })?;
            let sharers = Self::sharers(expense, &index, roster.len())?;

            let count = sharers.len() as i64;
            let share = Money::from_minor(expense.amount.minor() / count);
            let remainder = (expense.amount.minor() % count) as usize;

            let overflow = || SettlementError::AmountOverflow(sequence);
            running[payer] = running[payer]
                .checked_add(expense.amount)
                .ok_or_else(overflow)?;
            for &sharer in &sharers {
                running[sharer] = running[sharer].checked_sub(share).ok_or_else(overflow)?;
            }
            // remainder < sharers.len(), so the non-payer sharers always cover it
            for &sharer in sharers.iter().rev().filter(|&&s| s != payer).take(remainder) {
                running[sharer] = running[sharer]
                    .checked_sub(Money::from_minor(1))
                    .ok_or_else(overflow)?;
            }
        }

        let balances: Balances = roster
            .members()
            .iter()
            .cloned()
            .zip(running)
            .collect();
        debug!("Balances calculated: {:?}", balances);
        Ok(balances)
    }

    /// Roster indices of the members sharing `expense`, ascending and deduplicated.
    fn sharers(
        expense: &GroupExpense,
        index: &HashMap<&MemberId, usize>,
        roster_len: usize,
    ) -> Result<Vec<usize>, SettlementError> {
        let Some(participants) = &expense.participants else {
            return Ok((0..roster_len).collect());
        };
        if participants.is_empty() {
            return Err(SettlementError::NoParticipants(expense.sequence));
        }
        let mut sharers = participants
            .iter()
            .map(|participant| {
                index
                    .get(participant)
                    .copied()
                    .ok_or_else(|| SettlementError::UnknownParticipant {
                        sequence: expense.sequence,
                        participant: participant.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        sharers.sort_unstable();
        sharers.dedup();
        Ok(sharers)
    }
}
