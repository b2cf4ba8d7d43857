//! Multilateral netting algorithm
//!
//! Greedy largest-extremes-first settlement over net balances.
//!
//! # Algorithm
//!
//! 1. Split parties into creditors (balance > 0) and debtors (balance < 0),
//!    each in a max-heap keyed by magnitude
//! 2. Pop the largest creditor and the largest debtor
//! 3. Settle `min(credit, debt)` between them
//! 4. Push back whichever side still has a remainder
//! 5. Stop when either heap is empty
//!
//! Every step fully discharges at least one party and the last step
//! discharges both, so `k` non-zero balances produce at most `k - 1`
//! settlements in `O(k log k)`.
//!
//! # Example
//!
//! ```text
//! Net positions:
//!   0: -3500 (debtor)
//!   1: +1000 (creditor)
//!   2: +2500 (creditor)
//!
//! Settlements:
//!   0 pays 2: 2500
//!   0 pays 1: 1000
//! ```

use crate::{types::Settlement, Error, Result};
use ledger_core::{BalanceSnapshot, PartyId};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Heap entry: magnitude first, then lower party index wins ties
type Position = (Decimal, Reverse<PartyId>);

/// Netting engine
#[derive(Debug, Clone, Default)]
pub struct NettingEngine {
    _private: (),
}

impl NettingEngine {
    /// Create new netting engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute settlements that bring every balance in `snapshot` to zero
    ///
    /// Parties at exactly zero take no part. If the snapshot does not sum to
    /// zero, matching stops with entries left on one side and those are
    /// returned as [`Error::UnbalancedState`] rather than dropped.
    pub fn settle(&self, snapshot: &BalanceSnapshot) -> Result<Vec<Settlement>> {
        let (mut creditors, mut debtors) = Self::partition(snapshot);

        tracing::debug!(
            creditors = creditors.len(),
            debtors = debtors.len(),
            "Partitioned net positions"
        );

        let mut settlements = Vec::with_capacity(creditors.len() + debtors.len());

        loop {
            let (Some(&(credit, Reverse(creditor))), Some(&(debt, Reverse(debtor)))) =
                (creditors.peek(), debtors.peek())
            else {
                break;
            };
            creditors.pop();
            debtors.pop();

            let amount = credit.min(debt);
            tracing::debug!(%debtor, %creditor, %amount, "Matched settlement");

            settlements.push(Settlement {
                debtor,
                creditor,
                amount,
            });

            let credit_left = credit - amount;
            let debt_left = debt - amount;

            if credit_left > Decimal::ZERO {
                creditors.push((credit_left, Reverse(creditor)));
            }
            if debt_left > Decimal::ZERO {
                debtors.push((debt_left, Reverse(debtor)));
            }
        }

        if !creditors.is_empty() || !debtors.is_empty() {
            let mut residual: Vec<(PartyId, Decimal)> = creditors
                .into_iter()
                .map(|(amount, Reverse(party))| (party, amount))
                .chain(
                    debtors
                        .into_iter()
                        .map(|(amount, Reverse(party))| (party, -amount)),
                )
                .collect();
            residual.sort_by_key(|(party, _)| *party);

            tracing::error!(
                residual_parties = residual.len(),
                "Balances do not sum to zero"
            );
            return Err(Error::UnbalancedState { residual });
        }

        Ok(settlements)
    }

    /// Build creditor and debtor heaps, both keyed by positive magnitude
    fn partition(snapshot: &BalanceSnapshot) -> (BinaryHeap<Position>, BinaryHeap<Position>) {
        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();

        for (party, balance) in snapshot.iter() {
            if balance > Decimal::ZERO {
                creditors.push((balance, Reverse(party)));
            } else if balance < Decimal::ZERO {
                debtors.push((-balance, Reverse(party)));
            }
        }

        (creditors, debtors)
    }
}
