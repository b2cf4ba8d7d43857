//! Core types for settlement engine

use chrono::{DateTime, Utc};
use ledger_core::{BalanceSnapshot, PartyId};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Single payment instruction: `debtor` pays `creditor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Party paying
    pub debtor: PartyId,

    /// Party receiving
    pub creditor: PartyId,

    /// Amount to transfer (always positive)
    pub amount: Decimal,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person {} pays Person {}: {}",
            self.debtor, self.creditor, self.amount
        )
    }
}

/// Result of one settlement run
///
/// Settlement order reflects the order of matching only. Consumers should
/// rely on the multiset of settlements, not their position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Plan ID
    pub plan_id: Uuid,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Number of parties in the settled snapshot
    pub party_count: usize,

    /// Settlements to execute, in matching order
    pub settlements: Vec<Settlement>,

    /// Total gross amount recorded in the ledger
    pub total_gross_amount: Decimal,

    /// Total amount moved by the settlements
    pub total_net_amount: Decimal,

    /// Netting efficiency (0.0 - 1.0)
    /// Higher = more netting
    pub netting_efficiency: f64,
}

impl SettlementPlan {
    /// Build plan from solver output
    ///
    /// Fails when the settlement amounts sum past `Decimal::MAX`, which only
    /// injected snapshots with extreme balances can cause.
    pub fn new(
        party_count: usize,
        settlements: Vec<Settlement>,
        total_gross_amount: Decimal,
    ) -> crate::Result<Self> {
        let total_net_amount = settlements
            .iter()
            .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.amount))
            .ok_or_else(|| {
                crate::Error::AmountOverflow(format!(
                    "net total of {} settlements",
                    settlements.len()
                ))
            })?;

        let mut plan = Self {
            plan_id: Uuid::new_v4(),
            created_at: Utc::now(),
            party_count,
            settlements,
            total_gross_amount,
            total_net_amount,
            netting_efficiency: 0.0,
        };
        plan.netting_efficiency = plan.calculate_efficiency();
        Ok(plan)
    }

    /// Calculate netting efficiency, clamped to `[0, 1]`
    ///
    /// A caller-supplied gross volume below the net amount reports 0.
    pub fn calculate_efficiency(&self) -> f64 {
        if self.total_gross_amount <= Decimal::ZERO {
            return 0.0;
        }

        let netted = self.total_gross_amount - self.total_net_amount;
        let efficiency = netted / self.total_gross_amount;
        efficiency.to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
    }

    /// Calculate savings from netting (negative if gross < net)
    pub fn calculate_savings(&self) -> Decimal {
        self.total_gross_amount - self.total_net_amount
    }

    /// True when nothing needs to move
    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Re-apply every settlement against a zero vector
    ///
    /// A correct plan reproduces the balances it was computed from.
    /// Settlements naming a party outside `party_count` are skipped; they
    /// cannot be produced by the solver. Each replayed balance is bounded by
    /// `total_net_amount`, which [`SettlementPlan::new`] keeps in range.
    pub fn replay(&self) -> BalanceSnapshot {
        let mut balances = vec![Decimal::ZERO; self.party_count];

        for s in &self.settlements {
            if let Some(b) = balances.get_mut(s.debtor.index()) {
                *b -= s.amount;
            }
            if let Some(b) = balances.get_mut(s.creditor.index()) {
                *b += s.amount;
            }
        }

        BalanceSnapshot::from_balances(balances)
    }

    /// Total paid per debtor
    pub fn paid_by_debtor(&self) -> BTreeMap<PartyId, Decimal> {
        let mut totals = BTreeMap::new();
        for s in &self.settlements {
            *totals.entry(s.debtor).or_insert(Decimal::ZERO) += s.amount;
        }
        totals
    }

    /// Total received per creditor
    pub fn received_by_creditor(&self) -> BTreeMap<PartyId, Decimal> {
        let mut totals = BTreeMap::new();
        for s in &self.settlements {
            *totals.entry(s.creditor).or_insert(Decimal::ZERO) += s.amount;
        }
        totals
    }

    /// Summary statistics
    pub fn stats(&self, gross_transaction_count: u64) -> NettingStats {
        let parties: std::collections::BTreeSet<PartyId> = self
            .settlements
            .iter()
            .flat_map(|s| [s.debtor, s.creditor])
            .collect();

        NettingStats {
            party_count: parties.len(),
            gross_transaction_count,
            settlement_count: self.settlements.len(),
            total_gross: self.total_gross_amount,
            total_net: self.total_net_amount,
            amount_saved: self.calculate_savings(),
            efficiency: self.netting_efficiency,
            transactions_eliminated: gross_transaction_count
                .saturating_sub(self.settlements.len() as u64),
        }
    }
}

/// Netting statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NettingStats {
    /// Number of parties that pay or receive
    pub party_count: usize,

    /// Number of recorded transactions
    pub gross_transaction_count: u64,

    /// Number of settlements
    pub settlement_count: usize,

    /// Total gross amount
    pub total_gross: Decimal,

    /// Total net amount
    pub total_net: Decimal,

    /// Amount saved
    pub amount_saved: Decimal,

    /// Netting efficiency (0.0 - 1.0)
    pub efficiency: f64,

    /// Number of transfers eliminated
    pub transactions_eliminated: u64,
}
