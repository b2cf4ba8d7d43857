//! Main settlement engine
//!
//! Orchestrates snapshotting, netting and plan verification.

use crate::{
    config::Config,
    netting::NettingEngine,
    types::SettlementPlan,
    Error, Result,
};
use ledger_core::{BalanceSnapshot, Ledger, SharedLedger};
use rust_decimal::Decimal;

/// Settlement engine
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    /// Netting engine
    netting: NettingEngine,

    /// Configuration
    config: Config,
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new(config: Config) -> Self {
        Self {
            netting: NettingEngine::new(),
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Settle the current balances of `ledger`
    pub fn run(&self, ledger: &Ledger) -> Result<SettlementPlan> {
        self.settle_snapshot(ledger.snapshot(), ledger.gross_volume())
    }

    /// Settle a consistent snapshot of a shared ledger
    ///
    /// Writers may keep recording afterwards; the plan reflects the moment
    /// the snapshot was taken.
    pub fn run_shared(&self, ledger: &SharedLedger) -> Result<SettlementPlan> {
        let (snapshot, gross) = ledger.with_ledger(|l| (l.snapshot(), l.gross_volume()));
        self.settle_snapshot(snapshot, gross)
    }

    /// Settle an externally supplied snapshot
    ///
    /// `gross_volume` only feeds the efficiency figures.
    pub fn settle_snapshot(
        &self,
        snapshot: BalanceSnapshot,
        gross_volume: Decimal,
    ) -> Result<SettlementPlan> {
        tracing::info!(
            parties = snapshot.party_count(),
            non_zero = snapshot.non_zero_count(),
            "Starting settlement run"
        );

        let settlements = self.netting.settle(&snapshot)?;
        let plan = SettlementPlan::new(snapshot.party_count(), settlements, gross_volume)?;

        if self.config.netting.verify_plan {
            Self::verify_plan(&plan, &snapshot)?;
        }

        tracing::info!(
            "Settlement complete: {} gross → {} net in {} settlements ({:.1}% efficiency)",
            plan.total_gross_amount,
            plan.total_net_amount,
            plan.settlements.len(),
            plan.netting_efficiency * 100.0
        );

        Ok(plan)
    }

    /// Check that `plan` discharges `snapshot` exactly
    ///
    /// Replaying the settlements from zero must reproduce the snapshot, every
    /// amount must be positive, and there must be at most one settlement
    /// fewer than the number of non-zero balances.
    pub fn verify_plan(plan: &SettlementPlan, snapshot: &BalanceSnapshot) -> Result<()> {
        if plan.party_count != snapshot.party_count() {
            return Err(Error::Verification(format!(
                "plan covers {} parties, snapshot has {}",
                plan.party_count,
                snapshot.party_count()
            )));
        }

        if let Some(s) = plan.settlements.iter().find(|s| s.amount <= Decimal::ZERO) {
            return Err(Error::Verification(format!(
                "non-positive settlement: {}",
                s
            )));
        }

        let replayed = plan.replay();
        if let Some((party, expected)) = snapshot
            .iter()
            .find(|(party, expected)| replayed.balance(*party) != Some(*expected))
        {
            return Err(Error::Verification(format!(
                "party {} replays to {:?}, expected {}",
                party,
                replayed.balance(party),
                expected
            )));
        }

        let bound = snapshot.non_zero_count().saturating_sub(1);
        if plan.settlements.len() > bound {
            return Err(Error::Verification(format!(
                "{} settlements exceed bound of {}",
                plan.settlements.len(),
                bound
            )));
        }

        Ok(())
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Settlement;
    use ledger_core::PartyId;

    fn p(i: usize) -> PartyId {
        PartyId::new(i)
    }

    #[test]
    fn test_run_sample_ledger() {
        let mut ledger = Ledger::new(3);
        ledger.add_transaction(p(0), p(1), Decimal::new(1500, 0)).unwrap();
        ledger.add_transaction(p(1), p(2), Decimal::new(2500, 0)).unwrap();
        ledger.add_transaction(p(0), p(2), Decimal::new(2000, 0)).unwrap();

        let engine = SettlementEngine::default();
        let plan = engine.run(&ledger).unwrap();

        assert_eq!(plan.settlements.len(), 2);
        assert_eq!(plan.total_net_amount, Decimal::new(3500, 0));
        assert_eq!(plan.total_gross_amount, Decimal::new(6000, 0));
        assert_eq!(plan.replay(), ledger.snapshot());
    }

    #[test]
    fn test_run_empty_ledger() {
        let engine = SettlementEngine::default();
        let plan = engine.run(&Ledger::new(5)).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.party_count, 5);
    }

    #[test]
    fn test_run_shared() {
        let ledger = SharedLedger::new(2);
        ledger.add_transaction(p(0), p(1), Decimal::new(100, 0)).unwrap();

        let plan = SettlementEngine::default().run_shared(&ledger).unwrap();
        assert_eq!(
            plan.settlements,
            vec![Settlement {
                debtor: p(0),
                creditor: p(1),
                amount: Decimal::new(100, 0)
            }]
        );
    }

    #[test]
    fn test_injected_unbalanced_snapshot() {
        let snapshot = BalanceSnapshot::from_balances(vec![
            Decimal::new(-10, 0),
            Decimal::new(15, 0),
        ]);

        let err = SettlementEngine::default()
            .settle_snapshot(snapshot, Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, Error::UnbalancedState { .. }));
    }

    #[test]
    fn test_extreme_injected_snapshot_reports_overflow() {
        let snapshot = BalanceSnapshot::from_balances(vec![
            Decimal::MAX,
            Decimal::MAX,
            Decimal::MIN,
            Decimal::MIN,
        ]);

        let err = SettlementEngine::default()
            .settle_snapshot(snapshot, Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, Error::AmountOverflow(_)));
    }

    #[test]
    fn test_verify_rejects_tampered_plan() {
        let snapshot = BalanceSnapshot::from_balances(vec![
            Decimal::new(-10, 0),
            Decimal::new(10, 0),
        ]);
        let engine = SettlementEngine::default();
        let mut plan = engine.settle_snapshot(snapshot.clone(), Decimal::new(10, 0)).unwrap();

        plan.settlements[0].amount = Decimal::new(9, 0);
        let err = SettlementEngine::verify_plan(&plan, &snapshot).unwrap_err();
        assert!(matches!(err, Error::Verification(_)));
    }

    #[test]
    fn test_verify_rejects_excess_settlements() {
        let snapshot = BalanceSnapshot::from_balances(vec![
            Decimal::new(-10, 0),
            Decimal::new(10, 0),
        ]);
        let plan = SettlementPlan::new(
            2,
            vec![
                Settlement {
                    debtor: p(0),
                    creditor: p(1),
                    amount: Decimal::new(4, 0),
                },
                Settlement {
                    debtor: p(0),
                    creditor: p(1),
                    amount: Decimal::new(6, 0),
                },
            ],
            Decimal::new(10, 0),
        )
        .unwrap();

        let err = SettlementEngine::verify_plan(&plan, &snapshot).unwrap_err();
        assert!(err.to_string().contains("exceed bound"));
    }

    #[test]
    fn test_verify_rejects_party_count_mismatch() {
        let snapshot = BalanceSnapshot::from_balances(vec![Decimal::ZERO; 3]);
        let plan = SettlementPlan::new(2, vec![], Decimal::ZERO).unwrap();
        assert!(SettlementEngine::verify_plan(&plan, &snapshot).is_err());
    }
}
