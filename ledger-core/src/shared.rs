//! Lock-serialized ledger handle
//!
//! Writers take the lock exclusively for the whole of one transaction, so a
//! snapshot never contains half of a transfer.

use crate::{
    types::{BalanceSnapshot, PartyId, Transaction},
    Ledger, Result,
};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Clone-able handle to a ledger shared across threads
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    /// Create shared ledger with `party_count` parties
    pub fn new(party_count: usize) -> Self {
        Self::from_ledger(Ledger::new(party_count))
    }

    /// Wrap an existing ledger
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Record an IOU under the write lock
    pub fn add_transaction(&self, payer: PartyId, payee: PartyId, amount: Decimal) -> Result<()> {
        self.inner.write().add_transaction(payer, payee, amount)
    }

    /// Record a [`Transaction`] value under the write lock
    pub fn record(&self, tx: &Transaction) -> Result<()> {
        self.inner.write().record(tx)
    }

    /// Consistent copy of the balances
    pub fn snapshot(&self) -> BalanceSnapshot {
        self.inner.read().snapshot()
    }

    /// Run `f` against the ledger under the read lock
    pub fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.inner.read())
    }

    /// Number of parties
    pub fn party_count(&self) -> usize {
        self.inner.read().party_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_writers_preserve_zero_sum() {
        let ledger = SharedLedger::new(4);

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        let payer = PartyId::new(worker);
                        let payee = PartyId::new((worker + 1 + i % 3) % 4);
                        ledger
                            .add_transaction(payer, payee, Decimal::new(i as i64 + 1, 2))
                            .unwrap();
                    }
                })
            })
            .collect();

        // Snapshots taken mid-flight must already be balanced
        for _ in 0..50 {
            assert!(ledger.snapshot().is_balanced());
        }

        for handle in handles {
            handle.join().unwrap();
        }

        ledger.with_ledger(|l| {
            assert_eq!(l.transaction_count(), 1000);
            assert!(l.check_invariant().is_ok());
        });
    }

    #[test]
    fn test_overflowing_write_leaves_snapshot_balanced() {
        let ledger = SharedLedger::new(3);
        ledger
            .add_transaction(PartyId::new(0), PartyId::new(1), Decimal::MAX)
            .unwrap();

        let result = ledger.add_transaction(PartyId::new(2), PartyId::new(1), Decimal::MAX);
        assert!(matches!(result, Err(crate::Error::AmountOverflow { .. })));

        let snapshot = ledger.snapshot();
        assert!(snapshot.is_balanced());
        assert_eq!(snapshot.balance(PartyId::new(2)), Some(Decimal::ZERO));
    }

    #[test]
    fn test_rejection_through_handle() {
        let ledger = SharedLedger::new(2);
        assert!(ledger
            .record(&Transaction::new(0, 0, Decimal::ONE))
            .is_err());
        assert_eq!(ledger.party_count(), 2);
        assert_eq!(ledger.snapshot().non_zero_count(), 0);
    }
}
