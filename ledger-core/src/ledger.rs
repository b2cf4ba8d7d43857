//! Net balance ledger
//!
//! Folds transactions into one signed balance per party. Every accepted
//! transaction subtracts `amount` from the payer and adds it to the payee,
//! so the zero-sum invariant holds by construction.
//!
//! # Example
//!
//! ```
//! use ledger_core::{Ledger, PartyId};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new(3);
//! ledger.add_transaction(PartyId::new(0), PartyId::new(1), Decimal::new(1500, 0))?;
//! ledger.add_transaction(PartyId::new(1), PartyId::new(2), Decimal::new(2500, 0))?;
//! ledger.add_transaction(PartyId::new(0), PartyId::new(2), Decimal::new(2000, 0))?;
//!
//! assert_eq!(ledger.balance(PartyId::new(0))?, Decimal::new(-3500, 0));
//! # Ok::<(), ledger_core::Error>(())
//! ```

use crate::{
    types::{BalanceSnapshot, PartyId, Transaction},
    Error, Result,
};
use rust_decimal::Decimal;

/// Ledger of net balances for a fixed set of parties
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Net balance per party (positive = creditor, negative = debtor)
    balances: Vec<Decimal>,

    /// Accepted transactions
    transaction_count: u64,

    /// Sum of all accepted amounts
    gross_volume: Decimal,
}

impl Ledger {
    /// Create ledger with `party_count` parties, all at zero
    pub fn new(party_count: usize) -> Self {
        Self {
            balances: vec![Decimal::ZERO; party_count],
            transaction_count: 0,
            gross_volume: Decimal::ZERO,
        }
    }

    /// Number of parties
    pub fn party_count(&self) -> usize {
        self.balances.len()
    }

    /// Record an IOU: `payer` balance decreases, `payee` balance increases
    ///
    /// Rejected without touching any balance when either party is out of
    /// range, when payer and payee coincide, when `amount <= 0`, or when
    /// applying it would overflow. All new values are computed before any
    /// write, so a transaction is applied whole or not at all.
    pub fn add_transaction(
        &mut self,
        payer: PartyId,
        payee: PartyId,
        amount: Decimal,
    ) -> Result<()> {
        self.validate(payer, payee, amount)?;

        let overflow = || Error::AmountOverflow {
            payer,
            payee,
            amount,
        };
        let payer_balance = self.balances[payer.index()]
            .checked_sub(amount)
            .ok_or_else(overflow)?;
        let payee_balance = self.balances[payee.index()]
            .checked_add(amount)
            .ok_or_else(overflow)?;
        let gross_volume = self.gross_volume.checked_add(amount).ok_or_else(overflow)?;

        self.balances[payer.index()] = payer_balance;
        self.balances[payee.index()] = payee_balance;
        self.gross_volume = gross_volume;
        self.transaction_count += 1;

        tracing::debug!(%payer, %payee, %amount, "Recorded transaction");
        Ok(())
    }

    /// Record a [`Transaction`] value
    pub fn record(&mut self, tx: &Transaction) -> Result<()> {
        self.add_transaction(tx.payer, tx.payee, tx.amount)
    }

    /// Record several transactions, stopping at the first rejection
    ///
    /// Transactions before the rejected one stay applied; each of them is
    /// balanced on its own, so the invariant still holds.
    pub fn record_all<'a>(&mut self, txs: impl IntoIterator<Item = &'a Transaction>) -> Result<()> {
        for tx in txs {
            self.record(tx)?;
        }
        Ok(())
    }

    /// Balance of a single party
    pub fn balance(&self, party: PartyId) -> Result<Decimal> {
        self.check_party(party)?;
        Ok(self.balances[party.index()])
    }

    /// Balance vector, index-aligned with [`PartyId`]
    pub fn balances(&self) -> &[Decimal] {
        &self.balances
    }

    /// Owned copy of the current balances
    pub fn snapshot(&self) -> BalanceSnapshot {
        BalanceSnapshot::from_balances(self.balances.clone())
    }

    /// Number of accepted transactions
    pub fn transaction_count(&self) -> u64 {
        self.transaction_count
    }

    /// Sum of all accepted amounts
    pub fn gross_volume(&self) -> Decimal {
        self.gross_volume
    }

    /// Verify Σ(balances) == 0
    ///
    /// Every partial sum is bounded by `gross_volume`, which is kept
    /// overflow-free, so the checked sum only fails on a corrupted ledger.
    pub fn check_invariant(&self) -> Result<()> {
        match self.snapshot().total() {
            Some(total) if total.is_zero() => Ok(()),
            Some(total) => Err(Error::InvariantViolation(format!(
                "balances sum to {} across {} parties",
                total,
                self.party_count()
            ))),
            None => Err(Error::InvariantViolation(format!(
                "balance sum overflows across {} parties",
                self.party_count()
            ))),
        }
    }

    fn validate(&self, payer: PartyId, payee: PartyId, amount: Decimal) -> Result<()> {
        self.check_party(payer)?;
        self.check_party(payee)?;

        if payer == payee {
            return Err(Error::SelfTransaction { party: payer });
        }

        if amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount { amount });
        }

        Ok(())
    }

    fn check_party(&self, party: PartyId) -> Result<()> {
        if party.index() < self.party_count() {
            Ok(())
        } else {
            Err(Error::InvalidParty {
                party,
                party_count: self.party_count(),
            })
        }
    }
}
