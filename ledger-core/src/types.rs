//! Core types for the ledger
//!
//! All types are designed for:
//! - Exact arithmetic (Decimal for money)
//! - Deterministic ordering (parties compare by index)
//! - Serde support for scenario files and reports

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Party identifier (index in `[0, N)`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PartyId(usize);

impl PartyId {
    /// Create new party ID
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get as index into the balance vector
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for PartyId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// IOU between two parties: `payer` owes `payee` `amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Party whose balance decreases
    pub payer: PartyId,

    /// Party whose balance increases
    pub payee: PartyId,

    /// Amount moved (must be positive)
    pub amount: Decimal,
}

impl Transaction {
    /// Create new transaction between two party indices
    pub fn new(payer: usize, payee: usize, amount: Decimal) -> Self {
        Self {
            payer: PartyId::new(payer),
            payee: PartyId::new(payee),
            amount,
        }
    }
}

/// Point-in-time copy of the net balance vector
///
/// Positive entries are creditors (owed money), negative entries are
/// debtors. Snapshots taken from a [`crate::Ledger`] always sum to zero;
/// snapshots built with [`BalanceSnapshot::from_balances`] may not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    balances: Vec<Decimal>,
}

impl BalanceSnapshot {
    /// Wrap an externally produced balance vector
    pub fn from_balances(balances: Vec<Decimal>) -> Self {
        Self { balances }
    }

    /// Number of parties
    pub fn party_count(&self) -> usize {
        self.balances.len()
    }

    /// Balance of a single party, `None` when out of range
    pub fn balance(&self, party: PartyId) -> Option<Decimal> {
        self.balances.get(party.index()).copied()
    }

    /// Raw balance vector, index-aligned with [`PartyId`]
    pub fn as_slice(&self) -> &[Decimal] {
        &self.balances
    }

    /// Sum of all balances, `None` if it overflows
    ///
    /// Only injected snapshots can overflow; ledger snapshots are bounded
    /// by the ledger's gross volume.
    pub fn total(&self) -> Option<Decimal> {
        self.balances
            .iter()
            .try_fold(Decimal::ZERO, |acc, b| acc.checked_add(*b))
    }

    /// True when the zero-sum invariant holds
    pub fn is_balanced(&self) -> bool {
        matches!(self.total(), Some(total) if total.is_zero())
    }

    /// Count of parties with a non-zero balance
    pub fn non_zero_count(&self) -> usize {
        self.balances.iter().filter(|b| !b.is_zero()).count()
    }

    /// Iterate `(party, balance)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (PartyId, Decimal)> + '_ {
        self.balances
            .iter()
            .enumerate()
            .map(|(i, b)| (PartyId::new(i), *b))
    }
}
