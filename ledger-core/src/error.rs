//! Error types for the ledger

use crate::types::PartyId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
///
/// All variants are precondition failures at the ledger boundary. None of
/// them is transient, so callers should not retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Payer or payee outside `[0, party_count)`
    #[error("Invalid party: {party} (ledger has {party_count} parties)")]
    InvalidParty {
        /// Offending index
        party: PartyId,
        /// Number of parties the ledger was created with
        party_count: usize,
    },

    /// Payer and payee are the same party
    #[error("Self transaction rejected for party {party}")]
    SelfTransaction {
        /// Party on both sides
        party: PartyId,
    },

    /// Amount is zero or negative
    #[error("Non-positive amount: {amount}")]
    NonPositiveAmount {
        /// Rejected amount
        amount: Decimal,
    },

    /// Applying the amount would overflow a balance or the gross volume
    #[error("Amount overflow: {amount} from {payer} to {payee}")]
    AmountOverflow {
        /// Party that would be debited
        payer: PartyId,
        /// Party that would be credited
        payee: PartyId,
        /// Rejected amount
        amount: Decimal,
    },

    /// Invariant violation (zero-sum, etc.)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
