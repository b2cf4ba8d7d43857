//! Error types for settlement engine

use ledger_core::PartyId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
#[derive(Error, Debug)]
pub enum Error {
    /// Ledger error
    #[error("Ledger error: {0}")]
    Ledger(#[from] ledger_core::Error),

    /// Balances did not sum to zero; one side emptied with entries left on
    /// the other. Integrity failure, not a user error.
    #[error("Unbalanced state: {} parties left with residual balance", residual.len())]
    UnbalancedState {
        /// Parties still holding a non-zero balance after matching stopped
        residual: Vec<(PartyId, Decimal)>,
    },

    /// Plan totals do not fit in a `Decimal`
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Settlement plan failed replay verification
    #[error("Verification failed: {0}")]
    Verification(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
