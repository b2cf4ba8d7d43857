//! Cashflow Ledger Core
//!
//! Accumulates IOUs between a fixed set of parties into one net balance
//! per party.
//!
//! # Architecture
//!
//! - **Net Balances**: Every transaction is folded into the balance vector
//!   immediately; no history is persisted
//! - **Boundary Validation**: Party indices, self-transactions and amounts
//!   are checked before any balance is touched
//! - **Single Writer**: [`SharedLedger`] serializes writers behind a lock so
//!   readers only ever see whole transactions
//!
//! # Invariants
//!
//! - Zero-sum: Σ(balances) == 0 after every accepted transaction
//! - Order independence: the same multiset of transactions yields the same
//!   balance vector regardless of recording order

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod ledger;
pub mod shared;
pub mod error;

// Re-exports
pub use error::{Error, Result};
pub use types::{BalanceSnapshot, PartyId, Transaction};
pub use ledger::Ledger;
pub use shared::SharedLedger;
