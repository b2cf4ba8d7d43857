//! Settlement Engine
//!
//! Reduces a group's pairwise IOUs to a short list of settling payments.
//!
//! # Architecture
//!
//! 1. **Recording**: Transactions are folded into net balances by
//!    [`ledger_core::Ledger`]
//! 2. **Snapshot**: One consistent copy of the balances is taken
//! 3. **Netting**: The largest creditor is matched with the largest debtor
//!    until every balance is zero
//! 4. **Verification**: The plan is replayed against the snapshot
//!
//! # Netting Algorithm
//!
//! Greedy largest-extremes-first matching over two max-heaps:
//! - At most `k - 1` settlements for `k` non-zero balances
//! - `O(k log k)` time
//! - Not guaranteed to reach the absolute minimum transfer count, which
//!   would need an exponential subset search
//!
//! # Example
//!
//! ```
//! use ledger_core::{Ledger, PartyId};
//! use rust_decimal::Decimal;
//! use settlement::{Config, SettlementEngine};
//!
//! let mut ledger = Ledger::new(2);
//! ledger.add_transaction(PartyId::new(0), PartyId::new(1), Decimal::new(100, 0))?;
//!
//! let engine = SettlementEngine::new(Config::default());
//! let plan = engine.run(&ledger)?;
//! assert_eq!(plan.settlements.len(), 1);
//! # Ok::<(), settlement::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod netting;
pub mod scenario;
pub mod error;
pub mod config;
pub mod engine;

// Re-exports
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::SettlementEngine;
pub use netting::NettingEngine;
pub use scenario::Scenario;
