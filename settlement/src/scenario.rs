//! Transaction scenarios
//!
//! A scenario is a party count plus the IOUs recorded among them, loaded
//! from TOML:
//!
//! ```toml
//! party_count = 3
//!
//! [[transactions]]
//! payer = 0
//! payee = 1
//! amount = "1500"
//! ```

use crate::Result;
use ledger_core::{Ledger, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Party count and transactions to record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Number of parties
    pub party_count: usize,

    /// IOUs in recording order
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Scenario {
    /// Three parties, three IOUs
    pub fn sample() -> Self {
        Self {
            party_count: 3,
            transactions: vec![
                Transaction::new(0, 1, Decimal::new(1500, 0)),
                Transaction::new(1, 2, Decimal::new(2500, 0)),
                Transaction::new(0, 2, Decimal::new(2000, 0)),
            ],
        }
    }

    /// Load from TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse scenario: {}", e)))
    }

    /// Record every transaction into a fresh ledger
    pub fn build_ledger(&self) -> Result<Ledger> {
        let mut ledger = Ledger::new(self.party_count);
        ledger.record_all(&self.transactions)?;
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::PartyId;

    #[test]
    fn test_sample_balances() {
        let ledger = Scenario::sample().build_ledger().unwrap();
        assert_eq!(
            ledger.balances(),
            &[
                Decimal::new(-3500, 0),
                Decimal::new(1000, 0),
                Decimal::new(2500, 0)
            ]
        );
    }

    #[test]
    fn test_parse_toml() {
        let scenario = Scenario::from_toml(
            r#"
party_count = 2

[[transactions]]
payer = 0
payee = 1
amount = "12.50"

[[transactions]]
payer = 1
payee = 0
amount = 2
"#,
        )
        .unwrap();

        assert_eq!(scenario.party_count, 2);
        assert_eq!(scenario.transactions.len(), 2);
        assert_eq!(scenario.transactions[0].amount, Decimal::new(1250, 2));
        assert_eq!(scenario.transactions[1].payer, PartyId::new(1));

        let ledger = scenario.build_ledger().unwrap();
        assert_eq!(ledger.balance(PartyId::new(1)).unwrap(), Decimal::new(1050, 2));
    }

    #[test]
    fn test_no_transactions() {
        let scenario = Scenario::from_toml("party_count = 4").unwrap();
        assert!(scenario.transactions.is_empty());
        assert_eq!(scenario.build_ledger().unwrap().party_count(), 4);
    }

    #[test]
    fn test_invalid_transaction_propagates() {
        let scenario = Scenario::from_toml(
            r#"
party_count = 2

[[transactions]]
payer = 0
payee = 5
amount = "1"
"#,
        )
        .unwrap();

        let err = scenario.build_ledger().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Ledger(ledger_core::Error::InvalidParty { .. })
        ));
    }

    #[test]
    fn test_missing_party_count() {
        assert!(Scenario::from_toml("[[transactions]]\npayer = 0\npayee = 1\namount = 1").is_err());
    }
}
