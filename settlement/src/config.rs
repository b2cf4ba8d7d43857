//! Configuration for settlement engine

use serde::{Deserialize, Serialize};

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Netting configuration
    pub netting: NettingConfig,

    /// How the demo binary prints plans
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "cashflow-settle".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            netting: NettingConfig::default(),
            output_format: OutputFormat::default(),
        }
    }
}

/// Plan output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `Person {debtor} pays Person {creditor}: {amount}` line per settlement
    #[default]
    Text,
    /// Whole plan as pretty-printed JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(crate::Error::Config(format!(
                "unknown output format {:?}",
                other
            ))),
        }
    }
}

/// Netting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NettingConfig {
    /// Replay every plan against the source snapshot before returning it
    pub verify_plan: bool,
}

impl Default for NettingConfig {
    fn default() -> Self {
        Self { verify_plan: true }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(verify) = std::env::var("CASHFLOW_VERIFY_PLAN") {
            config.netting.verify_plan = verify.parse().map_err(|_| {
                crate::Error::Config(format!(
                    "CASHFLOW_VERIFY_PLAN must be true or false, got {:?}",
                    verify
                ))
            })?;
        }

        if let Ok(format) = std::env::var("CASHFLOW_OUTPUT") {
            config.output_format = format.parse()?;
        }

        Ok(config)
    }
}
