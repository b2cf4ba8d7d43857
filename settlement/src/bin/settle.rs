//! Cashflow settlement demo binary
//!
//! Usage: `cashflow-settle [scenario.toml]`
//!
//! Without a scenario the built-in three-party sample is settled.

use anyhow::Context;
use settlement::{config::OutputFormat, Config, Scenario, SettlementEngine};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::var("CASHFLOW_CONFIG") {
        Ok(path) => Config::from_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        Err(_) => Config::from_env()?,
    };

    tracing::info!(
        "Starting {} v{}",
        config.service_name,
        config.service_version
    );

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::from_file(&path)
            .with_context(|| format!("loading scenario from {}", path))?,
        None => Scenario::sample(),
    };

    let ledger = scenario
        .build_ledger()
        .context("recording scenario transactions")?;
    tracing::info!(
        parties = ledger.party_count(),
        transactions = ledger.transaction_count(),
        "Ledger built"
    );

    let output_format = config.output_format;
    let engine = SettlementEngine::new(config);
    let plan = engine.run(&ledger)?;

    match output_format {
        OutputFormat::Text => {
            println!("Optimized Transactions:");
            for settlement in &plan.settlements {
                println!("{}", settlement);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }

    Ok(())
}
