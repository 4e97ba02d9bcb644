pub mod cli;
pub mod core;
pub mod providers;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::{RateCache, RateService};

/// Commands the application can execute, decoupled from the clap surface so
/// integration tests can drive the full flow directly.
pub enum AppCommand {
    /// List available currency pairs and the derived currency set.
    Pairs,
    /// Show provider quotes for one pair, e.g. "USD_EUR".
    Rates { pair: String },
    /// Convert an amount between two currencies.
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("RateFinder starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = Arc::new(providers::RestQuoteApi::new(&config.api.base_url));
    let service = RateService::new(source, RateCache::new(), &config.bridge_currency);

    match command {
        AppCommand::Pairs => cli::pairs::run(&service).await,
        AppCommand::Rates { pair } => cli::rates::run(&service, &pair).await,
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&service, &amount, from.as_deref(), to.as_deref()).await
        }
    }
}
