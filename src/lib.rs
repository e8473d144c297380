#![doc = include_str!("../README.md")]

pub mod cli;
pub mod core;
pub mod providers;
pub mod resolver;
pub mod store;

pub use crate::core::{CurrencyCode, ExchangeError};
pub use crate::resolver::RateResolver;

use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: f64,
        from: CurrencyCode,
        to: Vec<CurrencyCode>,
    },
    Rate {
        from: CurrencyCode,
        to: CurrencyCode,
    },
    List,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency exchange starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let resolver =
        RateResolver::new(config.resolver.clone()).context("Failed to create rate resolver")?;
    let precision = config.precision;

    let output = match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::convert(&resolver, amount, &from, &to, precision).await?
        }
        AppCommand::Rate { from, to } => cli::rate::rate(&resolver, &from, &to, precision).await?,
        AppCommand::List => cli::list::list(&resolver, precision).await?,
    };

    println!("{output}");
    Ok(())
}
