use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use currency_exchange::CurrencyCode;
use currency_exchange::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for currency_exchange::AppCommand {
    fn from(cmd: Commands) -> currency_exchange::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                currency_exchange::AppCommand::Convert { amount, from, to }
            }
            Commands::Rate { from, to } => currency_exchange::AppCommand::Rate { from, to },
            Commands::List => currency_exchange::AppCommand::List,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount into one or more currencies
    Convert {
        /// Amount to convert (may be zero or negative)
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Currency code to convert from, e.g. USD
        from: CurrencyCode,
        /// Currency codes to convert to
        #[arg(required = true)]
        to: Vec<CurrencyCode>,
    },
    /// Show the exchange rate between two currencies
    Rate {
        from: CurrencyCode,
        to: CurrencyCode,
    },
    /// List every currency in the current rate table
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => currency_exchange::cli::setup::setup(),
        Some(cmd) => currency_exchange::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::parse_from(["currency-exchange", "convert", "-12.5", "try", "usd", "eur"]);
        match cli.command {
            Some(Commands::Convert { amount, from, to }) => {
                assert_eq!(amount, -12.5);
                assert_eq!(from.as_str(), "TRY");
                assert_eq!(
                    to,
                    vec![CurrencyCode::new("USD"), CurrencyCode::new("EUR")]
                );
            }
            _ => panic!("Expected convert command"),
        }
    }

    #[test]
    fn test_cli_rejects_invalid_code() {
        assert!(Cli::try_parse_from(["currency-exchange", "rate", "U$D", "EUR"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
