use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratefinder::core::log::init_logging;

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

impl From<Commands> for ratefinder::AppCommand {
    fn from(cmd: Commands) -> ratefinder::AppCommand {
        match cmd {
            Commands::Pairs => ratefinder::AppCommand::Pairs,
            Commands::Rates { pair } => ratefinder::AppCommand::Rates { pair },
            Commands::Convert { amount, from, to } => {
                ratefinder::AppCommand::Convert { amount, from, to }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List available currency pairs
    Pairs,
    /// Show provider rates for a currency pair (e.g. USD_EUR)
    Rates {
        /// Currency pair key, format BASE_QUOTE
        pair: String,
    },
    /// Convert an amount between currencies
    Convert {
        /// Amount to convert
        amount: String,
        /// Source currency code (defaults to the first available currency)
        from: Option<String>,
        /// Target currency code (defaults to the second available currency)
        to: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ratefinder::cli::setup::setup(),
        Some(cmd) => ratefinder::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
