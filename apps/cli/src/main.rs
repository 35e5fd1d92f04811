//! Arbitrage search - command-line front end
//!
//! Searches local rate snapshots for profitable conversion cycles and
//! compares exchange prices or bookmaker odds for two-market spreads.

mod commands;
mod config;
mod error;
mod input;

use clap::{Parser, Subcommand};
use commands::OpportunitiesResponse;
use config::AppConfig;
use error::CliResult;
use input::QuoteOverride;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Arbitrage search CLI
#[derive(Parser, Debug)]
#[command(name = "arbitrage")]
#[command(about = "Currency cycle and two-market arbitrage search", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long)]
    log_level: Option<String>,

    /// Notional start amount (overrides config)
    #[arg(long)]
    start_amount: Option<f64>,

    /// Number of cycles to return (overrides config)
    #[arg(long)]
    top: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find profitable conversion cycles in a rate snapshot
    Cycles {
        /// JSON rate snapshot: {"USD": 1, ...} or {"conversion_rates": {...}}
        #[arg(short, long)]
        rates: PathBuf,

        /// Override a directed cross rate, e.g. GBP:USD=1.31 (repeatable)
        #[arg(short, long = "quote")]
        quotes: Vec<QuoteOverride>,
    },
    /// Compare exchange prices for each configured or named coin
    Crypto {
        /// JSON map of coin id to exchange prices
        #[arg(short, long)]
        prices: PathBuf,

        /// Coins to scan (defaults to the configured list)
        #[arg(long = "coin")]
        coins: Vec<String>,
    },
    /// Find two-way betting arbitrage across bookmakers
    Sports {
        /// JSON list of match odds
        #[arg(short, long)]
        odds: PathBuf,
    },
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn print_json<T: Serialize>(opportunities: Vec<T>) -> CliResult<()> {
    let body = OpportunitiesResponse { opportunities };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn run(args: Args, mut config: AppConfig) -> CliResult<()> {
    if let Some(start_amount) = args.start_amount {
        config.search.start_amount = start_amount;
    }
    if let Some(top) = args.top {
        config.search.top_n = top;
    }
    config.validate()?;

    match args.command {
        Command::Cycles { rates, quotes } => {
            print_json(commands::run_cycles(&config, &rates, &quotes)?)
        }
        Command::Crypto { prices, coins } => {
            print_json(commands::run_crypto(&config, &prices, &coins).await?)
        }
        Command::Sports { odds } => print_json(commands::run_sports(&config, &odds)?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let loaded = AppConfig::load(&args.config);

    let configured_level = match &loaded {
        Ok(Some(config)) => Some(config.log_level.clone()),
        _ => None,
    };
    let level = args
        .log_level
        .clone()
        .or(configured_level)
        .unwrap_or_else(|| "info".to_string());
    init_logging(&level);

    let config = match loaded {
        Ok(Some(config)) => config,
        Ok(None) => {
            info!("No config file at {}, using defaults", args.config.display());
            AppConfig::default()
        }
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
