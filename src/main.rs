use clap::{Parser, Subcommand};
use configuration::load_config;
use core_types::{AssetClass, Interval, PriceRange};
use indicatif::{ProgressBar, ProgressStyle};
use orchestrator::{BatchError, BatchOrchestrator, BatchRequest};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

mod render;
mod telemetry;

/// The main entry point for the Prism analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; it only carries PRISM__* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let _log_guard = telemetry::init(&config.logging)?;
    tracing::debug!(config = %cli.config.display(), "Configuration loaded.");

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, &config).await,
        Commands::Serve(args) => {
            let addr = args.addr.unwrap_or(config.server.addr);
            web_server::run_server(&config, addr).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Cross-asset risk/return analytics for stocks and crypto.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a batch of symbols and print their metrics and cross-asset statistics.
    Analyze(AnalyzeArgs),
    /// Run the HTTP API.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Which provider and engine parameters to use.
    #[arg(long, value_enum)]
    asset_class: AssetClass,

    /// Comma-separated tickers (e.g. "AAPL,MSFT" or "BTC,ETH").
    #[arg(long, value_delimiter = ',', required = true)]
    symbols: Vec<String>,

    /// Lookback window. Defaults to the asset class's configured range.
    #[arg(long, value_enum)]
    range: Option<PriceRange>,

    /// Print the raw result as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address. Overrides `[server] addr`.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

async fn handle_analyze(args: AnalyzeArgs, config: &configuration::Config) -> anyhow::Result<()> {
    let range = args
        .range
        .unwrap_or(config.asset_class(args.asset_class).default_range);
    let request = BatchRequest::new(&args.symbols, range, Interval::Daily)?;
    let orchestrator = BatchOrchestrator::for_asset_class(config, args.asset_class)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed}] {msg}")?);
    spinner.set_message(format!(
        "Fetching {} symbol(s) from {}...",
        request.symbols().len(),
        orchestrator.source_name()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = orchestrator.run(&request).await;
    spinner.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(BatchError::AggregateFailure { failures }) => {
            eprintln!("No data could be fetched for any of the requested symbols:");
            render::print_failures(&failures);
            anyhow::bail!("all {} symbol(s) failed", failures.len());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render::print_batch(&result);
    }
    Ok(())
}
