//! search-reverser CLI
//!
//! Runs the connectivity probe and the adaptive suite against a search
//! endpoint, then prints the analysis report.

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_reverser::{
    AdaptiveStrategy, BehaviorProfile, HttpCollector, ProbeConfig, ResultAnalyzer,
    ReverseEngineer, SearchBackend,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "search-reverser")]
#[command(about = "Infer how an opaque search endpoint ranks and matches")]
struct Cli {
    /// Search URL, including the `/search` path (overrides SEARCH_REVERSER_TARGET)
    #[arg(long, global = true)]
    target: Option<String>,

    /// Delay after each request in milliseconds (overrides SEARCH_REVERSER_PACING_MS)
    #[arg(long, global = true)]
    pacing_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the adaptive test suite and print the analysis report
    Run {
        /// RNG seed for a replayable run
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Issue the fixed baseline probes
    Baseline,

    /// Run a single query and print its characteristics
    Query { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,search_reverser=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();

    let mut config = ProbeConfig::from_env().context("Failed to load configuration")?;
    if let Some(target) = cli.target {
        config = config.with_target(target);
    }
    if let Some(pacing) = cli.pacing_ms {
        config = config.with_pacing(pacing);
    }

    match cli.command {
        Commands::Run { seed, json } => {
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            run(&config, json).await
        }
        Commands::Baseline => baseline(&config).await,
        Commands::Query { query } => single_query(&config, &query).await,
    }
}

fn engine(config: &ProbeConfig) -> Result<ReverseEngineer<HttpCollector>> {
    let collector = HttpCollector::from_config(config)
        .with_context(|| format!("Invalid target {}", config.target))?;
    Ok(ReverseEngineer::with_strategy(
        collector,
        AdaptiveStrategy::from_config(config),
    ))
}

async fn run(config: &ProbeConfig, json: bool) -> Result<()> {
    let mut engine = engine(config)?;
    engine
        .check_connection()
        .await
        .context("Cannot proceed with analysis - server not accessible")?;

    tracing::info!("Starting comprehensive search algorithm analysis...");
    let report = engine.run_test_suite().await?;
    let behaviors = BehaviorProfile::from_report(&report);

    if json {
        let output = serde_json::json!({
            "report": report,
            "behaviors": behaviors,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report::render(&report, &behaviors));
    }
    Ok(())
}

async fn baseline(config: &ProbeConfig) -> Result<()> {
    let mut engine = engine(config)?;
    engine
        .check_connection()
        .await
        .context("Cannot proceed with baseline - server not accessible")?;

    let samples = engine.run_baseline().await?;
    print!("{}", report::render_baseline(&samples));
    Ok(())
}

async fn single_query(config: &ProbeConfig, query: &str) -> Result<()> {
    let collector = HttpCollector::from_config(config)?;
    let response = collector.search(query).await?;
    let characteristics = ResultAnalyzer::new().analyze_results(&response.hits);
    print!(
        "{}",
        report::render_query(query, &response.hits, &characteristics, response.elapsed)
    );
    Ok(())
}
