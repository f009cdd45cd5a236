//! Risk.MA CLI - Command line interface for portfolio analysis.
//!
//! Prints JSON responses for consumption by a dashboard front-end. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use riskma_core::{
    calculate_portfolio_metrics, AnalysisSession, ApiResponse, Config, Holding, InstrumentTable,
    PortfolioInsights, PortfolioMetrics, Position, RiskProfile,
};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "riskma")]
#[command(about = "Risk.MA CLI - portfolio valuation and risk overview")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to $RISKMA_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List instruments available for selection
    Instruments {
        /// Only show instruments in this sector
        #[arg(short, long)]
        sector: Option<String>,
    },
    /// Analyze a portfolio
    Analyze {
        /// Holding as SYMBOL:QUANTITY[@BUY_PRICE], repeatable
        #[arg(short = 'H', long = "holding")]
        holdings: Vec<Holding>,
        /// JSON file with a list of positions (bypasses the instrument table)
        #[arg(short, long, conflicts_with = "holdings")]
        file: Option<PathBuf>,
    },
    /// Show the risk profile used for the risk bucket
    Risk,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = match cli.command {
        Commands::Instruments { sector } => handle_instruments(&config, sector.as_deref())?,
        Commands::Analyze { holdings, file } => handle_analyze(&config, holdings, file.as_deref())?,
        Commands::Risk => handle_risk()?,
    };

    println!("{}", output);
    Ok(())
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

fn handle_instruments(config: &Config, sector: Option<&str>) -> Result<String> {
    let table = match config.instrument_table() {
        Ok(table) => table,
        Err(e) => return to_json(&ApiResponse::<()>::err(e.to_string())),
    };

    let instruments: Vec<_> = match sector {
        Some(sector) => table.by_sector(sector).collect(),
        None => table.iter().collect(),
    };

    to_json(&ApiResponse::ok(json!({
        "instruments": instruments,
        "sectors": table.sectors(),
        "currency": config.currency,
    })))
}

fn handle_analyze(config: &Config, holdings: Vec<Holding>, file: Option<&Path>) -> Result<String> {
    let result = match file {
        Some(path) => analyze_file(path),
        None => analyze_holdings(config, &holdings),
    };

    match result {
        Ok(Some(metrics)) => {
            tracing::info!(
                positions = metrics.position_count(),
                risk = %metrics.risk_bucket,
                "Portfolio analyzed"
            );
            let insights = PortfolioInsights::from_metrics(&metrics);
            let summary = insights.as_ref().map(PortfolioInsights::summary);
            to_json(&ApiResponse::ok(json!({
                "metrics": metrics,
                "insights": insights,
                "summary": summary,
                "currency": config.currency,
            })))
        }
        Ok(None) => to_json(&ApiResponse::<()>::err(
            "Add at least one position to the portfolio.",
        )),
        Err(e) => {
            tracing::warn!("Analysis failed: {}", e);
            to_json(&ApiResponse::<()>::err(e.to_string()))
        }
    }
}

fn analyze_file(path: &Path) -> riskma_core::Result<Option<PortfolioMetrics>> {
    let content = fs::read_to_string(path)?;
    let positions: Vec<Position> = serde_json::from_str(&content)?;
    calculate_portfolio_metrics(&positions)
}

fn analyze_holdings(
    config: &Config,
    holdings: &[Holding],
) -> riskma_core::Result<Option<PortfolioMetrics>> {
    let table: InstrumentTable = config.instrument_table()?;
    let mut session = AnalysisSession::new(table);
    Ok(session.analyze(holdings)?.cloned())
}

fn handle_risk() -> Result<String> {
    let profile = RiskProfile::PLACEHOLDER;
    to_json(&ApiResponse::ok(json!({
        "profile": profile,
        "risk_score": profile.risk_score(),
        "risk_bucket": profile.bucket(),
    })))
}
