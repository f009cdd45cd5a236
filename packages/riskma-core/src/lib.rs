//! Risk.MA Core - Portfolio metrics library.
//!
//! This crate computes the figures behind a portfolio dashboard for
//! Casablanca Stock Exchange equities:
//!
//! - **Metrics**: total investment, current value, P&L, per-position weights
//! - **Sector distribution**: current value grouped by sector
//! - **Risk bucket**: Low / Moderate / High from a fixed placeholder profile
//! - **Instruments**: the built-in reference table and JSON replacements
//!
//! # Example
//!
//! ```rust
//! use riskma_core::{AnalysisSession, Holding};
//!
//! let mut session = AnalysisSession::with_builtin_instruments();
//! let holdings = vec![Holding::new("IAM", 10).with_buy_price(100.0)];
//!
//! let metrics = session.analyze(&holdings).unwrap().expect("non-empty selection");
//! assert_eq!(metrics.pnl, 250.0);
//! println!("Risk level: {}", metrics.risk_bucket);
//! ```

pub mod config;
pub mod instruments;
pub mod portfolio;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use types::{
    ApiResponse, FinancialRatios, PortfolioMetrics, Position, RiskBucket, SectorAllocation,
    SectorDistribution, StockPerformance, DEFAULT_SECTOR,
};

// Re-export main functionality
pub use config::Config;
pub use instruments::{Instrument, InstrumentTable, CASABLANCA_INSTRUMENTS};
pub use portfolio::{calculate_portfolio_metrics, Diversification, PortfolioInsights, RiskProfile};
pub use session::{AnalysisSession, Holding};

/// Error types for riskma-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid {field} at position {index}: {reason}")]
    Validation {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid holding '{0}', expected SYMBOL:QUANTITY[@BUY_PRICE]")]
    InvalidHolding(String),
}

/// Result type for riskma-core operations.
pub type Result<T> = std::result::Result<T, Error>;
