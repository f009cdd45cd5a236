//! Portfolio analytics.
//!
//! Provides the metrics calculator, the placeholder risk profile and
//! post-analysis insights.

mod metrics;
mod performance;
mod risk;

pub use metrics::{calculate_portfolio_metrics, validate_positions};
pub use performance::{Diversification, PortfolioInsights, DIVERSIFIED_SECTOR_COUNT};
pub use risk::{RiskProfile, HIGH_RISK_THRESHOLD, LOW_RISK_THRESHOLD};
