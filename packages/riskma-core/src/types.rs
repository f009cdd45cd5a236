//! Core data types for portfolio metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sector key used when a position carries no classification.
pub const DEFAULT_SECTOR: &str = "Other";

/// A held instrument as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// Instrument ticker symbol
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Number of units held
    pub quantity: i64,
    /// Acquisition price per unit
    pub buy_price: f64,
    /// Latest known price per unit
    pub current_price: f64,
    /// Industry classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl Position {
    /// Create a new position without a sector.
    pub fn new(symbol: &str, name: &str, quantity: i64, buy_price: f64, current_price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            quantity,
            buy_price,
            current_price,
            sector: None,
        }
    }

    /// Set the sector classification.
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sector key for aggregation, falling back to [`DEFAULT_SECTOR`].
    pub fn sector_key(&self) -> &str {
        match self.sector.as_deref() {
            Some(sector) if !sector.trim().is_empty() => sector,
            _ => DEFAULT_SECTOR,
        }
    }

    /// Cost of the position (quantity * buy price).
    pub fn investment(&self) -> f64 {
        self.quantity as f64 * self.buy_price
    }

    /// Market value of the position (quantity * current price).
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.current_price
    }
}

/// Per-position performance derived from a [`Position`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockPerformance {
    pub symbol: String,
    pub name: String,
    /// Resolved sector (never empty)
    pub sector: String,
    pub quantity: i64,
    pub current_price: f64,
    /// quantity * current_price
    pub value: f64,
    /// quantity * buy_price
    pub investment: f64,
    /// value - investment
    pub pnl: f64,
    /// pnl / investment * 100, 0 when nothing was invested
    pub pnl_percentage: f64,
    /// Share of total portfolio value in percent, 0 when the portfolio is worthless
    pub weight: f64,
}

/// Value held in a single sector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectorAllocation {
    pub sector: String,
    /// Summed current value of the sector's positions
    pub value: f64,
    /// Share of total portfolio value in percent
    pub percentage: f64,
}

/// Current value grouped by sector, in first-seen order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct SectorDistribution(Vec<SectorAllocation>);

impl SectorDistribution {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add value to a sector, appending the sector if it has not been seen yet.
    pub fn add(&mut self, sector: &str, value: f64) {
        match self.0.iter_mut().find(|a| a.sector == sector) {
            Some(allocation) => allocation.value += value,
            None => self.0.push(SectorAllocation {
                sector: sector.to_string(),
                value,
                percentage: 0.0,
            }),
        }
    }

    /// Recompute every sector's percentage against `total_value`.
    pub(crate) fn set_percentages(&mut self, total_value: f64) {
        for allocation in &mut self.0 {
            allocation.percentage = if total_value > 0.0 {
                allocation.value / total_value * 100.0
            } else {
                0.0
            };
        }
    }

    /// Value held in `sector`, if present.
    pub fn get(&self, sector: &str) -> Option<f64> {
        self.0.iter().find(|a| a.sector == sector).map(|a| a.value)
    }

    /// Iterate allocations in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &SectorAllocation> {
        self.0.iter()
    }

    /// Sector names in first-seen order.
    pub fn sectors(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|a| a.sector.as_str())
    }

    /// Number of distinct sectors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all sector values.
    pub fn total(&self) -> f64 {
        self.0.iter().map(|a| a.value).sum()
    }
}

/// Coarse qualitative risk label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskBucket {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskBucket::Low => "Low",
            RiskBucket::Moderate => "Moderate",
            RiskBucket::High => "High",
        };
        f.write_str(label)
    }
}

/// Headline ratios reported next to the risk bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialRatios {
    pub sharpe_ratio: f64,
    pub beta: f64,
    /// Annualized volatility percentage
    pub volatility_percent: f64,
    /// Current P&L percentage reported as the annual return
    pub annual_return_percent: f64,
    /// beta * volatility_percent / 10
    pub risk_score: f64,
}

/// Aggregate metrics for one calculation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioMetrics {
    /// Sum of all position investments
    pub total_investment: f64,
    /// Sum of all position values
    pub current_value: f64,
    /// current_value - total_investment
    pub pnl: f64,
    /// pnl / total_investment * 100, 0 when nothing was invested
    pub pnl_percentage: f64,
    /// One entry per input position, in input order
    pub stock_performances: Vec<StockPerformance>,
    pub sector_distribution: SectorDistribution,
    pub risk_bucket: RiskBucket,
    pub ratios: FinancialRatios,
}

impl PortfolioMetrics {
    /// Get the number of positions.
    pub fn position_count(&self) -> usize {
        self.stock_performances.len()
    }

    /// Find a position's performance by symbol.
    pub fn find(&self, symbol: &str) -> Option<&StockPerformance> {
        self.stock_performances
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
    }
}

/// API response wrapper for success cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_investment_and_value() {
        let pos = Position::new("IAM", "MAROC TELECOM", 10, 100.0, 125.0);
        assert_eq!(pos.investment(), 1000.0);
        assert_eq!(pos.value(), 1250.0);
    }

    #[test]
    fn test_sector_key_defaults() {
        let pos = Position::new("IAM", "MAROC TELECOM", 1, 1.0, 1.0);
        assert_eq!(pos.sector_key(), DEFAULT_SECTOR);

        let pos = pos.with_sector("");
        assert_eq!(pos.sector_key(), DEFAULT_SECTOR);

        let pos = pos.with_sector("Télécom");
        assert_eq!(pos.sector_key(), "Télécom");
    }

    #[test]
    fn test_position_deserialize_without_sector() {
        let json = r#"{"symbol":"ATW","name":"ATTIJARIWAFA BANK","quantity":3,"buy_price":600.0,"current_price":680.0}"#;
        let pos: Position = serde_json::from_str(json).unwrap();
        assert!(pos.sector.is_none());
        assert_eq!(pos.quantity, 3);
    }

    #[test]
    fn test_sector_distribution_keeps_first_seen_order() {
        let mut dist = SectorDistribution::new();
        dist.add("Banque", 100.0);
        dist.add("Immobilier", 50.0);
        dist.add("Banque", 25.0);

        let sectors: Vec<_> = dist.sectors().collect();
        assert_eq!(sectors, vec!["Banque", "Immobilier"]);
        assert_eq!(dist.get("Banque"), Some(125.0));
        assert_eq!(dist.total(), 175.0);
        assert_eq!(dist.len(), 2);
    }

    #[test]
    fn test_sector_distribution_serializes_as_list() {
        let mut dist = SectorDistribution::new();
        dist.add("Mines", 10.0);
        dist.set_percentages(10.0);

        let json = serde_json::to_value(&dist).unwrap();
        assert_eq!(json[0]["sector"], "Mines");
        assert_eq!(json[0]["percentage"], 100.0);
    }

    #[test]
    fn test_risk_bucket_display_and_serde() {
        assert_eq!(RiskBucket::Moderate.to_string(), "Moderate");
        assert_eq!(serde_json::to_string(&RiskBucket::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }
}
