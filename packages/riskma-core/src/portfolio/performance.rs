//! Portfolio performance insights.

use crate::types::{PortfolioMetrics, RiskBucket, StockPerformance};
use serde::{Deserialize, Serialize};

/// Sector count from which a portfolio counts as well diversified.
pub const DIVERSIFIED_SECTOR_COUNT: usize = 4;

/// Sector diversification assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Diversification {
    Good,
    NeedsImprovement,
}

impl Diversification {
    /// Assess a portfolio spread over `sector_count` sectors.
    pub fn from_sector_count(sector_count: usize) -> Self {
        if sector_count >= DIVERSIFIED_SECTOR_COUNT {
            Diversification::Good
        } else {
            Diversification::NeedsImprovement
        }
    }
}

/// Summary of what stands out in a set of metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInsights {
    /// Position with the highest P&L percentage
    pub best_performer: StockPerformance,
    /// Position with the lowest P&L percentage
    pub worst_performer: StockPerformance,
    /// Number of positions with gains
    pub positions_in_profit: usize,
    /// Number of positions with losses
    pub positions_in_loss: usize,
    /// Number of sectors represented
    pub sector_count: usize,
    pub diversification: Diversification,
    /// Aggregate P&L percentage
    pub pnl_percentage: f64,
    pub risk_bucket: RiskBucket,
}

impl PortfolioInsights {
    /// Derive insights from computed metrics.
    ///
    /// Returns `None` if the metrics hold no positions. Ties keep the first position.
    pub fn from_metrics(metrics: &PortfolioMetrics) -> Option<Self> {
        let stocks = &metrics.stock_performances;
        let first = stocks.first()?;

        let mut best = first;
        let mut worst = first;
        for stock in &stocks[1..] {
            if stock.pnl_percentage > best.pnl_percentage {
                best = stock;
            }
            if stock.pnl_percentage < worst.pnl_percentage {
                worst = stock;
            }
        }

        let positions_in_profit = stocks.iter().filter(|s| s.pnl > 0.0).count();
        let positions_in_loss = stocks.iter().filter(|s| s.pnl < 0.0).count();
        let sector_count = metrics.sector_distribution.len();

        Some(Self {
            best_performer: best.clone(),
            worst_performer: worst.clone(),
            positions_in_profit,
            positions_in_loss,
            sector_count,
            diversification: Diversification::from_sector_count(sector_count),
            pnl_percentage: metrics.pnl_percentage,
            risk_bucket: metrics.risk_bucket,
        })
    }

    /// One-paragraph plain-text analysis.
    pub fn summary(&self) -> String {
        let diversification = match self.diversification {
            Diversification::Good => "good",
            Diversification::NeedsImprovement => "in need of improvement",
        };
        format!(
            "Portfolio return is {:.2}% with a {} risk level. Sector diversification is {} with {} sector{} represented. Consider rebalancing to optimize the risk/return ratio.",
            self.pnl_percentage,
            self.risk_bucket.to_string().to_lowercase(),
            diversification,
            self.sector_count,
            if self.sector_count == 1 { "" } else { "s" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::calculate_portfolio_metrics;
    use crate::types::Position;

    fn metrics_for(positions: &[Position]) -> PortfolioMetrics {
        calculate_portfolio_metrics(positions).unwrap().unwrap()
    }

    #[test]
    fn test_best_and_worst_performer() {
        let metrics = metrics_for(&[
            Position::new("ATW", "ATTIJARIWAFA BANK", 10, 600.0, 680.0).with_sector("Banque"),
            Position::new("ADH", "DOUJA PROM ADDOHA", 100, 50.0, 42.9).with_sector("Immobilier"),
            Position::new("IAM", "MAROC TELECOM", 10, 100.0, 125.0).with_sector("Télécom"),
        ]);
        let insights = PortfolioInsights::from_metrics(&metrics).unwrap();

        assert_eq!(insights.best_performer.symbol, "IAM"); // +25%
        assert_eq!(insights.worst_performer.symbol, "ADH"); // -14.2%
        assert_eq!(insights.positions_in_profit, 2);
        assert_eq!(insights.positions_in_loss, 1);
        assert_eq!(insights.sector_count, 3);
        assert_eq!(insights.diversification, Diversification::NeedsImprovement);
    }

    #[test]
    fn test_ties_keep_first_position() {
        let metrics = metrics_for(&[
            Position::new("A", "A", 1, 10.0, 10.0),
            Position::new("B", "B", 1, 10.0, 10.0),
        ]);
        let insights = PortfolioInsights::from_metrics(&metrics).unwrap();

        assert_eq!(insights.best_performer.symbol, "A");
        assert_eq!(insights.worst_performer.symbol, "A");
        assert_eq!(insights.positions_in_profit, 0);
        assert_eq!(insights.positions_in_loss, 0);
    }

    #[test]
    fn test_diversification_threshold() {
        assert_eq!(Diversification::from_sector_count(3), Diversification::NeedsImprovement);
        assert_eq!(Diversification::from_sector_count(4), Diversification::Good);
    }

    #[test]
    fn test_summary_text() {
        let metrics = metrics_for(&[
            Position::new("IAM", "MAROC TELECOM", 10, 100.0, 125.0).with_sector("Télécom"),
        ]);
        let summary = PortfolioInsights::from_metrics(&metrics).unwrap().summary();

        assert!(summary.contains("25.00%"));
        assert!(summary.contains("high risk level"));
        assert!(summary.contains("1 sector represented"));
    }
}
