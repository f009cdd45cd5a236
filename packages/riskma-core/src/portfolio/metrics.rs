//! Portfolio metrics calculation.

use super::risk::RiskProfile;
use crate::types::{PortfolioMetrics, Position, SectorDistribution, StockPerformance};
use crate::{Error, Result};

/// Calculate aggregate metrics for a list of positions.
///
/// Returns `Ok(None)` when `positions` is empty: there is nothing to compute.
/// Percentages and weights whose denominator is zero are reported as `0.0`.
///
/// # Errors
///
/// Returns [`Error::Validation`] for the first position with a negative
/// quantity or a negative or non-finite price.
///
/// # Example
///
/// ```
/// use riskma_core::{calculate_portfolio_metrics, Position};
///
/// let positions = vec![Position::new("IAM", "MAROC TELECOM", 10, 100.0, 125.0).with_sector("Télécom")];
/// let metrics = calculate_portfolio_metrics(&positions).unwrap().unwrap();
///
/// assert_eq!(metrics.current_value, 1250.0);
/// assert_eq!(metrics.pnl_percentage, 25.0);
/// ```
pub fn calculate_portfolio_metrics(positions: &[Position]) -> Result<Option<PortfolioMetrics>> {
    if positions.is_empty() {
        return Ok(None);
    }

    validate_positions(positions)?;

    let mut stock_performances: Vec<StockPerformance> = positions
        .iter()
        .map(|p| {
            let value = p.value();
            let investment = p.investment();
            let pnl = value - investment;
            StockPerformance {
                symbol: p.symbol.clone(),
                name: p.name.clone(),
                sector: p.sector_key().to_string(),
                quantity: p.quantity,
                current_price: p.current_price,
                value,
                investment,
                pnl,
                pnl_percentage: percentage(pnl, investment),
                weight: 0.0,
            }
        })
        .collect();

    let total_investment: f64 = stock_performances.iter().map(|s| s.investment).sum();
    let current_value: f64 = stock_performances.iter().map(|s| s.value).sum();
    let pnl = current_value - total_investment;
    let pnl_percentage = percentage(pnl, total_investment);

    let mut sector_distribution = SectorDistribution::new();
    for stock in &mut stock_performances {
        stock.weight = percentage(stock.value, current_value);
        sector_distribution.add(&stock.sector, stock.value);
    }
    sector_distribution.set_percentages(current_value);

    let profile = RiskProfile::PLACEHOLDER;

    tracing::debug!(
        positions = positions.len(),
        sectors = sector_distribution.len(),
        total_investment,
        current_value,
        "Calculated portfolio metrics"
    );

    Ok(Some(PortfolioMetrics {
        total_investment,
        current_value,
        pnl,
        pnl_percentage,
        stock_performances,
        sector_distribution,
        risk_bucket: profile.bucket(),
        ratios: profile.ratios(pnl_percentage),
    }))
}

/// Check every position's numeric fields.
///
/// Quantity must be non-negative; prices must be finite and non-negative.
pub fn validate_positions(positions: &[Position]) -> Result<()> {
    for (index, position) in positions.iter().enumerate() {
        if position.quantity < 0 {
            return Err(Error::Validation {
                index,
                field: "quantity",
                reason: format!("must be non-negative, got {}", position.quantity),
            });
        }
        check_price(index, "buy_price", position.buy_price)?;
        check_price(index, "current_price", position.current_price)?;
    }
    Ok(())
}

fn check_price(index: usize, field: &'static str, price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::Validation {
            index,
            field,
            reason: format!("must be a finite non-negative number, got {}", price),
        });
    }
    Ok(())
}

/// `part / whole * 100`, or 0 when `whole` is not positive.
fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
