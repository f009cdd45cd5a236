//! Risk profile and risk bucket derivation.
//!
//! The ratios here are fixed placeholders. They are not estimated from the
//! positions and stand in for a future model built on historical returns.

use crate::types::{FinancialRatios, RiskBucket};
use serde::{Deserialize, Serialize};

/// Scores below this are [`RiskBucket::Low`].
pub const LOW_RISK_THRESHOLD: f64 = 0.5;

/// Scores at or above this are [`RiskBucket::High`].
pub const HIGH_RISK_THRESHOLD: f64 = 1.0;

/// Headline risk inputs for a portfolio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskProfile {
    /// Sensitivity to the market
    pub beta: f64,
    /// Annualized volatility percentage (15.0 for 15%)
    pub volatility_percent: f64,
    /// Annualized Sharpe ratio
    pub sharpe_ratio: f64,
}

impl RiskProfile {
    /// Constants reported for every portfolio.
    pub const PLACEHOLDER: RiskProfile = RiskProfile {
        beta: 0.8,
        volatility_percent: 15.0,
        sharpe_ratio: 1.2,
    };

    /// Risk score: `beta * volatility_percent / 10`.
    pub fn risk_score(&self) -> f64 {
        self.beta * self.volatility_percent / 10.0
    }

    /// Bucket for this profile's score.
    pub fn bucket(&self) -> RiskBucket {
        RiskBucket::from_score(self.risk_score())
    }

    /// Ratios block for a portfolio returning `pnl_percentage`.
    pub fn ratios(&self, pnl_percentage: f64) -> FinancialRatios {
        FinancialRatios {
            sharpe_ratio: self.sharpe_ratio,
            beta: self.beta,
            volatility_percent: self.volatility_percent,
            annual_return_percent: pnl_percentage,
            risk_score: self.risk_score(),
        }
    }
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self::PLACEHOLDER
    }
}

impl RiskBucket {
    /// Map a risk score onto a bucket.
    ///
    /// `< 0.5` is Low, `[0.5, 1.0)` is Moderate and `>= 1.0` is High.
    pub fn from_score(score: f64) -> Self {
        if score < LOW_RISK_THRESHOLD {
            RiskBucket::Low
        } else if score < HIGH_RISK_THRESHOLD {
            RiskBucket::Moderate
        } else {
            RiskBucket::High
        }
    }
}
