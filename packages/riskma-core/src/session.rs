//! Request-scoped analysis state.
//!
//! An [`AnalysisSession`] owns the instrument table a front-end selects from
//! and the result of its last analysis. Nothing is shared between sessions.

use crate::instruments::InstrumentTable;
use crate::portfolio::calculate_portfolio_metrics;
use crate::types::{PortfolioMetrics, Position};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A user selection of an instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    /// Instrument symbol
    pub symbol: String,
    /// Number of units held
    pub quantity: i64,
    /// Acquisition price per unit; defaults to the instrument's reference price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<f64>,
}

impl Holding {
    pub fn new(symbol: &str, quantity: i64) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            quantity,
            buy_price: None,
        }
    }

    pub fn with_buy_price(mut self, buy_price: f64) -> Self {
        self.buy_price = Some(buy_price);
        self
    }
}

/// Parses `SYMBOL:QUANTITY` or `SYMBOL:QUANTITY@BUY_PRICE`.
impl FromStr for Holding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidHolding(s.to_string());

        let (symbol, rest) = s.split_once(':').ok_or_else(invalid)?;
        if symbol.trim().is_empty() {
            return Err(invalid());
        }

        let (quantity, buy_price) = match rest.split_once('@') {
            Some((quantity, price)) => (quantity, Some(price)),
            None => (rest, None),
        };

        let quantity: i64 = quantity.trim().parse().map_err(|_| invalid())?;
        let mut holding = Holding::new(symbol, quantity);
        if let Some(price) = buy_price {
            let price: f64 = price.trim().parse().map_err(|_| invalid())?;
            holding = holding.with_buy_price(price);
        }
        Ok(holding)
    }
}

/// Analysis state for a single user or request.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    instruments: InstrumentTable,
    last_metrics: Option<PortfolioMetrics>,
    analyzed_at: Option<DateTime<Utc>>,
}

impl AnalysisSession {
    /// Create a session selecting from `instruments`.
    pub fn new(instruments: InstrumentTable) -> Self {
        Self {
            instruments,
            last_metrics: None,
            analyzed_at: None,
        }
    }

    /// Create a session over the built-in Casablanca table.
    pub fn with_builtin_instruments() -> Self {
        Self::new(InstrumentTable::builtin())
    }

    pub fn instruments(&self) -> &InstrumentTable {
        &self.instruments
    }

    /// Replace the instrument table. The last analysis is kept as is.
    pub fn reload_instruments(&mut self, instruments: InstrumentTable) {
        tracing::info!(instruments = instruments.len(), "Instrument table reloaded");
        self.instruments = instruments;
    }

    /// Turn holdings into positions priced from the instrument table.
    pub fn resolve(&self, holdings: &[Holding]) -> Result<Vec<Position>> {
        holdings
            .iter()
            .map(|holding| -> Result<Position> {
                let instrument = self
                    .instruments
                    .get(&holding.symbol)
                    .ok_or_else(|| Error::UnknownSymbol(holding.symbol.clone()))?;

                Ok(Position {
                    symbol: instrument.symbol.clone(),
                    name: instrument.name.clone(),
                    quantity: holding.quantity,
                    buy_price: holding.buy_price.unwrap_or(instrument.price),
                    current_price: instrument.price,
                    sector: Some(instrument.sector.clone()),
                })
            })
            .collect()
    }

    /// Resolve and analyze `holdings`, keeping the result in the session.
    ///
    /// An empty selection clears the previous result and returns `None`.
    /// On error the previous result is left untouched.
    pub fn analyze(&mut self, holdings: &[Holding]) -> Result<Option<&PortfolioMetrics>> {
        let positions = self.resolve(holdings)?;
        let metrics = calculate_portfolio_metrics(&positions)?;

        self.analyzed_at = Some(Utc::now());
        self.last_metrics = metrics;
        Ok(self.last_metrics.as_ref())
    }

    /// Result of the last successful analysis.
    pub fn last_metrics(&self) -> Option<&PortfolioMetrics> {
        self.last_metrics.as_ref()
    }

    /// When the last successful analysis ran.
    pub fn analyzed_at(&self) -> Option<DateTime<Utc>> {
        self.analyzed_at
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::with_builtin_instruments()
    }
}
