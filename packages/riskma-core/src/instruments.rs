//! Instrument reference table.
//!
//! The built-in table lists Casablanca Stock Exchange equities with a
//! reference price (MAD) and sector. Prices are static; refreshing them is
//! the job of whoever supplies a replacement table.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// A listed instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    /// Ticker symbol
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Reference price per unit
    pub price: f64,
    /// Industry classification
    pub sector: String,
}

impl Instrument {
    fn new(symbol: &str, name: &str, price: f64, sector: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            sector: sector.to_string(),
        }
    }
}

/// Built-in Casablanca instruments.
pub static CASABLANCA_INSTRUMENTS: LazyLock<Vec<Instrument>> = LazyLock::new(|| {
    vec![
        Instrument::new("ADH", "DOUJA PROM ADDOHA", 42.90, "Immobilier"),
        Instrument::new("ADI", "ALLIANCES", 530.0, "Divers"),
        Instrument::new("AFI", "AFRIC INDUSTRIES", 326.00, "Industrie"),
        Instrument::new("AFM", "AFMA", 1286.0, "Finance"),
        Instrument::new("AKT", "AKDITAL S.A", 1211.0, "Santé"),
        Instrument::new("ALM", "ALUMINIUM DU MAROC", 1733.0, "Matériaux"),
        Instrument::new("ARD", "ARADEI CAPITAL", 480.00, "Immobilier"),
        Instrument::new("ATH", "AUTO HALL", 74.44, "Automobile"),
        Instrument::new("ATL", "ATLANTASANAD", 135.00, "Distribution"),
        Instrument::new("ATW", "ATTIJARIWAFA BANK", 680.0, "Banque"),
        Instrument::new("BAL", "BALIMA", 230.00, "Distribution"),
        Instrument::new("IAM", "MAROC TELECOM", 125.00, "Télécom"),
        Instrument::new("JET", "JET CONTRACTORS", 45.00, "Construction"),
        Instrument::new("MNG", "MANAGEM", 1850.0, "Mines"),
        Instrument::new("SNP", "SNEP", 639.8, "Industrie"),
        Instrument::new("SOT", "SOTHEMA", 1055.0, "Pharma"),
        Instrument::new("TGC", "TRAVAUX GENERAUX DE CONSTRUCTIONS", 690.0, "Construction"),
        Instrument::new("TMA", "TOTALENERGIES MARKETING MAROC", 1821.0, "Énergie"),
        Instrument::new("TQM", "TAQA MOROCCO", 2050.0, "Énergie"),
        Instrument::new("WAA", "WAFA ASSURANCE", 4902.0, "Assurance"),
    ]
});

/// Ordered set of instruments available for selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct InstrumentTable {
    instruments: Vec<Instrument>,
}

impl InstrumentTable {
    /// Create a table from a list of instruments.
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }

    /// The built-in Casablanca table.
    pub fn builtin() -> Self {
        Self::new(CASABLANCA_INSTRUMENTS.clone())
    }

    /// Parse a table from a JSON array of instruments.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let instruments: Vec<Instrument> = serde_json::from_str(json)?;
        Ok(Self::new(instruments))
    }

    /// Load a table from a JSON file.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), instruments = table.len(), "Loaded instrument table");
        Ok(table)
    }

    /// Find an instrument by symbol (case-insensitive).
    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|i| i.symbol.eq_ignore_ascii_case(symbol.trim()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Distinct sectors in first-seen order.
    pub fn sectors(&self) -> Vec<&str> {
        let mut sectors: Vec<&str> = Vec::new();
        for instrument in &self.instruments {
            if !sectors.contains(&instrument.sector.as_str()) {
                sectors.push(&instrument.sector);
            }
        }
        sectors
    }

    /// Instruments in `sector` (case-insensitive).
    pub fn by_sector<'a>(&'a self, sector: &'a str) -> impl Iterator<Item = &'a Instrument> + 'a {
        self.instruments
            .iter()
            .filter(move |i| i.sector.to_lowercase() == sector.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_table() {
        let table = InstrumentTable::builtin();
        assert_eq!(table.len(), 20);

        let iam = table.get("IAM").unwrap();
        assert_eq!(iam.name, "MAROC TELECOM");
        assert_eq!(iam.price, 125.0);
        assert_eq!(iam.sector, "Télécom");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = InstrumentTable::builtin();
        assert!(table.get("atw").is_some());
        assert!(table.get(" mng ").is_some());
        assert!(table.get("AAPL").is_none());
    }

    #[test]
    fn test_symbols_are_unique() {
        let table = InstrumentTable::builtin();
        let mut symbols: Vec<_> = table.iter().map(|i| i.symbol.as_str()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), table.len());
    }

    #[test]
    fn test_sectors_and_filter() {
        let table = InstrumentTable::builtin();
        let sectors = table.sectors();
        assert_eq!(sectors[0], "Immobilier");
        assert_eq!(sectors.iter().filter(|s| **s == "Immobilier").count(), 1);

        let energy: Vec<_> = table.by_sector("énergie").map(|i| i.symbol.as_str()).collect();
        assert_eq!(energy, vec!["TMA", "TQM"]);
    }

    #[test]
    fn test_from_json_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"symbol":"CIH","name":"CIH BANK","price":380.5,"sector":"Banque"}}]"#
        )
        .unwrap();

        let table = InstrumentTable::from_json_path(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("cih").unwrap().price, 380.5);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = InstrumentTable::from_json_str("{not json");
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }
}
