//! Configuration file handling.

use crate::instruments::InstrumentTable;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "RISKMA_CONFIG";

/// User configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// JSON instrument table to use instead of the built-in one
    pub instruments_file: Option<PathBuf>,
    /// Currency label for amounts
    pub currency: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instruments_file: None,
            currency: "MAD".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    ///
    /// Default path: `<config dir>/riskma/config.toml`
    /// Can be overridden with the `RISKMA_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("ma", "risk", "riskma")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("riskma.toml"))
    }

    /// Load the configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load the configuration from `path`. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Instrument table selected by this configuration.
    pub fn instrument_table(&self) -> Result<InstrumentTable> {
        match &self.instruments_file {
            Some(path) => InstrumentTable::from_json_path(path),
            None => Ok(InstrumentTable::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.currency, "MAD");
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_filter = \"riskma_core=debug\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.log_filter, "riskma_core=debug");
        assert_eq!(config.currency, "MAD");
        assert!(config.instruments_file.is_none());
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "currency = ").unwrap();

        let result = Config::load_from_path(&path);
        assert!(matches!(result, Err(crate::Error::Toml(_))));
    }

    #[test]
    fn test_instrument_table_from_file() {
        let dir = tempdir().unwrap();
        let table_path = dir.path().join("instruments.json");
        fs::write(
            &table_path,
            r#"[{"symbol":"CIH","name":"CIH BANK","price":380.5,"sector":"Banque"}]"#,
        )
        .unwrap();

        let config = Config {
            instruments_file: Some(table_path),
            ..Default::default()
        };
        let table = config.instrument_table().unwrap();
        assert_eq!(table.len(), 1);

        assert_eq!(Config::default().instrument_table().unwrap().len(), 20);
    }
}
