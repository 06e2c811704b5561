//! TOML-based application configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults matching the stock deployment layout. Load from
/// TOML with [`AppConfig::from_toml_file`] or use [`AppConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Dataset locations and the trend-display window.
    pub data: DataConfig,
    /// Model artifact candidate paths.
    pub models: ModelsConfig,
    /// Request defaults applied when the caller omits a value.
    pub prediction: PredictionConfig,
}

/// Dataset locations and the trend-display window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Hourly consumption CSV (`Datetime`, `DAYTON_MW` columns).
    pub consumption_path: PathBuf,
    /// Daily weather CSV (`DATE`, `TAVG`, `TMAX`, `TMIN` columns).
    pub weather_path: PathBuf,
    /// Number of most-recent consumption points exposed for trend display.
    pub history_window: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            consumption_path: PathBuf::from("DAYTON_hourly.csv"),
            weather_path: PathBuf::from("4177229.csv"),
            history_window: 500,
        }
    }
}

/// Model artifact candidate paths, in preference order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelsConfig {
    /// Demand model candidates; the first that loads wins. Required.
    pub demand_candidates: Vec<PathBuf>,
    /// Temperature model candidates; optional, resolution degrades without one.
    pub temperature_candidates: Vec<PathBuf>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            demand_candidates: vec![
                PathBuf::from("models/demand.json"),
                PathBuf::from("models/demand_legacy.json"),
            ],
            temperature_candidates: vec![PathBuf::from("models/temperature.json")],
        }
    }
}

/// Request defaults applied when the caller omits a value.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictionConfig {
    /// Prior-hour consumption default (MW).
    pub default_prior_hour_mw: f64,
    /// Hour of day assumed when none is given (0-23).
    pub default_hour: u32,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            default_prior_hour_mw: 2000.0,
            default_hour: 12,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"data.history_window"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl AppConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.data.history_window == 0 {
            errors.push(ConfigError {
                field: "data.history_window".into(),
                message: "must be > 0".into(),
            });
        }
        if self.models.demand_candidates.is_empty() {
            errors.push(ConfigError {
                field: "models.demand_candidates".into(),
                message: "must name at least one candidate path".into(),
            });
        }
        if self.prediction.default_hour > 23 {
            errors.push(ConfigError {
                field: "prediction.default_hour".into(),
                message: format!("must be in 0..=23, got {}", self.prediction.default_hour),
            });
        }
        if !self.prediction.default_prior_hour_mw.is_finite()
            || self.prediction.default_prior_hour_mw < 0.0
        {
            errors.push(ConfigError {
                field: "prediction.default_prior_hour_mw".into(),
                message: "must be a finite value >= 0".into(),
            });
        }

        errors
    }
}
