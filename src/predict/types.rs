//! Prediction request/response types shared by the CLI and API layers.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Which fallback tier produced a resolved temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureSource {
    /// Exact-date hit in the historical weather table.
    HistoricalRecord,
    /// Estimated by the day-of-year temperature model.
    ModelEstimate,
    /// Fixed fallback value; no record and no model available.
    Default,
    /// Supplied explicitly by the caller. Never produced by the resolver
    /// itself, only by the composed prediction flow.
    UserOverride,
}

impl fmt::Display for TemperatureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HistoricalRecord => "historical record",
            Self::ModelEstimate => "model estimate",
            Self::Default => "default",
            Self::UserOverride => "user override",
        };
        f.write_str(label)
    }
}

/// A resolved temperature with its provenance tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedTemperature {
    /// Average temperature (°C).
    pub tavg_c: f64,
    /// Which tier produced the value.
    pub source: TemperatureSource,
}

/// One prediction request from the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct PredictionRequest {
    /// Target calendar date.
    pub date: NaiveDate,
    /// Target hour of day (0-23).
    pub hour: u32,
    /// User-confirmed temperature (°C); when absent the resolver chain runs.
    pub tavg_c: Option<f64>,
    /// Prior-hour consumption (MW); when absent the configured default is used.
    pub prior_hour_mw: Option<f64>,
}

/// The scalar outcome of one prediction, consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// The timestamp the prediction targets (minute/second zero).
    pub timestamp: NaiveDateTime,
    /// Predicted hourly demand (MW).
    pub predicted_demand_mw: f64,
    /// Temperature fed to the demand model (°C).
    pub tavg_c: f64,
    /// Provenance of that temperature.
    pub temperature_source: TemperatureSource,
    /// Prior-hour consumption fed to the demand model (MW).
    pub prior_hour_mw: f64,
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | predicted demand {:>8.2} MW | tavg {:>5.1} °C ({})",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.predicted_demand_mw,
            self.tavg_c,
            self.temperature_source,
        )
    }
}
