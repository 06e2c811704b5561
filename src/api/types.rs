//! API request and response types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::predict::{PredictionResult, ResolvedTemperature, TemperatureSource};

/// Query parameters for the predict endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    /// Target calendar date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Target hour of day (0-23).
    pub hour: u32,
    /// User-confirmed temperature (°C); omitted to run the resolver chain.
    pub temperature: Option<f64>,
    /// Prior-hour consumption (MW); omitted to use the configured default.
    pub prior_mw: Option<f64>,
}

/// One prediction, in API contract field names.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// Timestamp the prediction targets.
    pub timestamp: NaiveDateTime,
    /// Predicted hourly demand (MW).
    pub predicted_demand_mw: f64,
    /// Temperature fed to the model (°C).
    pub tavg_c: f64,
    /// Provenance of that temperature.
    pub temperature_source: TemperatureSource,
    /// Prior-hour consumption fed to the model (MW).
    pub prior_hour_mw: f64,
}

impl From<&PredictionResult> for PredictionResponse {
    fn from(r: &PredictionResult) -> Self {
        Self {
            timestamp: r.timestamp,
            predicted_demand_mw: r.predicted_demand_mw,
            tavg_c: r.tavg_c,
            temperature_source: r.temperature_source,
            prior_hour_mw: r.prior_hour_mw,
        }
    }
}

/// Query parameters for the temperature-suggestion endpoint.
#[derive(Debug, Deserialize)]
pub struct TemperatureQuery {
    /// Target calendar date (`YYYY-MM-DD`).
    pub date: NaiveDate,
}

/// Temperature suggestion with provenance.
#[derive(Debug, Serialize)]
pub struct TemperatureResponse {
    /// Date the suggestion applies to.
    pub date: NaiveDate,
    /// Suggested average temperature (°C).
    pub tavg_c: f64,
    /// Which fallback tier produced it.
    pub source: TemperatureSource,
}

impl TemperatureResponse {
    pub fn new(date: NaiveDate, resolved: ResolvedTemperature) -> Self {
        Self {
            date,
            tavg_c: resolved.tavg_c,
            source: resolved.source,
        }
    }
}

/// Optional limit for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Number of most-recent points to return (default: configured window).
    pub limit: Option<usize>,
}

/// Error response body for non-2xx statuses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
