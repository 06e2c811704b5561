//! Hourly consumption history for the Dayton service area.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::error::PredictError;

/// Canonical demand column name in the consumption CSV.
pub const DEMAND_COLUMN: &str = "DAYTON_MW";

/// Timestamp column name in the consumption CSV.
pub const TIMESTAMP_COLUMN: &str = "Datetime";

/// One measured hour of consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub timestamp: NaiveDateTime,
    pub demand_mw: f64,
}

/// Consumption history in ascending timestamp order. Read-only after load;
/// used for trend display and to seed the prior-hour suggestion.
#[derive(Debug, Clone, Default)]
pub struct ConsumptionSeries {
    points: Vec<HourlyPoint>,
}

impl ConsumptionSeries {
    /// Builds a series from in-memory points, sorting them by timestamp.
    pub fn from_points(mut points: Vec<HourlyPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    /// Loads the series from a CSV file with `Datetime` and `DAYTON_MW`
    /// columns. Unlike the weather table, a malformed row here means the
    /// wrong file was supplied, so it is an error rather than a skip.
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` if the file cannot be opened, the expected
    /// columns are absent, or any row fails to parse.
    pub fn from_csv_path(path: &Path) -> Result<Self, PredictError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            PredictError::DataUnavailable(format!("cannot open \"{}\": {e}", path.display()))
        })?;
        let headers = reader
            .headers()
            .map_err(|e| {
                PredictError::DataUnavailable(format!(
                    "cannot read headers of \"{}\": {e}",
                    path.display()
                ))
            })?
            .clone();

        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                PredictError::DataUnavailable(format!(
                    "\"{}\" has no {name} column",
                    path.display()
                ))
            })
        };
        let ts_idx = column(TIMESTAMP_COLUMN)?;
        let mw_idx = column(DEMAND_COLUMN)?;

        let mut points = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                PredictError::DataUnavailable(format!(
                    "cannot read record of \"{}\": {e}",
                    path.display()
                ))
            })?;
            let ts_str = record.get(ts_idx).unwrap_or_default().trim();
            let timestamp = NaiveDateTime::parse_from_str(ts_str, "%Y-%m-%d %H:%M:%S")
                .map_err(|e| {
                    PredictError::DataUnavailable(format!(
                        "row {}: invalid timestamp \"{ts_str}\": {e}",
                        row + 2
                    ))
                })?;
            let mw_str = record.get(mw_idx).unwrap_or_default().trim();
            let demand_mw: f64 = mw_str.parse().map_err(|e| {
                PredictError::DataUnavailable(format!(
                    "row {}: invalid {DEMAND_COLUMN} \"{mw_str}\": {e}",
                    row + 2
                ))
            })?;
            points.push(HourlyPoint {
                timestamp,
                demand_mw,
            });
        }

        if points.is_empty() {
            return Err(PredictError::DataUnavailable(format!(
                "\"{}\" contains no consumption rows",
                path.display()
            )));
        }

        info!(points = points.len(), path = %path.display(), "consumption series loaded");
        Ok(Self::from_points(points))
    }

    /// The most recent `n` points (all points when fewer exist), ascending.
    pub fn recent(&self, n: usize) -> &[HourlyPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// The most recent point, used to suggest a prior-hour consumption.
    pub fn latest(&self) -> Option<&HourlyPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
