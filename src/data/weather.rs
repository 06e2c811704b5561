//! Daily weather history keyed by date.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::PredictError;

/// One usable day of weather history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Average temperature (°C), measured or imputed from (TMAX+TMIN)/2.
    pub tavg_c: f64,
}

/// Date-indexed weather history. At most one record per date; when the
/// source file repeats a date, the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct WeatherTable {
    by_date: HashMap<NaiveDate, f64>,
}

impl WeatherTable {
    /// An empty table. Every lookup misses, so temperature resolution falls
    /// through to the next tier.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from in-memory records (first record per date wins).
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DailyRecord>,
    {
        let mut by_date = HashMap::new();
        for r in records {
            by_date.entry(r.date).or_insert(r.tavg_c);
        }
        Self { by_date }
    }

    /// Loads the table from a CSV file with `DATE`, `TAVG`, `TMAX`, `TMIN`
    /// columns (extra columns ignored). A row missing TAVG takes
    /// (TMAX+TMIN)/2; rows with no derivable temperature or an unparseable
    /// date are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` if the file cannot be opened, headers
    /// cannot be read, or no temperature column exists at all.
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

        let column = |name: &str| headers.iter().position(|h| h == name);
        let date_idx = column("DATE").ok_or_else(|| {
            PredictError::DataUnavailable(format!(
                "\"{}\" has no DATE column",
                path.display()
            ))
        })?;
        let tavg_idx = column("TAVG");
        let tmax_idx = column("TMAX");
        let tmin_idx = column("TMIN");
        if tavg_idx.is_none() && (tmax_idx.is_none() || tmin_idx.is_none()) {
            return Err(PredictError::DataUnavailable(format!(
                "\"{}\" has neither TAVG nor TMAX/TMIN columns",
                path.display()
            )));
        }

        let mut by_date = HashMap::new();
        let mut skipped = 0usize;
        for result in reader.records() {
            let record = result.map_err(|e| {
                PredictError::DataUnavailable(format!(
                    "cannot read record of \"{}\": {e}",
                    path.display()
                ))
            })?;
            let cell = |idx: Option<usize>| -> Option<f64> {
                idx.and_then(|i| record.get(i))
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .and_then(|s| s.parse().ok())
            };

            let date = record
                .get(date_idx)
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
            let tavg = cell(tavg_idx).or_else(|| match (cell(tmax_idx), cell(tmin_idx)) {
                (Some(max), Some(min)) => Some((max + min) / 2.0),
                _ => None,
            });

            match (date, tavg) {
                (Some(date), Some(tavg)) => {
                    by_date.entry(date).or_insert(tavg);
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(skipped, "weather rows without date or temperature skipped");
        }
        info!(
            records = by_date.len(),
            path = %path.display(),
            "weather table loaded"
        );
        Ok(Self { by_date })
    }

    /// Average temperature recorded for `date`, if present.
    pub fn tavg_on(&self, date: NaiveDate) -> Option<f64> {
        self.by_date.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
