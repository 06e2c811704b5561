//! Best-available temperature resolution for a target date.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::data::WeatherTable;
use crate::model::TemperatureModel;
use crate::predict::types::{ResolvedTemperature, TemperatureSource};

/// Fallback temperature (°C) when neither a record nor a model is available.
pub const DEFAULT_TAVG_C: f64 = 15.0;

/// Resolves an average temperature for `date` in strict priority order:
/// historical record, then model estimate, then [`DEFAULT_TAVG_C`].
///
/// An empty table behaves like a miss and a missing model is skipped, so
/// this never fails; it is a single deterministic pass with no side effects
/// beyond the lookup.
pub fn resolve_temperature(
    history: &WeatherTable,
    model: Option<&dyn TemperatureModel>,
    date: NaiveDate,
) -> ResolvedTemperature {
    if let Some(tavg_c) = history.tavg_on(date) {
        return ResolvedTemperature {
            tavg_c,
            source: TemperatureSource::HistoricalRecord,
        };
    }

    if let Some(model) = model {
        let day_of_year = date.ordinal();
        let tavg_c = model.estimate_tavg(day_of_year);
        debug!(%date, day_of_year, tavg_c, "temperature estimated by model");
        return ResolvedTemperature {
            tavg_c,
            source: TemperatureSource::ModelEstimate,
        };
    }

    debug!(%date, "no record and no model, using default temperature");
    ResolvedTemperature {
        tavg_c: DEFAULT_TAVG_C,
        source: TemperatureSource::Default,
    }
}
