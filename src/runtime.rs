//! Load-once process resources: datasets and models are read exactly once,
//! shared immutably by every prediction for the life of the process, and
//! dropped at process exit.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::warn;

use crate::config::AppConfig;
use crate::data::{ConsumptionSeries, HourlyPoint, WeatherTable};
use crate::error::PredictError;
use crate::model::{ArtifactPolicy, DayOfYearModel, TemperatureModel};
use crate::predict::Predictor;

/// Everything a presentation layer needs, loaded once.
#[derive(Debug)]
pub struct AppResources {
    pub config: AppConfig,
    pub consumption: ConsumptionSeries,
    pub predictor: Predictor,
}

impl AppResources {
    /// Loads datasets and models per the configuration.
    ///
    /// An unavailable weather table degrades to an empty one (temperature
    /// resolution then falls through its chain); an unavailable consumption
    /// series or demand artifact is fatal.
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` for the consumption series and
    /// `ModelUnavailable` when no demand candidate loads.
    pub fn load(config: AppConfig) -> Result<Self, PredictError> {
        let weather = match WeatherTable::from_csv_path(&config.data.weather_path) {
            Ok(table) => table,
            Err(e) => {
                warn!("weather history unavailable, resolution will fall through: {e}");
                WeatherTable::empty()
            }
        };

        let consumption = ConsumptionSeries::from_csv_path(&config.data.consumption_path)?;

        let demand = ArtifactPolicy::new(config.models.demand_candidates.clone())
            .load_required("demand")?;

        let temperature: Option<Box<dyn TemperatureModel + Send + Sync>> =
            ArtifactPolicy::new(config.models.temperature_candidates.clone())
                .load_optional("temperature")
                .and_then(|artifact| match DayOfYearModel::from_artifact(artifact) {
                    Ok(model) => Some(Box::new(model) as Box<dyn TemperatureModel + Send + Sync>),
                    Err(e) => {
                        warn!("temperature artifact rejected: {e}");
                        None
                    }
                });
        if temperature.is_none() {
            warn!("no temperature model loaded; suggestions without a record use the default");
        }

        let predictor = Predictor::new(
            weather,
            Box::new(demand),
            temperature,
            config.prediction.default_prior_hour_mw,
        );

        Ok(Self {
            config,
            consumption,
            predictor,
        })
    }

    /// The configured trend-display slice: most recent `history_window` points.
    pub fn history(&self) -> &[HourlyPoint] {
        self.consumption.recent(self.config.data.history_window)
    }

    /// Prior-hour consumption suggestion: the latest measured point, or the
    /// configured default when the series is empty.
    pub fn suggest_prior_hour_mw(&self) -> f64 {
        self.consumption
            .latest()
            .map(|p| p.demand_mw)
            .unwrap_or(self.config.prediction.default_prior_hour_mw)
    }
}

static GLOBAL: OnceCell<Arc<AppResources>> = OnceCell::new();

/// Memoized process-wide initialization.
///
/// The first call loads everything; every later call returns the same
/// instance and ignores its `config` argument, so all sessions observe one
/// set of loaded resources.
///
/// # Errors
///
/// Propagates [`AppResources::load`] failures; a failed attempt leaves the
/// cell empty so a corrected configuration can retry.
pub fn init(config: AppConfig) -> Result<Arc<AppResources>, PredictError> {
    GLOBAL
        .get_or_try_init(|| AppResources::load(config).map(Arc::new))
        .cloned()
}

/// The initialized resources, if [`init`] has completed.
pub fn global() -> Option<Arc<AppResources>> {
    GLOBAL.get().cloned()
}
