//! Demand prediction: temperature resolution composed with the feature
//! builder and the opaque demand model.

pub mod features;
pub mod temperature;
mod types;

pub use features::{build_and_predict, build_features, prediction_timestamp};
pub use temperature::{DEFAULT_TAVG_C, resolve_temperature};
pub use types::{PredictionRequest, PredictionResult, ResolvedTemperature, TemperatureSource};

use crate::data::WeatherTable;
use crate::error::PredictError;
use crate::model::{DemandModel, TemperatureModel};

/// Stateless prediction service over immutable, load-once collaborators.
///
/// Each call to [`Predictor::predict`] is one request/response cycle: no
/// partial results are cached and a failed request leaves nothing behind.
pub struct Predictor {
    weather: WeatherTable,
    demand: Box<dyn DemandModel + Send + Sync>,
    temperature: Option<Box<dyn TemperatureModel + Send + Sync>>,
    default_prior_hour_mw: f64,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("weather", &self.weather)
            .field("has_temperature_model", &self.temperature.is_some())
            .field("default_prior_hour_mw", &self.default_prior_hour_mw)
            .finish_non_exhaustive()
    }
}

impl Predictor {
    pub fn new(
        weather: WeatherTable,
        demand: Box<dyn DemandModel + Send + Sync>,
        temperature: Option<Box<dyn TemperatureModel + Send + Sync>>,
        default_prior_hour_mw: f64,
    ) -> Self {
        Self {
            weather,
            demand,
            temperature,
            default_prior_hour_mw,
        }
    }

    /// Suggested temperature for `date`, with provenance, for the
    /// presentation layer to show before the user confirms or edits it.
    pub fn suggest_temperature(&self, date: chrono::NaiveDate) -> ResolvedTemperature {
        resolve_temperature(
            &self.weather,
            self.temperature
                .as_deref()
                .map(|t| t as &dyn TemperatureModel),
            date,
        )
    }

    /// Runs one prediction.
    ///
    /// A request without an explicit temperature goes through the resolver
    /// chain; an explicit temperature is used verbatim and tagged
    /// [`TemperatureSource::UserOverride`]. A request without a prior-hour
    /// value uses the configured default.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an out-of-range hour and propagates
    /// `SchemaMismatch` from the demand model. Failures are terminal for
    /// this request only.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictError> {
        let resolved = match request.tavg_c {
            Some(tavg_c) => ResolvedTemperature {
                tavg_c,
                source: TemperatureSource::UserOverride,
            },
            None => self.suggest_temperature(request.date),
        };
        let prior_hour_mw = request.prior_hour_mw.unwrap_or(self.default_prior_hour_mw);

        let predicted_demand_mw = build_and_predict(
            self.demand.as_ref(),
            request.date,
            request.hour,
            resolved.tavg_c,
            prior_hour_mw,
        )?;

        Ok(PredictionResult {
            timestamp: prediction_timestamp(request.date, request.hour)?,
            predicted_demand_mw,
            tavg_c: resolved.tavg_c,
            temperature_source: resolved.source,
            prior_hour_mw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailyRecord;
    use crate::model::FeatureVector;
    use chrono::NaiveDate;

    struct LagPlusTenTemp;

    impl DemandModel for LagPlusTenTemp {
        fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
            Ok(features.prior_hour_mw + 10.0 * features.tavg_c)
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    fn predictor_with_history() -> Predictor {
        let weather = WeatherTable::from_records([DailyRecord {
            date: date("2024-07-04"),
            tavg_c: 24.0,
        }]);
        Predictor::new(weather, Box::new(LagPlusTenTemp), None, 2000.0)
    }

    #[test]
    fn resolved_temperature_flows_into_the_result() {
        let predictor = predictor_with_history();
        let result = predictor
            .predict(&PredictionRequest {
                date: date("2024-07-04"),
                hour: 14,
                tavg_c: None,
                prior_hour_mw: Some(2100.0),
            })
            .expect("prediction should succeed");

        assert_eq!(result.tavg_c, 24.0);
        assert_eq!(result.temperature_source, TemperatureSource::HistoricalRecord);
        assert_eq!(result.predicted_demand_mw, 2100.0 + 240.0);
    }

    #[test]
    fn explicit_temperature_is_tagged_as_override() {
        let predictor = predictor_with_history();
        let result = predictor
            .predict(&PredictionRequest {
                date: date("2024-07-04"),
                hour: 14,
                tavg_c: Some(22.5),
                prior_hour_mw: Some(2100.0),
            })
            .expect("prediction should succeed");

        assert_eq!(result.tavg_c, 22.5);
        assert_eq!(result.temperature_source, TemperatureSource::UserOverride);
        assert_eq!(result.predicted_demand_mw, 2325.0);
    }

    #[test]
    fn missing_prior_uses_configured_default() {
        let predictor = predictor_with_history();
        let result = predictor
            .predict(&PredictionRequest {
                date: date("2024-02-10"),
                hour: 8,
                tavg_c: Some(10.0),
                prior_hour_mw: None,
            })
            .expect("prediction should succeed");

        assert_eq!(result.predicted_demand_mw, 2000.0 + 100.0);
    }

    #[test]
    fn absent_history_and_model_fall_back_to_default_temperature() {
        let predictor = Predictor::new(WeatherTable::empty(), Box::new(LagPlusTenTemp), None, 2000.0);
        let result = predictor
            .predict(&PredictionRequest {
                date: date("2024-02-10"),
                hour: 8,
                tavg_c: None,
                prior_hour_mw: None,
            })
            .expect("prediction should succeed");

        assert_eq!(result.tavg_c, DEFAULT_TAVG_C);
        assert_eq!(result.temperature_source, TemperatureSource::Default);
    }

    #[test]
    fn invalid_hour_fails_the_request_only() {
        let predictor = predictor_with_history();
        let err = predictor
            .predict(&PredictionRequest {
                date: date("2024-07-04"),
                hour: 99,
                tavg_c: None,
                prior_hour_mw: None,
            })
            .unwrap_err();
        assert!(matches!(err, PredictError::InvalidRequest(_)), "got {err:?}");

        // The predictor is untouched and usable for the next request
        let ok = predictor.predict(&PredictionRequest {
            date: date("2024-07-04"),
            hour: 14,
            tavg_c: None,
            prior_hour_mw: None,
        });
        assert!(ok.is_ok());
    }
}
