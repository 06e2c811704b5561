//! Model capability traits and the feature-vector contract.
//!
//! The demand and temperature regressors are opaque collaborators: the rest
//! of the crate only sees [`DemandModel`] and [`TemperatureModel`], so the
//! prediction logic is testable against deterministic stubs.

mod artifact;

pub use artifact::{ArtifactPolicy, DayOfYearModel, RegressionArtifact};

use serde::Serialize;

use crate::error::PredictError;

/// Canonical feature names, in the fixed order the demand model was trained
/// with. Values are always bound to the artifact by name, never by position.
pub const FEATURE_SCHEMA: [&str; 8] = [
    "hour",
    "day_of_week",
    "month",
    "year",
    "week_of_year",
    "is_weekend",
    "prior_hour_mw",
    "tavg_c",
];

/// Fixed-schema input record for the demand model.
///
/// Constructed fresh per prediction request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Hour of day (0-23).
    pub hour: u32,
    /// Day of week (0 = Monday .. 6 = Sunday).
    pub day_of_week: u32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// ISO week of year (1-53).
    pub week_of_year: u32,
    /// True iff `day_of_week` is Saturday or Sunday.
    pub is_weekend: bool,
    /// Consumption measured in the prior hour (MW).
    pub prior_hour_mw: f64,
    /// Average temperature for the target date (°C).
    pub tavg_c: f64,
}

impl FeatureVector {
    /// Numeric value of the named feature, or `None` for a name outside the
    /// schema. Booleans are encoded as 1.0 / 0.0, matching the training data.
    pub fn value_of(&self, name: &str) -> Option<f64> {
        match name {
            "hour" => Some(f64::from(self.hour)),
            "day_of_week" => Some(f64::from(self.day_of_week)),
            "month" => Some(f64::from(self.month)),
            "year" => Some(f64::from(self.year)),
            "week_of_year" => Some(f64::from(self.week_of_year)),
            "is_weekend" => Some(if self.is_weekend { 1.0 } else { 0.0 }),
            "prior_hour_mw" => Some(self.prior_hour_mw),
            "tavg_c" => Some(self.tavg_c),
            _ => None,
        }
    }

    /// All features as `(name, value)` pairs in canonical schema order.
    pub fn named_values(&self) -> [(&'static str, f64); 8] {
        [
            ("hour", f64::from(self.hour)),
            ("day_of_week", f64::from(self.day_of_week)),
            ("month", f64::from(self.month)),
            ("year", f64::from(self.year)),
            ("week_of_year", f64::from(self.week_of_year)),
            ("is_weekend", if self.is_weekend { 1.0 } else { 0.0 }),
            ("prior_hour_mw", self.prior_hour_mw),
            ("tavg_c", self.tavg_c),
        ]
    }
}

/// Demand regressor: one feature vector in, one MW estimate out.
pub trait DemandModel {
    /// Predicts hourly demand in MW for the given features.
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` if the features cannot be bound to the
    /// model's training-time schema.
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError>;
}

/// Temperature regressor keyed on the day-of-year ordinal (1-366).
///
/// Schema compatibility is checked once when the artifact is loaded, so
/// estimation itself is infallible.
pub trait TemperatureModel {
    /// Estimated average temperature (°C) for the given day of year.
    fn estimate_tavg(&self, day_of_year: u32) -> f64;
}
