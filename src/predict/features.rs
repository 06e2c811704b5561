//! Deterministic construction of the demand model's feature vector.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::PredictError;
use crate::model::{DemandModel, FeatureVector};

/// Combines a date and an hour into the prediction timestamp
/// (minute/second zero).
///
/// # Errors
///
/// Returns `InvalidRequest` if `hour` is outside 0-23.
pub fn prediction_timestamp(date: NaiveDate, hour: u32) -> Result<NaiveDateTime, PredictError> {
    date.and_hms_opt(hour, 0, 0).ok_or_else(|| {
        PredictError::InvalidRequest(format!("hour must be in 0..=23, got {hour}"))
    })
}

/// Builds the eight-field feature vector for one prediction request.
///
/// Pure function of its inputs: the same `(date, hour, tavg_c,
/// prior_hour_mw)` always yields the identical vector. Day-of-week uses the
/// 0 = Monday convention the demand model was trained with; the week number
/// is the ISO week of year; weekend means Saturday or Sunday.
pub fn build_features(
    date: NaiveDate,
    hour: u32,
    tavg_c: f64,
    prior_hour_mw: f64,
) -> Result<FeatureVector, PredictError> {
    let timestamp = prediction_timestamp(date, hour)?;
    let day_of_week = timestamp.weekday().num_days_from_monday();

    Ok(FeatureVector {
        hour,
        day_of_week,
        month: timestamp.month(),
        year: timestamp.year(),
        week_of_year: timestamp.iso_week().week(),
        is_weekend: day_of_week >= 5,
        prior_hour_mw,
        tavg_c,
    })
}

/// Builds the feature vector and invokes the demand model on it.
///
/// # Errors
///
/// Propagates `InvalidRequest` from vector construction and
/// `SchemaMismatch` from the model.
pub fn build_and_predict(
    model: &dyn DemandModel,
    date: NaiveDate,
    hour: u32,
    tavg_c: f64,
    prior_hour_mw: f64,
) -> Result<f64, PredictError> {
    let features = build_features(date, hour, tavg_c, prior_hour_mw)?;
    model.predict(&features)
}
