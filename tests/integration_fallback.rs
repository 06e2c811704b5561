//! Temperature-resolution fallback chain and artifact-policy behavior,
//! exercised through full resource loading.

mod common;

use chrono::NaiveDate;
use dayton_demand::predict::TemperatureSource;
use dayton_demand::runtime::AppResources;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

#[test]
fn absent_date_uses_the_temperature_model() {
    let resources =
        AppResources::load(common::fixture_config("model-tier")).expect("resources should load");

    // 2025-03-01 is not in the weather fixture; day of year 60
    let suggestion = resources.predictor.suggest_temperature(date("2025-03-01"));
    assert_eq!(suggestion.source, TemperatureSource::ModelEstimate);
    assert_eq!(suggestion.tavg_c, 2.0 + 0.05 * 60.0);
}

#[test]
fn no_temperature_model_falls_back_to_default() {
    let mut config = common::fixture_config("default-tier");
    config.models.temperature_candidates.clear();

    let resources = AppResources::load(config).expect("resources should load");
    let suggestion = resources.predictor.suggest_temperature(date("2025-03-01"));
    assert_eq!(suggestion.source, TemperatureSource::Default);
    assert_eq!(suggestion.tavg_c, 15.0);
}

#[test]
fn missing_temperature_artifact_does_not_fail_loading() {
    let mut config = common::fixture_config("missing-temp-artifact");
    config.models.temperature_candidates = vec!["/nonexistent/temperature.json".into()];

    let resources = AppResources::load(config).expect("load should tolerate a missing optional");
    let suggestion = resources.predictor.suggest_temperature(date("2025-03-01"));
    assert_eq!(suggestion.source, TemperatureSource::Default);
}

#[test]
fn missing_weather_file_degrades_to_the_next_tier() {
    let mut config = common::fixture_config("missing-weather");
    config.data.weather_path = "/nonexistent/weather.csv".into();

    let resources = AppResources::load(config).expect("load should tolerate missing weather");
    // Even a date that would have been a table hit now goes to the model
    let suggestion = resources.predictor.suggest_temperature(date("2024-07-04"));
    assert_eq!(suggestion.source, TemperatureSource::ModelEstimate);
}

#[test]
fn historical_record_wins_over_the_model() {
    let resources =
        AppResources::load(common::fixture_config("record-wins")).expect("resources should load");

    let suggestion = resources.predictor.suggest_temperature(date("2024-07-04"));
    assert_eq!(suggestion.source, TemperatureSource::HistoricalRecord);
    assert_eq!(suggestion.tavg_c, 24.0);
}

#[test]
fn demand_policy_falls_through_to_a_later_candidate() {
    let mut config = common::fixture_config("legacy-candidate");
    let first = config.models.demand_candidates[0].clone();
    config.models.demand_candidates = vec!["/nonexistent/demand.json".into(), first];

    let resources = AppResources::load(config).expect("second candidate should load");
    let result = resources
        .predictor
        .predict(&dayton_demand::predict::PredictionRequest {
            date: date("2024-07-04"),
            hour: 14,
            tavg_c: Some(22.5),
            prior_hour_mw: Some(2100.0),
        })
        .expect("prediction should succeed");
    assert_eq!(result.predicted_demand_mw, 2325.0);
}

#[test]
fn all_demand_candidates_failing_is_fatal() {
    let mut config = common::fixture_config("no-demand");
    config.models.demand_candidates =
        vec!["/nonexistent/a.json".into(), "/nonexistent/b.json".into()];

    let err = AppResources::load(config).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("a.json") && msg.contains("b.json"), "got {msg}");
}
