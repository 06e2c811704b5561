//! Shared test fixtures for integration tests.

use std::path::{Path, PathBuf};

use dayton_demand::config::AppConfig;

/// Per-test-binary scratch directory.
pub fn fixture_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "dayton-demand-it-{}-{tag}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be writable");
    dir
}

/// Hourly consumption covering 2024-07-04 00:00-14:00, demand 2000 + 10h MW.
pub fn write_consumption_csv(dir: &Path) -> PathBuf {
    let path = dir.join("hourly.csv");
    let mut csv = String::from("Datetime,DAYTON_MW\n");
    for h in 0..=14 {
        csv.push_str(&format!(
            "2024-07-04 {h:02}:00:00,{:.1}\n",
            2000.0 + 10.0 * f64::from(h)
        ));
    }
    std::fs::write(&path, csv).expect("write consumption csv");
    path
}

/// Daily weather with a measured TAVG on 2024-07-04 and an imputable row on
/// 2024-07-03 (TAVG empty, extremes 30/20 → 25.0).
pub fn write_weather_csv(dir: &Path) -> PathBuf {
    let path = dir.join("weather.csv");
    std::fs::write(
        &path,
        "STATION,DATE,TAVG,TMAX,TMIN\n\
         USW00093815,2024-07-03,,30.0,20.0\n\
         USW00093815,2024-07-04,24.0,31.0,19.0\n",
    )
    .expect("write weather csv");
    path
}

/// Demand artifact computing `prior_hour_mw + 10 * tavg_c`.
pub fn write_demand_artifact(dir: &Path) -> PathBuf {
    let path = dir.join("demand.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "features": ["hour", "day_of_week", "month", "year", "week_of_year",
                         "is_weekend", "prior_hour_mw", "tavg_c"],
            "intercept": 0.0,
            "coefficients": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 10.0]
        })
        .to_string(),
    )
    .expect("write demand artifact");
    path
}

/// Demand artifact trained on a different feature set.
pub fn write_wrong_schema_artifact(dir: &Path) -> PathBuf {
    let path = dir.join("wrong-schema.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "features": ["hour", "humidity"],
            "intercept": 100.0,
            "coefficients": [1.0, 2.0]
        })
        .to_string(),
    )
    .expect("write wrong-schema artifact");
    path
}

/// Temperature artifact: `2.0 + 0.05 * day_of_year`.
pub fn write_temperature_artifact(dir: &Path) -> PathBuf {
    let path = dir.join("temperature.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "features": ["day_of_year"],
            "intercept": 2.0,
            "coefficients": [0.05]
        })
        .to_string(),
    )
    .expect("write temperature artifact");
    path
}

/// Complete configuration wired to freshly written fixture files.
pub fn fixture_config(tag: &str) -> AppConfig {
    let dir = fixture_dir(tag);
    let mut config = AppConfig::default();
    config.data.consumption_path = write_consumption_csv(&dir);
    config.data.weather_path = write_weather_csv(&dir);
    config.models.demand_candidates = vec![write_demand_artifact(&dir)];
    config.models.temperature_candidates = vec![write_temperature_artifact(&dir)];
    config
}
