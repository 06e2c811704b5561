//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::types::{
    ErrorResponse, HistoryQuery, PredictQuery, PredictionResponse, TemperatureQuery,
    TemperatureResponse,
};
use crate::data::HourlyPoint;
use crate::error::PredictError;
use crate::predict::PredictionRequest;
use crate::runtime::AppResources;

/// Runs one prediction for the query parameters.
///
/// `GET /predict?date=2024-07-04&hour=14` → 200 + `PredictionResponse` JSON;
/// optional `temperature` and `prior_mw` override the resolver chain and the
/// configured default respectively.
pub async fn get_predict(
    State(state): State<Arc<AppResources>>,
    Query(query): Query<PredictQuery>,
) -> impl IntoResponse {
    let request = PredictionRequest {
        date: query.date,
        hour: query.hour,
        tavg_c: query.temperature,
        prior_hour_mw: query.prior_mw,
    };

    match state.predictor.predict(&request) {
        Ok(result) => Ok(Json(PredictionResponse::from(&result))),
        Err(e) => Err(error_response(&e)),
    }
}

/// Returns the temperature suggestion for a date, with provenance.
///
/// `GET /temperature?date=2024-07-04` → 200 + `TemperatureResponse` JSON
pub async fn get_temperature(
    State(state): State<Arc<AppResources>>,
    Query(query): Query<TemperatureQuery>,
) -> Json<TemperatureResponse> {
    let resolved = state.predictor.suggest_temperature(query.date);
    Json(TemperatureResponse::new(query.date, resolved))
}

/// Returns the most recent consumption points for trend display.
///
/// `GET /history` → 200 + configured window
/// `GET /history?limit=N` → 200 + last N points
pub async fn get_history(
    State(state): State<Arc<AppResources>>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<HourlyPoint>> {
    let points = match query.limit {
        Some(limit) => state.consumption.recent(limit),
        None => state.history(),
    };
    Json(points.to_vec())
}

/// Maps the error taxonomy onto HTTP statuses: invalid input is the
/// caller's fault, a schema mismatch is an unprocessable request, and an
/// unavailable model or dataset is a server-side condition.
fn error_response(e: &PredictError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        PredictError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        PredictError::SchemaMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PredictError::ModelUnavailable(_) | PredictError::DataUnavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::AppConfig;
    use crate::data::{ConsumptionSeries, DailyRecord, WeatherTable};
    use crate::model::{DemandModel, FeatureVector};
    use crate::predict::Predictor;
    use chrono::NaiveDate;

    struct LagPlusTenTemp;

    impl DemandModel for LagPlusTenTemp {
        fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
            Ok(features.prior_hour_mw + 10.0 * features.tavg_c)
        }
    }

    fn make_test_state() -> Arc<AppResources> {
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).expect("valid date");
        let weather = WeatherTable::from_records([DailyRecord {
            date,
            tavg_c: 24.0,
        }]);
        let points = (0..24)
            .map(|h| crate::data::HourlyPoint {
                timestamp: date.and_hms_opt(h, 0, 0).expect("valid time"),
                demand_mw: 2000.0 + f64::from(h),
            })
            .collect();
        let consumption = ConsumptionSeries::from_points(points);
        let predictor = Predictor::new(weather, Box::new(LagPlusTenTemp), None, 2000.0);
        Arc::new(AppResources {
            config: AppConfig::default(),
            consumption,
            predictor,
        })
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&body).expect("body should be JSON")
    }

    #[tokio::test]
    async fn predict_returns_200_with_result() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/predict?date=2024-07-04&hour=14&temperature=22.5&prior_mw=2100")
            .body(Body::empty())
            .expect("request should build");
        let resp = app.oneshot(req).await.expect("request should complete");

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["predicted_demand_mw"], 2325.0);
        assert_eq!(json["temperature_source"], "user_override");
    }

    #[tokio::test]
    async fn predict_without_temperature_uses_the_resolver() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/predict?date=2024-07-04&hour=14&prior_mw=2100")
            .body(Body::empty())
            .expect("request should build");
        let resp = app.oneshot(req).await.expect("request should complete");

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["tavg_c"], 24.0);
        assert_eq!(json["temperature_source"], "historical_record");
    }

    #[tokio::test]
    async fn predict_with_bad_hour_returns_400() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/predict?date=2024-07-04&hour=99")
            .body(Body::empty())
            .expect("request should build");
        let resp = app.oneshot(req).await.expect("request should complete");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn temperature_reports_provenance() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/temperature?date=2024-01-01")
            .body(Body::empty())
            .expect("request should build");
        let resp = app.oneshot(req).await.expect("request should complete");

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        // No record and no model for this date
        assert_eq!(json["source"], "default");
        assert_eq!(json["tavg_c"], 15.0);
    }

    #[tokio::test]
    async fn history_honors_limit() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/history?limit=5")
            .body(Body::empty())
            .expect("request should build");
        let resp = app.oneshot(req).await.expect("request should complete");

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let points = json.as_array().expect("history should be an array");
        assert_eq!(points.len(), 5);
        assert_eq!(points[4]["demand_mw"], 2023.0);
    }
}
