//! HTTP request handlers for the Incentive Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::process_all;
use crate::models::EvaluationWindow;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/program", get(program_handler))
        .with_state(state)
}

/// Handler for GET /program.
///
/// Returns the loaded program: window, policy and tiers in evaluation order.
async fn program_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config();
    Json(serde_json::json!({
        "program": config.program(),
        "tiers": config.tier_table().tiers(),
    }))
}

/// Handler for POST /calculate endpoint.
///
/// Accepts uploaded sheet rows and returns them with incentives populated.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let config = state.config();
    let window = match request.window.map(EvaluationWindow::try_from) {
        None => *config.window(),
        Some(Ok(window)) => window,
        Some(Err(err)) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid window override");
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    let batch = process_all(&request.records, &window, config.tier_table());
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        records = batch.summary.total,
        invalid = batch.summary.invalid,
        total_amount = %batch.summary.total_amount,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    let response = CalculationResponse {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        program_code: config.program().code.clone(),
        window,
        policy: config.tier_table().policy(),
        batch,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{EmployeeRecord, RawDate, RecordOutcome, WindowBounds};
    use axum::{body::Body, http::Request};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/cna_2024").expect("Failed to load config");
        AppState::new(config)
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_valid_request() -> CalculationRequest {
        CalculationRequest {
            records: vec![
                EmployeeRecord::new("Maria Santos", Some(RawDate::Text("01/15/2024".to_string()))),
                EmployeeRecord::new("Jose Reyes", Some(RawDate::Text("10/15/2024".to_string()))),
            ],
            window: None,
        }
    }

    async fn post_json(router: Router, body: String) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = post_json(router, body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.program_code, "CNA-2024");
        assert_eq!(result.batch.records.len(), 2);
        assert_eq!(result.batch.records[0].record.incentive_amount, Decimal::from(30000));
        assert_eq!(result.batch.records[1].record.incentive_amount, Decimal::from(9000));
        assert_eq!(result.batch.summary.total_amount, Decimal::from(39000));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = post_json(router, "{invalid json".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_records_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = post_json(router, "{}".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("records"));
    }

    #[tokio::test]
    async fn test_reversed_window_returns_400() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.window = Some(WindowBounds {
            start: make_date("2024-11-30"),
            end: make_date("2024-01-01"),
        });

        let response = post_json(router, serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_WINDOW");
    }

    #[tokio::test]
    async fn test_window_override_is_applied() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        // Ends one month after the mid-January start: 31 days -> one-month tier
        request.window = Some(WindowBounds {
            start: make_date("2024-01-01"),
            end: make_date("2024-02-15"),
        });

        let response = post_json(router, serde_json::to_string(&request).unwrap()).await;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.window.end(), make_date("2024-02-15"));
        assert_eq!(result.batch.records[0].record.incentive_amount, Decimal::from(9000));
    }

    #[tokio::test]
    async fn test_invalid_date_is_flagged_not_rejected() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({
            "records": [
                { "name": "Good", "start_date": 45292 },
                { "name": "Bad", "start_date": "32/01/2024" }
            ]
        });

        let response = post_json(router, body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.batch.records[0].outcome, RecordOutcome::Calculated);
        assert!(matches!(
            result.batch.records[1].outcome,
            RecordOutcome::InvalidDate { .. }
        ));
        assert_eq!(result.batch.summary.invalid, 1);
    }

    #[tokio::test]
    async fn test_program_endpoint_lists_tiers() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/program")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["program"]["code"], "CNA-2024");
        assert_eq!(json["program"]["policy"], "cascading");
        assert_eq!(json["tiers"].as_array().unwrap().len(), 5);
        assert_eq!(json["tiers"][0]["id"], "four_months");
    }
}
