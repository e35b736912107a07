use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::domain::event::FailureRecord;
use crate::logbuf::RECENT_LIMIT;
use crate::AppState;

pub async fn identity() -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Json(json!({
            "service": "payment-alerts",
            "status": "running",
            "routes": [
                "GET /",
                "GET /health",
                "GET /logs",
                "POST /test",
                "POST /webhook/stripe"
            ]
        })),
    )
        .into_response()
}

pub async fn health() -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Json(json!({"status": "healthy", "timestamp": Utc::now().to_rfc3339()})),
    )
        .into_response()
}

pub async fn recent_logs(State(state): State<AppState>) -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Json(json!({"logs": state.logs.recent(RECENT_LIMIT)})),
    )
        .into_response()
}

/// Exercises the same fan-out as a real failure event, with fabricated data.
pub async fn run_test(State(state): State<AppState>) -> impl IntoResponse {
    let record = FailureRecord::synthetic();
    state
        .logs
        .info(format!("dispatching synthetic failure {}", record.payment_id));

    let report = state.fanout.dispatch(&record).await;
    match report.first_error() {
        None => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "message": format!("test failure {} recorded and alerted", record.payment_id)
            })),
        )
            .into_response(),
        Some(error) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "error": error})),
        )
            .into_response(),
    }
}
