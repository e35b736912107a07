use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::domain::event::{is_failure_event, FailureRecord, ProcessorEvent};
use crate::AppState;

pub async fn handle_processor_event(
    State(state): State<AppState>,
    Json(event): Json<ProcessorEvent>,
) -> impl IntoResponse {
    if !is_failure_event(&event.event_type) {
        state
            .logs
            .info(format!("ignoring event type {:?}", event.event_type));
        return (axum::http::StatusCode::OK, Json(json!({"received": true}))).into_response();
    }

    let record = FailureRecord::from_object(&event.data.object);
    state.logs.info(format!(
        "payment failure received: {} ({})",
        record.payment_id, event.event_type
    ));

    let report = state.fanout.dispatch(&record).await;
    match report.first_error() {
        None => (axum::http::StatusCode::OK, Json(json!({"received": true}))).into_response(),
        Some(message) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": message})),
        )
            .into_response(),
    }
}
