use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use payment_alerts::logbuf::{LogBuffer, LogLevel};
use payment_alerts::notifier::mock::MockNotifier;
use payment_alerts::recorder::mock::MockRecorder;
use payment_alerts::service::fanout::FanoutService;
use payment_alerts::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_state(
    recorder_behavior: &str,
    notifier_behavior: &str,
) -> (AppState, Arc<MockRecorder>, Arc<MockNotifier>) {
    let recorder = Arc::new(MockRecorder::new(recorder_behavior));
    let notifier = Arc::new(MockNotifier::new(notifier_behavior));
    let logs = LogBuffer::new();
    let state = AppState {
        fanout: FanoutService::new(recorder.clone(), notifier.clone(), logs.clone()),
        logs,
    };
    (state, recorder, notifier)
}

async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = payment_alerts::router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn failed_payment_event() -> Value {
    json!({
        "type": "payment_intent.payment_failed",
        "data": {
            "object": {
                "id": "pi_1",
                "amount": 500,
                "currency": "usd",
                "billing_details": {"email": "a@b.com"}
            }
        }
    })
}

#[tokio::test]
async fn recognized_failure_invokes_both_collaborators_once() {
    let (state, recorder, notifier) = test_state("OK", "OK");

    let (status, body) = post_json(state, "/webhook/stripe", failed_payment_event()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"received": true}));

    let recorded = recorder.calls();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].payment_id, "pi_1");
    assert_eq!(recorded[0].amount_minor, Some(500));
    assert_eq!(recorded[0].amount_display(), "5");
    assert_eq!(recorded[0].currency, "USD");
    assert_eq!(recorded[0].email.as_deref(), Some("a@b.com"));
    assert_eq!(notifier.calls().len(), 1);
}

#[tokio::test]
async fn unrecognized_event_is_acknowledged_without_side_effects() {
    let (state, recorder, notifier) = test_state("OK", "OK");

    let event = json!({
        "type": "invoice.paid",
        "data": {"object": {"id": "in_1", "amount_due": 900}}
    });
    let (status, body) = post_json(state, "/webhook/stripe", event).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"received": true}));
    assert!(recorder.calls().is_empty());
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn empty_envelope_is_acknowledged() {
    let (state, recorder, _) = test_state("OK", "OK");

    let (status, body) = post_json(state, "/webhook/stripe", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"received": true}));
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn missing_fields_degrade_to_placeholders() {
    let (state, recorder, _) = test_state("OK", "OK");

    let event = json!({
        "type": "charge.failed",
        "data": {"object": {"id": "ch_1"}}
    });
    let (status, _) = post_json(state, "/webhook/stripe", event).await;

    assert_eq!(status, StatusCode::OK);
    let recorded = recorder.calls();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].currency, "USD");
    assert_eq!(recorded[0].amount_display(), "unknown");
    assert_eq!(recorded[0].email_display(), "No email provided");
    assert_eq!(recorded[0].reason_display(), "Unknown");
}

#[tokio::test]
async fn recorder_failure_returns_500_and_logs_error() {
    let (state, recorder, notifier) = test_state("ALWAYS_FAILURE", "OK");
    let logs = state.logs.clone();

    let (status, body) = post_json(state, "/webhook/stripe", failed_payment_event()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "mock recorder failure");
    // The notifier still ran; only the joint outcome failed.
    assert_eq!(recorder.calls().len(), 1);
    assert_eq!(notifier.calls().len(), 1);

    let errors: Vec<_> = logs
        .recent(20)
        .into_iter()
        .filter(|e| e.level == LogLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("pi_1"));
}

#[tokio::test]
async fn notifier_failure_returns_500() {
    let (state, _, _) = test_state("OK", "ALWAYS_FAILURE");

    let (status, body) = post_json(state, "/webhook/stripe", failed_payment_event()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "mock notifier failure");
}

#[tokio::test]
async fn redelivered_event_is_acknowledged_without_second_dispatch() {
    let (state, recorder, notifier) = test_state("OK", "OK");

    let (first, _) = post_json(state.clone(), "/webhook/stripe", failed_payment_event()).await;
    let (second, body) = post_json(state, "/webhook/stripe", failed_payment_event()).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body, json!({"received": true}));
    assert_eq!(recorder.calls().len(), 1);
    assert_eq!(notifier.calls().len(), 1);
}

