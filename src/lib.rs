use axum::routing::{get, post};
use axum::Router;

pub mod config;
pub mod domain {
    pub mod event;
}
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod webhook;
    }
}
pub mod logbuf;
pub mod notifier;
pub mod recorder;
pub mod service {
    pub mod fanout;
}

#[derive(Clone)]
pub struct AppState {
    pub fanout: service::fanout::FanoutService,
    pub logs: logbuf::LogBuffer,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::ops::identity))
        .route("/health", get(http::handlers::ops::health))
        .route("/logs", get(http::handlers::ops::recent_logs))
        .route("/test", post(http::handlers::ops::run_test))
        .route("/webhook/stripe", post(http::handlers::webhook::handle_processor_event))
        .with_state(state)
}
