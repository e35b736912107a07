use std::sync::Arc;

use payment_alerts::config::AppConfig;
use payment_alerts::logbuf::LogBuffer;
use payment_alerts::notifier::smtp::SmtpNotifier;
use payment_alerts::recorder::airtable::AirtableRecorder;
use payment_alerts::service::fanout::FanoutService;
use payment_alerts::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let logs = LogBuffer::new();

    let recorder = Arc::new(AirtableRecorder {
        base_url: cfg.airtable_base_url.clone(),
        token: cfg.airtable_token.clone(),
        base_id: cfg.airtable_base_id.clone(),
        table: cfg.airtable_table.clone(),
        timeout_ms: cfg.recorder_timeout_ms,
        client: reqwest::Client::new(),
    });

    let notifier = Arc::new(SmtpNotifier::new(
        &cfg.smtp_host,
        cfg.smtp_username.clone(),
        cfg.smtp_password.clone(),
        cfg.alert_from.clone(),
        cfg.alert_to.clone(),
    )?);

    let state = AppState {
        fanout: FanoutService::new(recorder, notifier, logs.clone()),
        logs,
    };

    let app = payment_alerts::router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
