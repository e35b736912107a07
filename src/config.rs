#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub airtable_base_url: String,
    pub airtable_token: String,
    pub airtable_base_id: String,
    pub airtable_table: String,
    pub recorder_timeout_ms: u64,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub alert_from: String,
    pub alert_to: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            airtable_base_url: std::env::var("AIRTABLE_BASE_URL")
                .unwrap_or_else(|_| "https://api.airtable.com".to_string()),
            airtable_token: std::env::var("AIRTABLE_TOKEN").unwrap_or_default(),
            airtable_base_id: std::env::var("AIRTABLE_BASE_ID").unwrap_or_default(),
            airtable_table: std::env::var("AIRTABLE_TABLE")
                .unwrap_or_else(|_| "Payment Failures".to_string()),
            recorder_timeout_ms: std::env::var("RECORDER_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(2500),
            smtp_host: std::env::var("SMTP_HOST")
                .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            alert_from: std::env::var("ALERT_FROM")
                .unwrap_or_else(|_| "alerts@example.com".to_string()),
            alert_to: std::env::var("ALERT_TO")
                .unwrap_or_else(|_| "ops@example.com".to_string()),
        }
    }
}
