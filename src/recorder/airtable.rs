use anyhow::Result;
use serde_json::json;

use crate::domain::event::FailureRecord;
use crate::recorder::FailureRecorder;

pub struct AirtableRecorder {
    pub base_url: String,
    pub token: String,
    pub base_id: String,
    pub table: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl FailureRecorder for AirtableRecorder {
    fn name(&self) -> &'static str {
        "airtable"
    }

    async fn record(&self, record: &FailureRecord) -> Result<()> {
        let url = format!("{}/v0/{}/{}", self.base_url, self.base_id, self.table);
        let body = json!({
            "records": [{
                "fields": {
                    "Payment ID": record.payment_id,
                    "Customer ID": record.customer_display(),
                    "Email": record.email_display(),
                    "Amount": record.amount_display(),
                    "Currency": record.currency,
                    "Failure Reason": record.reason_display(),
                    "Date": record.observed_at.to_rfc3339(),
                    "Status": "Failed"
                }
            }]
        });

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "airtable insert failed: HTTP_{} {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            );
        }

        Ok(())
    }
}
