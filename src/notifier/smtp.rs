use anyhow::Result;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::event::FailureRecord;
use crate::notifier::AlertNotifier;

pub struct SmtpNotifier {
    pub from: String,
    pub to: String,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    pub fn new(
        host: &str,
        username: String,
        password: String,
        from: String,
        to: String,
    ) -> Result<Self> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self { from, to, mailer })
    }
}

#[async_trait::async_trait]
impl AlertNotifier for SmtpNotifier {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn notify(&self, record: &FailureRecord) -> Result<()> {
        let message = Message::builder()
            .from(self.from.parse()?)
            .to(self.to.parse()?)
            .subject(format!("[ALERT] Payment failed: {}", record.payment_id))
            .header(ContentType::TEXT_HTML)
            .body(alert_body(record))?;

        self.mailer.send(message).await?;
        Ok(())
    }
}

fn alert_body(record: &FailureRecord) -> String {
    format!(
        "<h2>Payment failure</h2>\
         <ul>\
         <li><b>Payment:</b> {}</li>\
         <li><b>Customer:</b> {}</li>\
         <li><b>Amount:</b> {} {}</li>\
         <li><b>Reason:</b> {}</li>\
         <li><b>Date:</b> {}</li>\
         </ul>",
        record.payment_id,
        record.customer_display(),
        record.amount_display(),
        record.currency,
        record.reason_display(),
        record.observed_at.to_rfc3339(),
    )
}
