use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const FAILURE_EVENT_TYPES: [&str; 3] = [
    "payment_intent.payment_failed",
    "charge.failed",
    "invoice.payment_failed",
];

pub fn is_failure_event(event_type: &str) -> bool {
    FAILURE_EVENT_TYPES.contains(&event_type)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessorEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub object: PaymentObject,
}

/// Union of the fields the three failure payloads may carry. Everything is
/// optional; the processor sends different subsets per object type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentObject {
    pub id: Option<String>,
    pub customer: Option<String>,
    pub amount: Option<i64>,
    pub amount_due: Option<i64>,
    pub currency: Option<String>,
    pub billing_details: Option<BillingDetails>,
    pub receipt_email: Option<String>,
    pub customer_email: Option<String>,
    pub last_payment_error: Option<PaymentError>,
    pub failure_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingDetails {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentError {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    pub payment_id: String,
    pub customer_id: Option<String>,
    pub email: Option<String>,
    pub amount_minor: Option<i64>,
    pub currency: String,
    pub failure_reason: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl FailureRecord {
    pub fn from_object(object: &PaymentObject) -> Self {
        Self {
            payment_id: object.id.clone().unwrap_or_else(|| "unknown".to_string()),
            customer_id: object.customer.clone(),
            email: object
                .billing_details
                .as_ref()
                .and_then(|b| b.email.clone())
                .or_else(|| object.receipt_email.clone())
                .or_else(|| object.customer_email.clone()),
            amount_minor: object.amount.or(object.amount_due),
            currency: object.currency.as_deref().unwrap_or("usd").to_uppercase(),
            failure_reason: object
                .last_payment_error
                .as_ref()
                .and_then(|e| e.message.clone())
                .or_else(|| object.failure_message.clone()),
            observed_at: Utc::now(),
        }
    }

    pub fn synthetic() -> Self {
        Self {
            payment_id: format!("pi_test_{}", Utc::now().timestamp_millis()),
            customer_id: Some("cus_test".to_string()),
            email: Some("test@example.com".to_string()),
            amount_minor: Some(4242),
            currency: "USD".to_string(),
            failure_reason: Some("Synthetic failure triggered via /test".to_string()),
            observed_at: Utc::now(),
        }
    }

    /// Minor units divided by 100, rendered the way the processor dashboard
    /// shows amounts: 500 -> "5", 550 -> "5.5".
    pub fn amount_display(&self) -> String {
        match self.amount_minor {
            Some(minor) => format!("{}", minor as f64 / 100.0),
            None => "unknown".to_string(),
        }
    }

    pub fn customer_display(&self) -> &str {
        self.customer_id.as_deref().unwrap_or("N/A")
    }

    pub fn email_display(&self) -> &str {
        self.email.as_deref().unwrap_or("No email provided")
    }

    pub fn reason_display(&self) -> &str {
        self.failure_reason.as_deref().unwrap_or("Unknown")
    }
}
