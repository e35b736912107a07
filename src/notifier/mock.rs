use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::domain::event::FailureRecord;
use crate::notifier::AlertNotifier;

pub struct MockNotifier {
    pub behavior: String,
    pub calls: Arc<Mutex<Vec<FailureRecord>>>,
}

impl MockNotifier {
    pub fn new(behavior: &str) -> Self {
        Self {
            behavior: behavior.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<FailureRecord> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl AlertNotifier for MockNotifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn notify(&self, record: &FailureRecord) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());

        if self.behavior == "ALWAYS_FAILURE" {
            anyhow::bail!("mock notifier failure");
        }
        Ok(())
    }
}
