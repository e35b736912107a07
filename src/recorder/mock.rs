use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::domain::event::FailureRecord;
use crate::recorder::FailureRecorder;

pub struct MockRecorder {
    pub behavior: String,
    pub calls: Arc<Mutex<Vec<FailureRecord>>>,
}

impl MockRecorder {
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
impl FailureRecorder for MockRecorder {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn record(&self, record: &FailureRecord) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());

        if self.behavior == "ALWAYS_FAILURE" {
            anyhow::bail!("mock recorder failure");
        }
        Ok(())
    }
}
