use anyhow::Result;

use crate::domain::event::FailureRecord;

pub mod airtable;
pub mod mock;

#[async_trait::async_trait]
pub trait FailureRecorder: Send + Sync {
    fn name(&self) -> &'static str;

    async fn record(&self, record: &FailureRecord) -> Result<()>;
}
