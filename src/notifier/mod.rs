use anyhow::Result;

use crate::domain::event::FailureRecord;

pub mod mock;
pub mod smtp;

#[async_trait::async_trait]
pub trait AlertNotifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn notify(&self, record: &FailureRecord) -> Result<()>;
}
