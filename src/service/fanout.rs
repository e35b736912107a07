use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use crate::domain::event::FailureRecord;
use crate::logbuf::LogBuffer;
use crate::notifier::AlertNotifier;
use crate::recorder::FailureRecorder;

const SEEN_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone)]
pub struct FanoutReport {
    pub recorded: Outcome,
    pub notified: Outcome,
    pub duplicate: bool,
}

impl FanoutReport {
    pub fn first_error(&self) -> Option<&str> {
        match (&self.recorded, &self.notified) {
            (Outcome::Failed(e), _) => Some(e),
            (_, Outcome::Failed(e)) => Some(e),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct FanoutService {
    pub recorder: Arc<dyn FailureRecorder>,
    pub notifier: Arc<dyn AlertNotifier>,
    pub logs: LogBuffer,
    seen: Arc<Mutex<SeenIds>>,
}

struct SeenIds {
    order: VecDeque<String>,
    ids: HashSet<String>,
}

impl FanoutService {
    pub fn new(
        recorder: Arc<dyn FailureRecorder>,
        notifier: Arc<dyn AlertNotifier>,
        logs: LogBuffer,
    ) -> Self {
        Self {
            recorder,
            notifier,
            logs,
            seen: Arc::new(Mutex::new(SeenIds {
                order: VecDeque::with_capacity(SEEN_CAPACITY),
                ids: HashSet::with_capacity(SEEN_CAPACITY),
            })),
        }
    }

    /// Runs both downstream calls concurrently and waits for both to settle.
    /// A payment id that was already dispatched is acknowledged without side
    /// effects, so processor redeliveries cannot duplicate rows or emails.
    pub async fn dispatch(&self, record: &FailureRecord) -> FanoutReport {
        if !self.claim(&record.payment_id) {
            self.logs.info(format!(
                "duplicate delivery for {}, skipping fan-out",
                record.payment_id
            ));
            return FanoutReport {
                recorded: Outcome::Skipped,
                notified: Outcome::Skipped,
                duplicate: true,
            };
        }

        let (record_result, notify_result) = tokio::join!(
            self.recorder.record(record),
            self.notifier.notify(record)
        );

        let recorded = match record_result {
            Ok(()) => {
                self.logs.info(format!(
                    "failure {} recorded via {}",
                    record.payment_id,
                    self.recorder.name()
                ));
                Outcome::Succeeded
            }
            Err(e) => {
                self.logs
                    .error(format!("failed to record {}: {}", record.payment_id, e));
                Outcome::Failed(e.to_string())
            }
        };

        let notified = match notify_result {
            Ok(()) => {
                self.logs.info(format!(
                    "alert for {} sent via {}",
                    record.payment_id,
                    self.notifier.name()
                ));
                Outcome::Succeeded
            }
            Err(e) => {
                self.logs
                    .error(format!("failed to alert for {}: {}", record.payment_id, e));
                Outcome::Failed(e.to_string())
            }
        };

        FanoutReport {
            recorded,
            notified,
            duplicate: false,
        }
    }

    fn claim(&self, payment_id: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        if seen.ids.contains(payment_id) {
            return false;
        }
        if seen.order.len() == SEEN_CAPACITY {
            if let Some(evicted) = seen.order.pop_front() {
                seen.ids.remove(&evicted);
            }
        }
        seen.order.push_back(payment_id.to_string());
        seen.ids.insert(payment_id.to_string());
        true
    }
}
