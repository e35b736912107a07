use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const LOG_CAPACITY: usize = 100;
pub const RECENT_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// Bounded in-memory record of recent activity, shared by every component and
/// served back on /logs. Oldest entries are evicted first; nothing survives a
/// restart. Each entry is mirrored to the tracing subscriber.
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY))),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.push(LogLevel::Info, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.push(LogLevel::Error, message);
    }

    fn push(&self, level: LogLevel, message: String) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() == LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    /// Most recent `limit` entries in insertion order.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_returns_newest_in_insertion_order() {
        let logs = LogBuffer::new();
        for i in 0..5 {
            logs.info(format!("entry {}", i));
        }

        let recent = logs.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].message, "entry 2");
        assert_eq!(recent[2].message, "entry 4");
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let logs = LogBuffer::new();
        for i in 0..(LOG_CAPACITY + 10) {
            logs.info(format!("entry {}", i));
        }

        let all = logs.recent(LOG_CAPACITY + 10);
        assert_eq!(all.len(), LOG_CAPACITY);
        assert_eq!(all[0].message, "entry 10");
        assert_eq!(all[LOG_CAPACITY - 1].message, format!("entry {}", LOG_CAPACITY + 9));
    }

    #[test]
    fn levels_serialize_lowercase() {
        let logs = LogBuffer::new();
        logs.error("boom");

        let entry = &logs.recent(1)[0];
        assert_eq!(entry.level, LogLevel::Error);
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["message"], "boom");
    }
}
