//! Capped log of runtime errors and unhandled promise rejections.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most recent entries kept; older ones are evicted.
pub const ERROR_LOG_CAPACITY: usize = 20;

/// Raw signal forwarded by the host runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorEvent {
    /// `window.onerror`
    Error {
        message: String,
        filename: Option<String>,
        line: Option<u32>,
        column: Option<u32>,
        timestamp_ms: i64,
    },
    /// `unhandledrejection`
    Rejection { reason: String, timestamp_ms: i64 },
}

impl ErrorEvent {
    pub fn error(message: impl Into<String>, timestamp_ms: i64) -> Self {
        Self::Error {
            message: message.into(),
            filename: None,
            line: None,
            column: None,
            timestamp_ms,
        }
    }

    pub fn rejection(reason: impl Into<String>, timestamp_ms: i64) -> Self {
        Self::Rejection {
            reason: reason.into(),
            timestamp_ms,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub id: u64,
    pub message: String,
    pub source: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorRecord {
    /// `HH:MM:SS` for the error panel.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

fn source_label(filename: Option<&str>, line: Option<u32>, column: Option<u32>) -> Option<String> {
    let file = filename.filter(|f| !f.is_empty())?;
    Some(match (line, column) {
        (Some(l), Some(c)) => format!("{file}:{l}:{c}"),
        (Some(l), None) => format!("{file}:{l}"),
        _ => file.to_string(),
    })
}

/// Newest-first ring buffer of [`ErrorRecord`]s.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    records: VecDeque<ErrorRecord>,
    /// Total errors ever recorded; survives `clear`.
    counter: u64,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &ErrorEvent) -> &ErrorRecord {
        let (message, source, timestamp_ms) = match event {
            ErrorEvent::Error {
                message,
                filename,
                line,
                column,
                timestamp_ms,
            } => (
                message.clone(),
                source_label(filename.as_deref(), *line, *column),
                *timestamp_ms,
            ),
            ErrorEvent::Rejection {
                reason,
                timestamp_ms,
            } => (
                reason.clone(),
                Some("unhandledrejection".to_string()),
                *timestamp_ms,
            ),
        };

        self.counter += 1;
        let record = ErrorRecord {
            id: self.counter,
            message,
            source,
            timestamp: DateTime::from_timestamp_millis(timestamp_ms).unwrap_or_default(),
        };
        tracing::debug!(id = record.id, message = %record.message, "captured page error");

        self.records.push_front(record);
        self.records.truncate(ERROR_LOG_CAPACITY);
        &self.records[0]
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Records newest first.
    pub fn records(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter()
    }

    pub fn snapshot(&self) -> Vec<ErrorRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Monotonic count of every error seen, including evicted and cleared ones.
    pub fn total(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_twenty_newest_first() {
        let mut log = ErrorCollector::new();
        for i in 1..=25 {
            log.record(&ErrorEvent::error(format!("boom {i}"), i * 1000));
        }

        assert_eq!(log.len(), ERROR_LOG_CAPACITY);
        assert_eq!(log.total(), 25);
        let messages: Vec<_> = log.records().map(|r| r.message.clone()).collect();
        let expected: Vec<_> = (6..=25).rev().map(|i| format!("boom {i}")).collect();
        assert_eq!(messages, expected);
    }

    #[test]
    fn clear_keeps_counter_monotonic() {
        let mut log = ErrorCollector::new();
        log.record(&ErrorEvent::error("a", 0));
        log.record(&ErrorEvent::rejection("b", 0));
        log.clear();
        assert!(log.is_empty());

        let next = log.record(&ErrorEvent::error("c", 0));
        assert_eq!(next.id, 3);
    }

    #[test]
    fn source_reflects_event_kind() {
        let mut log = ErrorCollector::new();
        let rec = log
            .record(&ErrorEvent::Error {
                message: "x is undefined".into(),
                filename: Some("app.js".into()),
                line: Some(10),
                column: Some(4),
                timestamp_ms: 0,
            })
            .clone();
        assert_eq!(rec.source.as_deref(), Some("app.js:10:4"));

        let rec = log.record(&ErrorEvent::rejection("fetch failed", 0)).clone();
        assert_eq!(rec.source.as_deref(), Some("unhandledrejection"));

        let rec = log.record(&ErrorEvent::error("no file", 0)).clone();
        assert_eq!(rec.source, None);
    }

    #[test]
    fn time_label_uses_utc_clock() {
        let mut log = ErrorCollector::new();
        // 1970-01-01T01:02:03Z
        let rec = log.record(&ErrorEvent::error("t", 3_723_000)).clone();
        assert_eq!(rec.time_label(), "01:02:03");
    }
}
