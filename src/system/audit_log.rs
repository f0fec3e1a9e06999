//! Persisted application log
//!
//! Entries are kept in memory, mirrored to the `app-logs` key after every
//! append, and emitted as `tracing` events under the `audit` target.
//! Persistence is best-effort: storage failures never reach the caller.

use std::sync::Arc;

use chrono::SecondsFormat;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::storage::KeyValueStore;

/// Fixed key holding the serialized log entries
pub const LOGS_KEY: &str = "app-logs";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// ISO-8601 with millisecond precision
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

pub struct AuditLog {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    entries: Mutex<Vec<LogEntry>>,
}

impl AuditLog {
    /// Open the log, reading previously persisted entries once.
    ///
    /// Unreadable or malformed data starts an empty log.
    pub fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let entries = match store.get_item(LOGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<LogEntry>>(&raw).unwrap_or_else(|e| {
                debug!("Discarding unreadable log entries: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!("Failed to read persisted logs: {}", e);
                Vec::new()
            }
        };

        Self {
            store,
            clock,
            entries: Mutex::new(entries),
        }
    }

    pub fn info(&self, message: &str, context: Value) {
        self.record(LogLevel::Info, message, context);
    }

    pub fn warn(&self, message: &str, context: Value) {
        self.record(LogLevel::Warn, message, context);
    }

    pub fn error(&self, message: &str, context: Value) {
        self.record(LogLevel::Error, message, context);
    }

    pub fn debug(&self, message: &str, context: Value) {
        self.record(LogLevel::Debug, message, context);
    }

    /// Append one entry and persist the whole list.
    ///
    /// `context` must be a JSON object or `null`; any other value is wrapped
    /// under a `value` key.
    pub fn record(&self, level: LogLevel, message: &str, context: Value) {
        let context = match context {
            Value::Null => None,
            Value::Object(map) => Some(map),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                Some(map)
            }
        };

        emit(level, message, context.as_ref());

        let entry = LogEntry {
            level,
            message: message.to_string(),
            timestamp: self
                .clock
                .now()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            context,
        };

        let mut entries = self.entries.lock();
        entries.push(entry);
        self.persist(&entries);
    }

    /// Snapshot of every entry, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry, in memory and in storage
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.clear();
        let _ = self.store.remove_item(LOGS_KEY);
    }

    fn persist(&self, entries: &[LogEntry]) {
        if let Ok(json) = serde_json::to_string(entries) {
            let _ = self.store.set_item(LOGS_KEY, &json);
        }
    }
}

fn emit(level: LogLevel, message: &str, context: Option<&Map<String, Value>>) {
    let context = context
        .map(|map| Value::Object(map.clone()).to_string())
        .unwrap_or_default();
    match level {
        LogLevel::Info => info!(target: "audit", context = %context, "{}", message),
        LogLevel::Warn => warn!(target: "audit", context = %context, "{}", message),
        LogLevel::Error => error!(target: "audit", context = %context, "{}", message),
        LogLevel::Debug => debug!(target: "audit", context = %context, "{}", message),
    }
}
