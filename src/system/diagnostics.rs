//! Diagnostic log sink
//!
//! Keeps a bounded, append-only list of structured log entries in its own
//! key-value slot, next to the link data. Entries reach it through
//! [`DiagnosticLayer`], which forwards `tracing` events emitted by this
//! crate.
//!
//! Recording is best effort. A failed read or write drops the entry and
//! nothing is reported back to the caller, and nothing in here emits
//! `tracing` events of its own.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::AsRefStr;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::config::DiagnosticsConfig;
use crate::storage::KvBackend;
use crate::storage::models::iso_millis;
use crate::utils::clock::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            // trace 没有对应级别，按 debug 记录
            _ => LogLevel::Debug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub stack: String,
    pub level: LogLevel,
    pub package: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub id: String,
}

pub struct DiagnosticLog {
    backend: Arc<dyn KvBackend>,
    key: String,
    stack: String,
    max_entries: usize,
    enabled: AtomicBool,
    clock: Arc<dyn Clock>,
    // read-modify-write of the slot
    write_lock: Mutex<()>,
}

impl DiagnosticLog {
    pub fn new(
        backend: Arc<dyn KvBackend>,
        key: impl Into<String>,
        config: &DiagnosticsConfig,
    ) -> Self {
        Self::with_clock(backend, key, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        backend: Arc<dyn KvBackend>,
        key: impl Into<String>,
        config: &DiagnosticsConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            key: key.into(),
            stack: config.stack.clone(),
            max_entries: config.max_entries.max(1),
            enabled: AtomicBool::new(config.enabled),
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Appends one entry, dropping the oldest ones beyond `max_entries`.
    ///
    /// Returns whether the entry was persisted.
    pub fn record(
        &self,
        level: LogLevel,
        package: &str,
        message: impl Into<String>,
        meta: Option<Map<String, Value>>,
    ) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let entry = LogEntry {
            stack: self.stack.clone(),
            level,
            package: package.to_string(),
            message: message.into(),
            meta: meta.filter(|m| !m.is_empty()),
            timestamp: self.clock.now(),
            id: uuid::Uuid::new_v4().simple().to_string(),
        };

        let _guard = self.write_lock.lock();
        let mut entries = self.load();
        entries.push(entry);
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }

        match serde_json::to_string(&entries) {
            Ok(raw) => self.backend.write(&self.key, &raw).is_ok(),
            Err(_) => false,
        }
    }

    /// Oldest first. An unreadable slot reads as empty.
    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.load()
    }

    pub fn clear_logs(&self) -> bool {
        let _guard = self.write_lock.lock();
        self.backend.remove(&self.key).is_ok()
    }

    fn load(&self) -> Vec<LogEntry> {
        match self.backend.read(&self.key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Debug for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticLog")
            .field("backend", &self.backend.get_backend_name())
            .field("key", &self.key)
            .field("stack", &self.stack)
            .field("max_entries", &self.max_entries)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Forwards `tracing` events into a [`DiagnosticLog`].
///
/// The event target becomes the entry's `package`, the `message` field its
/// message, and every other field lands in `meta`.
pub struct DiagnosticLayer {
    log: Arc<DiagnosticLog>,
}

impl DiagnosticLayer {
    pub fn new(log: Arc<DiagnosticLog>) -> Self {
        Self { log }
    }
}

impl<S: Subscriber> Layer<S> for DiagnosticLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.log.record(
            LogLevel::from(*metadata.level()),
            metadata.target(),
            visitor.message,
            Some(visitor.meta),
        );
    }
}

#[derive(Default)]
struct EntryVisitor {
    message: String,
    meta: Map<String, Value>,
}

impl EntryVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
        } else {
            self.meta.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::from(format!("{:?}", value)));
    }
}
