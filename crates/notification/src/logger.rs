//! Structured logger contract used by the mail pipeline.
//!
//! Context is a JSON object so callers can attach arbitrary key/value pairs.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

/// Key/value context attached to a log entry.
pub type LogContext = Map<String, Value>;

/// Builds a [`LogContext`] from key/value pairs.
pub fn log_context<const N: usize>(pairs: [(&str, Value); N]) -> LogContext {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// A structured logger.
pub trait Logger: Send + Sync {
    /// Records an informational entry.
    fn info(&self, message: &str, context: &LogContext);

    /// Records an error entry.
    fn error(&self, message: &str, context: &LogContext);
}

/// Logger that forwards entries to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str, context: &LogContext) {
        tracing::info!(context = %serde_json::Value::Object(context.clone()), "{message}");
    }

    fn error(&self, message: &str, context: &LogContext) {
        tracing::error!(context = %serde_json::Value::Object(context.clone()), "{message}");
    }
}

/// Severity of a recorded entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// One entry captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
}

impl LogEntry {
    /// Returns a context value as a string, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.context.get(key).and_then(Value::as_str)
    }
}

/// In-memory logger for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryLogger {
    /// Creates a new empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded entry.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Returns the recorded messages in order.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|e| e.message.clone()).collect()
    }

    /// Removes every recorded entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, level: LogLevel, message: &str, context: &LogContext) {
        self.lock().push(LogEntry {
            level,
            message: message.to_string(),
            context: context.clone(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str, context: &LogContext) {
        self.record(LogLevel::Info, message, context);
    }

    fn error(&self, message: &str, context: &LogContext) {
        self.record(LogLevel::Error, message, context);
    }
}
