//! # Cedi Logger
//!
//! Structured logging for the editor host.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Components log through a [`Logger`] handed to them; where entries end up
//! is decided by the [`LogSink`] the host installs.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parse a level name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Emitting component (if known)
    pub source: Option<String>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the source component
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Value of the first field named `key`
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level.as_str())?;
        if let Some(source) = &self.source {
            write!(f, " {}:", source)?;
        }
        write!(f, " {}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Destination for log entries
pub trait LogSink: Send {
    fn record(&mut self, entry: LogEntry);
}

/// Keeps entries in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Entries whose message equals `message`
    pub fn find(&self, message: &str) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|entry| entry.message == message)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, entry: LogEntry) {
        self.lock().push(entry);
    }
}

/// Writes entries at or above a level to stderr, one per line
#[derive(Debug, Clone, Copy)]
pub struct StderrSink {
    min_level: LogLevel,
}

impl StderrSink {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl LogSink for StderrSink {
    fn record(&mut self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        // write failures are ignored
        let _ = writeln!(std::io::stderr().lock(), "{}", entry);
    }
}

/// Drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn record(&mut self, _entry: LogEntry) {}
}

/// Stamps a source on entries and forwards them to a sink
pub struct Logger {
    source: String,
    sink: Box<dyn LogSink>,
}

impl Logger {
    pub fn new(source: impl Into<String>, sink: Box<dyn LogSink>) -> Self {
        Self {
            source: source.into(),
            sink,
        }
    }

    /// Logger that discards everything
    pub fn null() -> Self {
        Self::new("", Box::new(NullSink))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Record an entry, filling in the source if it has none
    pub fn log(&mut self, entry: LogEntry) {
        let entry = match entry.source {
            Some(_) => entry,
            None => entry.with_source(self.source.clone()),
        };
        self.sink.record(entry);
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Debug, message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Info, message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Warn, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Error, message));
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("source", &self.source).finish()
    }
}
