//! Logging configuration and entry collection for autometa.
//!
//! There is no global logger. Components that log take a `&mut LogCollector`,
//! which drops entries below the configured level. The rest are either kept
//! for the caller to inspect or, with a sink attached, written out as they
//! arrive.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// Log level for filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Check if this level should log messages at the given level
    pub fn should_log(&self, level: LogLevel) -> bool {
        *self >= level
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        };
        f.pad(s)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level to output
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
    /// Component-specific log levels
    #[serde(default)]
    pub component_levels: HashMap<String, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Plain,
            component_levels: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_component_level(mut self, component: impl Into<String>, level: LogLevel) -> Self {
        self.component_levels.insert(component.into(), level);
        self
    }

    /// Get the effective log level for a component
    pub fn effective_level(&self, component: Option<&str>) -> LogLevel {
        component
            .and_then(|c| self.component_levels.get(c).copied())
            .unwrap_or(self.level)
    }

    pub fn should_log(&self, level: LogLevel, component: Option<&str>) -> bool {
        self.effective_level(component).should_log(level)
    }
}

/// A log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level,
            component: None,
            message: message.into(),
        }
    }

    pub fn with_component(
        level: LogLevel,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::new(level, message)
        }
    }

    /// Render as a single output line.
    pub fn render(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Plain => match &self.component {
                Some(c) => format!("{} {:<5} [{}] {}", self.timestamp, self.level, c, self.message),
                None => format!("{} {:<5} {}", self.timestamp, self.level, self.message),
            },
            LogFormat::Json => {
                serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
            }
        }
    }
}

/// Collects entries that pass the configured level filter.
#[derive(Default)]
pub struct LogCollector {
    config: LoggingConfig,
    entries: Vec<LogEntry>,
    sink: Option<Box<dyn Write>>,
}

impl fmt::Debug for LogCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogCollector")
            .field("config", &self.config)
            .field("entries", &self.entries)
            .field("streaming", &self.sink.is_some())
            .finish()
    }
}

impl LogCollector {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            sink: None,
        }
    }

    /// Write each accepted entry to `sink` as one rendered line instead of
    /// keeping it.
    pub fn with_sink(mut self, sink: impl Write + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Keep or write `entry` if its level passes the filter for its component.
    pub fn push(&mut self, entry: LogEntry) {
        if !self.config.should_log(entry.level, entry.component.as_deref()) {
            return;
        }
        match &mut self.sink {
            // Write errors are dropped.
            Some(sink) => {
                let _ = writeln!(sink, "{}", entry.render(self.config.format));
            }
            None => self.entries.push(entry),
        }
    }

    pub fn log(&mut self, level: LogLevel, component: &str, message: impl Into<String>) {
        self.push(LogEntry::with_component(level, component, message));
    }

    pub fn error(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Error, component, message);
    }

    pub fn warn(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Warn, component, message);
    }

    pub fn info(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Info, component, message);
    }

    pub fn debug(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Debug, component, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Rendered lines in the configured format.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|e| e.render(self.config.format))
    }

    /// Take all entries, leaving the collector empty.
    pub fn drain(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.entries)
    }
}
