//! Core types for ringlog-core.
//!
//! This module defines the data shared across all layers: the [`LogEntry`]
//! accepted by the processor, its [`Severity`], and the [`LogStats`] snapshot
//! handed back to readers.

use serde::{Deserialize, Serialize};

/// A single log record accepted by the processor.
///
/// Only `id` is validated (it must be non-empty). `timestamp` is opaque and
/// never parsed; `message` is the substring-search target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Caller-supplied identifier. Uniqueness is not checked.
    pub id: String,
    /// Opaque timestamp string.
    pub timestamp: String,
    /// Free-form message text.
    pub message: String,
    /// Originating component, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Severity, carried on the wire as the bare integer.
    pub level: Severity,
}

impl LogEntry {
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        message: impl Into<String>,
        level: impl Into<Severity>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            message: message.into(),
            source: None,
            level: level.into(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Integer severity, normalised into the three tracked levels.
///
/// `0` is an error, `1` a warning and `2` info. Every other value is kept
/// verbatim as [`Severity::Other`] and excluded from the per-level counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Other(i32),
}

impl Severity {
    /// The integer code for this severity.
    pub fn code(self) -> i32 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
            Severity::Other(code) => code,
        }
    }
}

impl From<i32> for Severity {
    fn from(code: i32) -> Self {
        match code {
            0 => Severity::Error,
            1 => Severity::Warning,
            2 => Severity::Info,
            other => Severity::Other(other),
        }
    }
}

impl From<Severity> for i32 {
    fn from(level: Severity) -> Self {
        level.code()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
            Severity::Other(code) => write!(f, "LEVEL({code})"),
        }
    }
}

/// Aggregate statistics snapshot.
///
/// The per-level counters, `total_ingested` and `avg_message_length` cover
/// every entry ever accepted since initialization, including entries the
/// store has since evicted. `unique_sources` is the source-set cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LogStats {
    pub error_count: u64,
    pub warning_count: u64,
    pub info_count: u64,
    pub other_count: u64,
    pub total_ingested: u64,
    /// Mean message length in bytes.
    pub avg_message_length: f64,
    pub unique_sources: usize,
}
