//! Test builders — ergonomic constructors for `LogEntry` and `Processor`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use ringlog::{BufferConfig, LogEntry, Processor, Severity};

// ---------------------------------------------------------------------------
// LogEntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LogEntry`] test fixtures.
///
/// # Example
///
/// ```rust
/// let entry = LogEntryBuilder::new("timeout connecting to db")
///     .id("req-abc123")
///     .level(0)
///     .source("api-7f9b4d")
///     .build();
/// ```
pub struct LogEntryBuilder {
    id: String,
    timestamp: String,
    message: String,
    source: Option<String>,
    level: Severity,
}

impl LogEntryBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: "test-id".to_string(),
            timestamp: "2024-01-15T10:00:00Z".to_string(),
            message: message.into(),
            source: None,
            level: Severity::Info,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = Severity::from(level);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn build(self) -> LogEntry {
        LogEntry {
            id: self.id,
            timestamp: self.timestamp,
            message: self.message,
            source: self.source,
            level: self.level,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Build an entry with a given id and message at INFO.
pub fn info_entry(id: &str, message: &str) -> LogEntry {
    LogEntryBuilder::new(message).id(id).level(2).build()
}

/// Build an ERROR entry.
pub fn error_entry(id: &str, message: &str) -> LogEntry {
    LogEntryBuilder::new(message).id(id).level(0).build()
}

/// Entry `i` of a numbered sequence: id `id-{i}`, message `log line {i}`.
pub fn seq_entry(i: usize) -> LogEntry {
    LogEntryBuilder::new(format!("log line {i}"))
        .id(format!("id-{i}"))
        .build()
}

/// A processor that has already been initialized with the given ceiling.
pub fn ready_processor(max_entries: usize) -> Processor {
    let mut processor = Processor::new(BufferConfig::with_max_entries(max_entries));
    processor
        .initialize()
        .expect("test processor must initialize");
    processor
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// Build a corpus of `n` entries: 10% ERROR, 20% WARNING, the rest INFO,
/// spread across three sources.
pub fn build_corpus(n: usize) -> Vec<LogEntry> {
    (0..n)
        .map(|i| {
            let level = match i % 10 {
                0 => 0,
                1 | 2 => 1,
                _ => 2,
            };
            LogEntryBuilder::new(format!("log line {i}"))
                .id(format!("id-{i}"))
                .level(level)
                .source(format!("producer-{}", i % 3))
                .build()
        })
        .collect()
}
