//! ringlog-feeds — log feed source adapters for ringlog.
//!
//! Each feed reads JSON lines from its source, parses them into
//! [`ringlog_core::LogEntry`] values and pushes them onto a bounded tokio
//! channel. The single task that owns the processor drains the channel.

pub mod file;
pub mod jsonl;
pub mod stdin;

use thiserror::Error;

/// Errors that end a feed early.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The receiving side of the channel was dropped.
    #[error("feed channel closed")]
    Closed,
}

/// Line counts for a drained feed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    pub sent: usize,
    /// Malformed lines and records without a message.
    pub skipped: usize,
}
