//! JSON-lines record parsing.
//!
//! Each non-blank line is one JSON object. Only `message` is required; a
//! missing `id` gets a fresh UUID v4, a missing `timestamp` gets the current
//! UTC time in RFC 3339, and a missing `level` is inferred from the message.

use ringlog_core::{LogEntry, Severity};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{FeedError, FeedSummary};

#[derive(Debug, Deserialize)]
struct RawRecord {
    id: Option<String>,
    timestamp: Option<String>,
    message: Option<String>,
    source: Option<String>,
    level: Option<i32>,
}

/// Why a line did not produce an entry.
#[derive(Debug, PartialEq, Eq)]
pub enum LineError {
    Malformed(String),
    MissingMessage,
}

/// Best-effort severity from message keywords, case-insensitive.
pub fn infer_level(message: &str) -> Severity {
    let lower = message.to_lowercase();
    if ["error", "exception", "fail", "crash"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Severity::Error
    } else if ["warn", "timeout"].iter().any(|k| lower.contains(k)) {
        Severity::Warning
    } else {
        Severity::Info
    }
}

/// Parse one line. `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<LogEntry>, LineError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let raw: RawRecord =
        serde_json::from_str(line).map_err(|e| LineError::Malformed(e.to_string()))?;
    let message = raw.message.ok_or(LineError::MissingMessage)?;

    let level = raw
        .level
        .map(Severity::from)
        .unwrap_or_else(|| infer_level(&message));

    Ok(Some(LogEntry {
        id: raw
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        timestamp: raw
            .timestamp
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        message,
        source: raw.source.filter(|s| !s.is_empty()),
        level,
    }))
}

/// Read `reader` to EOF, sending every parsed entry on `tx`.
///
/// Bad lines are skipped and counted. Returns [`FeedError::Closed`] if the
/// receiver goes away before the reader is drained.
pub async fn pump<R>(reader: R, tx: mpsc::Sender<LogEntry>) -> Result<FeedSummary, FeedError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = FeedSummary::default();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        match parse_line(&line) {
            Ok(Some(entry)) => {
                tx.send(entry).await.map_err(|_| FeedError::Closed)?;
                summary.sent += 1;
            }
            Ok(None) => {}
            Err(LineError::Malformed(reason)) => {
                warn!(line = line_no, %reason, "skipping malformed line");
                summary.skipped += 1;
            }
            Err(LineError::MissingMessage) => {
                warn!(line = line_no, "skipping record without a message");
                summary.skipped += 1;
            }
        }
    }

    debug!(sent = summary.sent, skipped = summary.skipped, "feed drained");
    Ok(summary)
}
