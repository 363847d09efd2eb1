//! Stdin feed — reads JSON lines piped into the process.

use ringlog_core::LogEntry;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{jsonl, FeedError, FeedSummary};

/// Spawn a task that drains stdin into `tx`.
pub fn spawn(tx: mpsc::Sender<LogEntry>) -> JoinHandle<Result<FeedSummary, FeedError>> {
    tokio::spawn(async move { jsonl::pump(BufReader::new(tokio::io::stdin()), tx).await })
}
