//! File feed — reads a JSON-lines file from start to end.

use std::path::PathBuf;

use ringlog_core::LogEntry;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::{jsonl, FeedError, FeedSummary};

/// Spawn a task that reads `path` into `tx`.
pub fn spawn(
    path: impl Into<PathBuf>,
    tx: mpsc::Sender<LogEntry>,
) -> JoinHandle<Result<FeedSummary, FeedError>> {
    let path = path.into();
    tokio::spawn(async move {
        let file = tokio::fs::File::open(&path).await?;
        info!(path = %path.display(), "reading feed file");
        jsonl::pump(BufReader::new(file), tx).await
    })
}
