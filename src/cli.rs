//! Command-line driver: wires one feed into a [`Processor`] and renders the
//! requested view as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ringlog_core::{BufferConfig, Config, LogEntry, Processor};
use ringlog_feeds::{file, stdin, FeedSummary};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "ringlog", about = "Bounded in-memory log buffer with stats and search")]
pub struct Cli {
    /// Read JSON lines from this file instead of stdin.
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Override `buffer.max_entries` from the config file.
    #[arg(long, global = true)]
    pub max_entries: Option<usize>,

    /// Write debug logs to ringlog-debug.log in the temp directory.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate statistics over everything ingested.
    Stats,
    /// Retained entries whose message contains PATTERN.
    Search {
        pattern: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// The most recently retained entries, newest first.
    Recent {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Alerts raised by anomalous entries, newest first.
    Alerts {
        /// Only alerts whose acknowledged flag matches.
        #[arg(long)]
        acknowledged: Option<bool>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Run with the user's config file (created with defaults if missing).
pub async fn run(cli: &Cli) -> anyhow::Result<Value> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default config");
        Config::defaults()
    });
    run_with_config(cli, config).await
}

pub async fn run_with_config(cli: &Cli, mut config: Config) -> anyhow::Result<Value> {
    if let Some(max_entries) = cli.max_entries {
        config.buffer = BufferConfig {
            max_entries,
            initial_capacity: config.buffer.initial_capacity.min(max_entries),
            ..config.buffer
        };
    }

    let mut processor = Processor::new(config.buffer.clone());
    processor.initialize()?;

    let (tx, mut rx) = mpsc::channel::<LogEntry>(config.feed.channel_capacity.max(1));
    let feed = match &cli.file {
        Some(path) => file::spawn(path.clone(), tx),
        None => stdin::spawn(tx),
    };

    let mut rejected = 0usize;
    while let Some(entry) = rx.recv().await {
        if let Err(e) = processor.ingest_one(entry) {
            warn!(error = %e, code = e.code(), "entry rejected");
            rejected += 1;
        }
    }
    let summary: FeedSummary = feed.await??;

    let default_limit = config.search.default_limit;
    let output = match &cli.command {
        Command::Stats => json!({
            "stats": processor.stats()?,
            "retained": processor.buffer().map_or(0, |b| b.len()),
            "skipped_lines": summary.skipped,
            "rejected": rejected,
        }),
        Command::Search { pattern, limit } => {
            let limit = limit.unwrap_or(default_limit);
            let logs: Vec<&LogEntry> = processor
                .buffer()
                .map(|b| b.search_entries(pattern, limit).collect())
                .unwrap_or_default();
            json!({ "count": logs.len(), "logs": logs })
        }
        Command::Recent { limit } => {
            let logs = processor.recent(limit.unwrap_or(default_limit))?;
            json!({ "count": logs.len(), "logs": logs })
        }
        Command::Alerts { acknowledged, limit } => {
            let alerts = processor.alerts(*acknowledged, limit.unwrap_or(default_limit))?;
            json!({
                "count": alerts.len(),
                "raised": processor.buffer().map_or(0, |b| b.alert_log().raised()),
                "alerts": alerts,
            })
        }
    };

    processor.teardown();
    Ok(output)
}
