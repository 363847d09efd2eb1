//! ringlog-core — bounded in-memory log buffer.
//!
//! This crate exposes the processing layers as public modules, plus the
//! shared types used across all of them.
//!
//! # Architecture
//!
//! ```text
//!            ┌──► Store ──► Search
//! Processor ─┼──► Stats
//!            ├──► Sources
//!            └──► Alerts
//! ```
//!
//! Statistics and alerts cover every entry ever ingested; the store and
//! search only see the retained window.

pub mod alerts;
pub mod config;
pub mod error;
pub mod processor;
pub mod search;
pub mod sources;
pub mod stats;
pub mod store;
pub mod types;

pub use alerts::{Alert, AlertLog, AlertSeverity};
pub use config::{BufferConfig, Config};
pub use error::{ProcessorError, Result};
pub use processor::{LogBuffer, Processor, ProcessorState, SharedProcessor};
pub use sources::{SourceInsert, SourceSet};
pub use stats::StatsAccumulator;
pub use store::LogStore;
pub use types::{LogEntry, LogStats, Severity};
