//! ringlog — bounded in-memory log ingestion buffer.
//!
//! This crate re-exports the core and feed layers so that integration tests
//! and the binary import them from one place, and hosts the CLI driver.
//!
//! # Architecture
//!
//! ```text
//! Feed (stdin | file) ──mpsc──► Processor ──► stats / search / recent
//! ```
//!
//! The feed runs on a background task; the processor is owned by the single
//! task draining the channel.

pub mod cli;

pub use ringlog_core::*;
pub use ringlog_feeds as feeds;
