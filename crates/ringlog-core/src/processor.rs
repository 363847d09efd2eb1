//! Processor — composes the store, the statistics accumulator, the source
//! set and the alert log.
//!
//! [`LogBuffer`] is the owned context: holding one means the buffer is ready,
//! so its methods cannot fail on lifecycle grounds. [`Processor`] wraps an
//! optional buffer behind an explicit `initialize` / `teardown` lifecycle for
//! callers that hold a long-lived handle. [`SharedProcessor`] adds a lock
//! around the whole unit for callers that need to share one across threads.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::alerts::{Alert, AlertLog};
use crate::config::BufferConfig;
use crate::error::{ProcessorError, Result};
use crate::search;
use crate::sources::{SourceInsert, SourceSet};
use crate::stats::StatsAccumulator;
use crate::store::LogStore;
use crate::types::{LogEntry, LogStats};

// ---------------------------------------------------------------------------
// LogBuffer
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LogBuffer {
    store: LogStore,
    stats: StatsAccumulator,
    sources: SourceSet,
    alerts: AlertLog,
}

impl LogBuffer {
    /// Validate `config` and perform the initial allocation.
    pub fn new(config: &BufferConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: LogStore::new(config)?,
            stats: StatsAccumulator::new(),
            sources: SourceSet::with_slots(config.source_slots)?,
            alerts: AlertLog::new(config.max_alerts),
        })
    }

    /// Accept one entry.
    ///
    /// The store append runs first; if it fails, neither the statistics, the
    /// source set nor the alert log are touched.
    pub fn ingest_one(&mut self, entry: LogEntry) -> Result<()> {
        if entry.id.is_empty() {
            return Err(ProcessorError::InvalidArgument("id"));
        }

        let level = entry.level;
        let message_length = entry.message.len();
        let source = entry.source.clone();

        if let Some(evicted) = self.store.append(entry)? {
            debug!(id = %evicted.id, level = %evicted.level, "evicted oldest entry");
        }

        self.stats.record(level, message_length);

        if let Some(source) = source.as_deref() {
            match self.sources.insert(source) {
                SourceInsert::Inserted if self.sources.is_exhausted() => warn!(
                    slots = self.sources.slot_count(),
                    source, "source set full; new sources are no longer tracked"
                ),
                SourceInsert::Exhausted => {
                    debug!(source, dropped = self.sources.dropped(), "source not tracked")
                }
                _ => {}
            }
        }

        if let Some(alert) = self.store.newest().and_then(|e| self.alerts.observe(e)) {
            info!(
                alert = %alert.id,
                log_id = %alert.log_id,
                score = alert.score,
                "anomaly alert raised"
            );
        }
        Ok(())
    }

    /// Best-effort batch: every entry is attempted and the last failure, if
    /// any, is returned.
    pub fn ingest_many<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = LogEntry>,
    {
        let mut last = Ok(());
        for entry in entries {
            if let Err(e) = self.ingest_one(entry) {
                debug!(error = %e, "batch entry rejected");
                last = Err(e);
            }
        }
        last
    }

    pub fn stats(&self) -> LogStats {
        self.stats.snapshot(self.sources.count())
    }

    pub fn search(&self, pattern: &str, max_results: usize) -> Vec<String> {
        search::find(&self.store, pattern, max_results)
    }

    pub fn search_entries<'a>(
        &'a self,
        pattern: &'a str,
        max_results: usize,
    ) -> impl Iterator<Item = &'a LogEntry> + 'a {
        search::find_entries(&self.store, pattern, max_results)
    }

    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &LogEntry> {
        self.store.recent(limit)
    }

    /// Up to `limit` alerts, newest first, optionally filtered on the
    /// acknowledged flag.
    pub fn alerts(
        &self,
        acknowledged: Option<bool>,
        limit: usize,
    ) -> impl Iterator<Item = &Alert> {
        self.alerts.list(acknowledged, limit)
    }

    pub fn acknowledge_alert(&mut self, id: &str, at: impl Into<String>) -> Result<&Alert> {
        self.alerts.acknowledge(id, at)
    }

    pub fn alert_log(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    Uninitialized,
    Ready,
}

/// Lifecycle facade over a [`LogBuffer`].
///
/// ```
/// use ringlog_core::{BufferConfig, LogEntry, Processor};
///
/// let mut processor = Processor::new(BufferConfig::default());
/// processor.initialize()?;
/// processor.ingest_one(LogEntry::new("1", "2024-01-01T00:00:00Z", "disk full", 0))?;
/// assert_eq!(processor.stats()?.error_count, 1);
/// assert_eq!(processor.search("disk", 10), ["1"]);
/// processor.teardown();
/// # Ok::<(), ringlog_core::ProcessorError>(())
/// ```
#[derive(Debug)]
pub struct Processor {
    config: BufferConfig,
    buffer: Option<LogBuffer>,
}

impl Processor {
    /// A processor in the `Uninitialized` state. Nothing is allocated until
    /// [`Processor::initialize`].
    pub fn new(config: BufferConfig) -> Self {
        Self { config, buffer: None }
    }

    pub fn state(&self) -> ProcessorState {
        match self.buffer {
            Some(_) => ProcessorState::Ready,
            None => ProcessorState::Uninitialized,
        }
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// `Uninitialized -> Ready`. On failure the state is unchanged.
    pub fn initialize(&mut self) -> Result<()> {
        if self.buffer.is_some() {
            return Err(ProcessorError::AlreadyInitialized);
        }
        self.buffer = Some(LogBuffer::new(&self.config)?);
        info!(
            max_entries = self.config.max_entries,
            source_slots = self.config.source_slots,
            "processor initialized"
        );
        Ok(())
    }

    pub fn ingest_one(&mut self, entry: LogEntry) -> Result<()> {
        self.ready_mut()?.ingest_one(entry)
    }

    pub fn ingest_many<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = LogEntry>,
    {
        self.ready_mut()?.ingest_many(entries)
    }

    pub fn stats(&self) -> Result<LogStats> {
        Ok(self.ready()?.stats())
    }

    /// Matching ids. Empty (not an error) outside `Ready`.
    pub fn search(&self, pattern: &str, max_results: usize) -> Vec<String> {
        self.buffer
            .as_ref()
            .map(|b| b.search(pattern, max_results))
            .unwrap_or_default()
    }

    /// Up to `limit` retained entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        Ok(self.ready()?.recent(limit).cloned().collect())
    }

    pub fn alerts(&self, acknowledged: Option<bool>, limit: usize) -> Result<Vec<Alert>> {
        Ok(self.ready()?.alerts(acknowledged, limit).cloned().collect())
    }

    /// Mark alert `id` acknowledged at the caller-supplied time `at`.
    pub fn acknowledge_alert(&mut self, id: &str, at: impl Into<String>) -> Result<Alert> {
        self.ready_mut()?.acknowledge_alert(id, at).cloned()
    }

    /// The ready buffer, for read paths that want borrowed entries.
    pub fn buffer(&self) -> Option<&LogBuffer> {
        self.buffer.as_ref()
    }

    /// `Ready -> Uninitialized`, dropping every owned entry, source name and
    /// counter. A no-op when already uninitialized.
    pub fn teardown(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            info!(retained = buffer.len(), "processor torn down");
        }
    }

    fn ready(&self) -> Result<&LogBuffer> {
        self.buffer.as_ref().ok_or(ProcessorError::NotInitialized)
    }

    fn ready_mut(&mut self) -> Result<&mut LogBuffer> {
        self.buffer.as_mut().ok_or(ProcessorError::NotInitialized)
    }
}

// ---------------------------------------------------------------------------
// SharedProcessor
// ---------------------------------------------------------------------------

/// A [`Processor`] behind one lock. Each call holds the lock for its whole
/// duration, so a stats read never observes a half-applied ingest.
#[derive(Debug, Clone)]
pub struct SharedProcessor {
    inner: Arc<Mutex<Processor>>,
}

impl SharedProcessor {
    pub fn new(processor: Processor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(processor)),
        }
    }

    pub fn initialize(&self) -> Result<()> {
        self.inner.lock().initialize()
    }

    pub fn ingest_one(&self, entry: LogEntry) -> Result<()> {
        self.inner.lock().ingest_one(entry)
    }

    pub fn ingest_many<I>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = LogEntry>,
    {
        self.inner.lock().ingest_many(entries)
    }

    pub fn stats(&self) -> Result<LogStats> {
        self.inner.lock().stats()
    }

    pub fn search(&self, pattern: &str, max_results: usize) -> Vec<String> {
        self.inner.lock().search(pattern, max_results)
    }

    pub fn alerts(&self, acknowledged: Option<bool>, limit: usize) -> Result<Vec<Alert>> {
        self.inner.lock().alerts(acknowledged, limit)
    }

    pub fn acknowledge_alert(&self, id: &str, at: impl Into<String>) -> Result<Alert> {
        self.inner.lock().acknowledge_alert(id, at)
    }

    pub fn teardown(&self) {
        self.inner.lock().teardown();
    }

    /// Run `f` with exclusive access to the processor.
    pub fn with<R>(&self, f: impl FnOnce(&mut Processor) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
