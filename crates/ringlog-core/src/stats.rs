//! Statistics accumulator — per-level counters and a running mean of message
//! length over every entry ever recorded.
//!
//! The mean is updated incrementally (`avg += (len - avg) / (n + 1)`) so no
//! running sum is ever formed, and `n` is the total-ever count rather than
//! the store's retained size.

use crate::types::{LogStats, Severity};

#[derive(Debug, Default, Clone)]
pub struct StatsAccumulator {
    error_count: u64,
    warning_count: u64,
    info_count: u64,
    other_count: u64,
    total: u64,
    avg_message_length: f64,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one accepted entry.
    pub fn record(&mut self, level: Severity, message_length: usize) {
        match level {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => self.info_count += 1,
            Severity::Other(_) => self.other_count += 1,
        }

        let n = self.total as f64;
        self.avg_message_length += (message_length as f64 - self.avg_message_length) / (n + 1.0);
        self.total += 1;
    }

    /// Current aggregates. `unique_sources` comes from the source set, which
    /// the accumulator does not own.
    pub fn snapshot(&self, unique_sources: usize) -> LogStats {
        LogStats {
            error_count: self.error_count,
            warning_count: self.warning_count,
            info_count: self.info_count,
            other_count: self.other_count,
            total_ingested: self.total,
            avg_message_length: self.avg_message_length,
            unique_sources,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
