//! Alert log — bounded record of entries that scored as anomalous.
//!
//! Every ingested entry gets an anomaly score in `0.0..=1.0` from its
//! severity and message. Entries scoring above [`ALERT_THRESHOLD`] raise an
//! [`Alert`]; the log keeps the most recent `max_alerts` of them and drops
//! the oldest past that. Alerts are never removed by store eviction.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::{ProcessorError, Result};
use crate::types::{LogEntry, Severity};

/// Scores strictly above this raise an alert.
pub const ALERT_THRESHOLD: f64 = 0.7;

/// Scores strictly above this raise a [`AlertSeverity::High`] alert.
pub const HIGH_THRESHOLD: f64 = 0.9;

/// Messages longer than this (in bytes) add to the score.
const LONG_MESSAGE: usize = 500;

/// A single word repeated more than this many times adds to the score.
const REPEATED_WORD: usize = 10;

const CRITICAL_WORDS: [&str; 4] = ["critical", "fatal", "panic", "crash"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
}

impl AlertSeverity {
    fn for_score(score: f64) -> Self {
        if score > HIGH_THRESHOLD {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// `alert-<n>`, unique for the life of the log.
    pub id: String,
    /// Id of the entry that raised it.
    pub log_id: String,
    /// The entry's timestamp, copied verbatim.
    pub timestamp: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub score: f64,
    pub acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<String>,
}

/// Anomaly score for one entry, clamped to `1.0`.
pub fn anomaly_score(entry: &LogEntry) -> f64 {
    let message = entry.message.to_lowercase();
    let mut score: f64 = match entry.level {
        Severity::Error => 0.5,
        Severity::Warning => 0.25,
        _ => 0.0,
    };

    if CRITICAL_WORDS.iter().any(|w| message.contains(w)) {
        score += 0.3;
    }
    if entry.message.len() > LONG_MESSAGE {
        score += 0.2;
    }
    if has_repeated_word(&message) {
        score += 0.2;
    }
    score.min(1.0)
}

fn has_repeated_word(message: &str) -> bool {
    let mut words: Vec<&str> = message.split_whitespace().collect();
    words.sort_unstable();
    words
        .chunk_by(|a, b| a == b)
        .any(|run| run.len() > REPEATED_WORD)
}

#[derive(Debug)]
pub struct AlertLog {
    alerts: VecDeque<Alert>,
    max_alerts: usize,
    raised: u64,
}

impl AlertLog {
    /// An empty log keeping at most `max_alerts`. Zero disables alerting.
    pub fn new(max_alerts: usize) -> Self {
        Self {
            alerts: VecDeque::new(),
            max_alerts,
            raised: 0,
        }
    }

    /// Score `entry` and record an alert if it crosses the threshold.
    pub fn observe(&mut self, entry: &LogEntry) -> Option<&Alert> {
        let score = anomaly_score(entry);
        if score <= ALERT_THRESHOLD || self.max_alerts == 0 {
            return None;
        }

        self.raised += 1;
        let alert = Alert {
            id: format!("alert-{}", self.raised),
            log_id: entry.id.clone(),
            timestamp: entry.timestamp.clone(),
            message: format!("Anomaly detected in log {} ({})", entry.id, entry.level),
            severity: AlertSeverity::for_score(score),
            score,
            acknowledged: false,
            acknowledged_at: None,
        };

        if self.alerts.len() == self.max_alerts {
            self.alerts.pop_front();
        }
        self.alerts.push_back(alert);
        self.alerts.back()
    }

    /// Up to `limit` alerts, newest first. `acknowledged` filters on the
    /// acknowledged flag when set.
    pub fn list(
        &self,
        acknowledged: Option<bool>,
        limit: usize,
    ) -> impl Iterator<Item = &Alert> {
        self.alerts
            .iter()
            .rev()
            .filter(move |a| acknowledged.map_or(true, |want| a.acknowledged == want))
            .take(limit)
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    /// Mark alert `id` acknowledged at `at`. Acknowledging twice keeps the
    /// first timestamp.
    pub fn acknowledge(&mut self, id: &str, at: impl Into<String>) -> Result<&Alert> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ProcessorError::AlertNotFound(id.to_string()))?;
        if !alert.acknowledged {
            alert.acknowledged = true;
            alert.acknowledged_at = Some(at.into());
        }
        Ok(&*alert)
    }

    /// Alerts currently held.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Alerts raised since creation, including ones since dropped.
    pub fn raised(&self) -> u64 {
        self.raised
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
        self.raised = 0;
    }
}
