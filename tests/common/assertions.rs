//! Domain-specific assertion macros for ringlog harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* buffer invariant was violated.

use ringlog::{LogStats, Processor};

// ---------------------------------------------------------------------------
// Retained window assertions
// ---------------------------------------------------------------------------

/// Assert the processor retains exactly these ids, oldest first.
///
/// ```rust
/// assert_retained!(processor, ["id-1", "id-2"]);
/// ```
#[macro_export]
macro_rules! assert_retained {
    ($processor:expr, $ids:expr) => {{
        let processor: &ringlog::Processor = &$processor;
        let actual: Vec<String> = $crate::common::retained_ids(processor);
        let expected: Vec<String> = $ids.iter().map(|s| s.to_string()).collect();
        pretty_assertions::assert_eq!(actual, expected, "assert_retained! failed");
    }};
}

/// Assert that every id in a search result names a retained entry whose
/// message contains the pattern.
#[macro_export]
macro_rules! assert_matches_retained {
    ($processor:expr, $pattern:expr, $ids:expr) => {{
        let processor: &ringlog::Processor = &$processor;
        let pattern: &str = $pattern;
        let buffer = processor
            .buffer()
            .expect("assert_matches_retained! needs a ready processor");
        for id in $ids.iter() {
            match buffer.store().get(id) {
                Some(entry) if entry.message.contains(pattern) => {}
                Some(entry) => panic!(
                    "assert_matches_retained! failed: {:?} does not contain {:?}\n  message: {:?}",
                    id, pattern, entry.message
                ),
                None => panic!(
                    "assert_matches_retained! failed: {:?} is not a retained entry",
                    id
                ),
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Retained ids, oldest first. Empty when the processor is not ready.
pub fn retained_ids(processor: &Processor) -> Vec<String> {
    processor
        .buffer()
        .map(|b| b.store().iter().map(|e| e.id.clone()).collect())
        .unwrap_or_default()
}

/// Assert the mean message length is within `1e-9` of `expected`.
pub fn assert_avg_close(stats: &LogStats, expected: f64) {
    let diff = (stats.avg_message_length - expected).abs();
    assert!(
        diff < 1e-9,
        "avg_message_length off by {diff}: expected {expected}, got {}",
        stats.avg_message_length
    );
}
