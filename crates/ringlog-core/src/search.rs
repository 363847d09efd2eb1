//! Search layer — linear substring scan over the retained window.
//!
//! Matching is exact, case-sensitive substring containment on
//! [`LogEntry::message`]. Results follow retained order (oldest first) and
//! the scan stops as soon as `max_results` matches are collected. An empty
//! pattern matches every message.

use crate::store::LogStore;
use crate::types::LogEntry;

/// Retained entries whose message contains `pattern`, at most `max_results`.
pub fn find_entries<'a>(
    store: &'a LogStore,
    pattern: &'a str,
    max_results: usize,
) -> impl Iterator<Item = &'a LogEntry> + 'a {
    store
        .iter()
        .filter(move |e| e.message.contains(pattern))
        .take(max_results)
}

/// Ids of matching entries, in retained order.
pub fn find(store: &LogStore, pattern: &str, max_results: usize) -> Vec<String> {
    find_entries(store, pattern, max_results)
        .map(|e| e.id.clone())
        .collect()
}
