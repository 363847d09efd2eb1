//! Store — in-memory ring buffer of [`LogEntry`] values.
//!
//! The store is the single owner of retained entries. It grows by doubling
//! from an initial allocation until it holds `max_entries`; past that, each
//! append evicts exactly the single oldest entry. Readers see entries oldest
//! first.

use std::collections::VecDeque;

use crate::config::BufferConfig;
use crate::error::Result;
use crate::types::LogEntry;

#[derive(Debug)]
pub struct LogStore {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl LogStore {
    /// Allocate `initial_capacity` slots up front.
    ///
    /// # Errors
    ///
    /// [`ProcessorError::AllocationFailure`](crate::ProcessorError::AllocationFailure)
    /// if the initial reservation cannot be satisfied.
    pub fn new(config: &BufferConfig) -> Result<Self> {
        let mut entries = VecDeque::new();
        entries.try_reserve_exact(config.initial_capacity)?;
        Ok(Self {
            entries,
            max_entries: config.max_entries,
        })
    }

    /// Append `entry`, returning the evicted oldest entry if the ceiling was
    /// crossed.
    ///
    /// # Errors
    ///
    /// Fails with `AllocationFailure` when the buffer needs to grow and the
    /// reservation fails. The store is left untouched in that case.
    pub fn append(&mut self, entry: LogEntry) -> Result<Option<LogEntry>> {
        if self.entries.len() == self.entries.capacity() {
            // VecDeque grows geometrically, so this doubles the allocation.
            self.entries.try_reserve(1)?;
        }
        self.entries.push_back(entry);

        if self.entries.len() > self.max_entries {
            return Ok(self.entries.pop_front());
        }
        Ok(None)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The retention ceiling.
    pub fn capacity_limit(&self) -> usize {
        self.max_entries
    }

    /// Currently allocated slots.
    pub fn allocated(&self) -> usize {
        self.entries.capacity()
    }

    /// Retained entries, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev().take(limit)
    }

    /// The most recently appended retained entry with this id.
    pub fn get(&self, id: &str) -> Option<&LogEntry> {
        self.entries.iter().rev().find(|e| e.id == id)
    }

    pub fn oldest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Drop every retained entry and release the allocation.
    pub fn clear(&mut self) {
        self.entries = VecDeque::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn entry(i: usize) -> LogEntry {
        LogEntry::new(format!("id-{i}"), "ts", format!("line {i}"), 2)
    }

    fn store(max_entries: usize, initial_capacity: usize) -> LogStore {
        LogStore::new(&BufferConfig {
            max_entries,
            initial_capacity,
            source_slots: 16,
            max_alerts: 0,
        })
        .unwrap()
    }

    fn ids(store: &LogStore) -> Vec<String> {
        store.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn allocates_initial_capacity() {
        let s = store(100, 10);
        assert!(s.allocated() >= 10);
        assert!(s.is_empty());
        assert_eq!(s.capacity_limit(), 100);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut s = store(100, 2);
        for i in 0..50 {
            assert_eq!(s.append(entry(i)).unwrap(), None);
        }
        assert_eq!(s.len(), 50);
        assert!(s.allocated() >= 50);
    }

    #[test]
    fn evicts_single_oldest_on_overflow() {
        let mut s = store(3, 3);
        for i in 0..3 {
            s.append(entry(i)).unwrap();
        }
        let evicted = s.append(entry(3)).unwrap();
        assert_eq!(evicted.map(|e| e.id), Some("id-0".to_string()));
        assert_eq!(ids(&s), ["id-1", "id-2", "id-3"]);
    }

    #[test]
    fn recent_is_newest_first() {
        let mut s = store(10, 10);
        for i in 0..5 {
            s.append(entry(i)).unwrap();
        }
        let recent: Vec<_> = s.recent(2).map(|e| e.id.as_str()).collect();
        assert_eq!(recent, ["id-4", "id-3"]);
        assert_eq!(s.recent(100).count(), 5);
        assert_eq!(s.oldest().map(|e| e.id.as_str()), Some("id-0"));
        assert_eq!(s.newest().map(|e| e.id.as_str()), Some("id-4"));
    }

    #[test]
    fn get_prefers_most_recent_duplicate() {
        let mut s = store(10, 10);
        s.append(LogEntry::new("dup", "t0", "first", 2)).unwrap();
        s.append(LogEntry::new("dup", "t1", "second", 2)).unwrap();
        assert_eq!(s.get("dup").map(|e| e.message.as_str()), Some("second"));
        assert!(s.get("missing").is_none());
    }

    #[test]
    fn clear_empties_store() {
        let mut s = store(10, 10);
        s.append(entry(0)).unwrap();
        s.clear();
        assert!(s.is_empty());
        assert!(s.iter().next().is_none());
    }

    proptest! {
        #[test]
        fn prop_len_equals_min_n_capacity(n in 0usize..300, cap in 1usize..64) {
            let mut s = store(cap, cap.min(8));
            for i in 0..n {
                s.append(entry(i)).unwrap();
            }
            prop_assert_eq!(s.len(), n.min(cap));

            // Exactly the most recent `cap` ids, oldest first.
            let expected: Vec<String> = (n.saturating_sub(cap)..n).map(|i| format!("id-{i}")).collect();
            prop_assert_eq!(ids(&s), expected);
        }
    }
}
