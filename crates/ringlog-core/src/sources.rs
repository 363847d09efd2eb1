//! Source set — bounded tracking of distinct source names.
//!
//! A fixed-size open-addressed table with linear probing. The slot count is a
//! power of two and doubles as the ceiling on distinct sources: once every
//! slot is taken, new names are dropped and the set reports itself exhausted.
//! Names are never removed by store eviction; only [`SourceSet::clear`]
//! releases them.

use crate::error::Result;

/// Outcome of [`SourceSet::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceInsert {
    /// The name was new and now occupies a slot.
    Inserted,
    /// The name was already tracked.
    Present,
    /// The name was new but every slot is taken; it was not recorded.
    Exhausted,
}

#[derive(Debug)]
pub struct SourceSet {
    slots: Box<[Option<Box<str>>]>,
    occupied: usize,
    dropped: u64,
}

/// DJB2: `h = h * 33 + byte`, seeded at 5381, wrapping at 32 bits.
fn djb2(name: &str) -> u32 {
    name.bytes()
        .fold(5381u32, |h, b| h.wrapping_mul(33).wrapping_add(u32::from(b)))
}

impl SourceSet {
    /// Create an empty set with `slots` slots.
    ///
    /// `slots` is expected to be a power of two (see
    /// [`BufferConfig::validate`](crate::config::BufferConfig::validate)); a
    /// zero-slot set is valid and is exhausted from the start. Fails with
    /// `AllocationFailure` if the table cannot be allocated.
    pub fn with_slots(slots: usize) -> Result<Self> {
        let mut table = Vec::new();
        table.try_reserve_exact(slots)?;
        table.resize(slots, None);
        Ok(Self {
            slots: table.into_boxed_slice(),
            occupied: 0,
            dropped: 0,
        })
    }

    /// Record `name`, probing linearly from its hash slot.
    pub fn insert(&mut self, name: &str) -> SourceInsert {
        let len = self.slots.len();
        if len == 0 {
            self.dropped += 1;
            return SourceInsert::Exhausted;
        }

        let start = djb2(name) as usize % len;
        let mut index = start;
        loop {
            match &self.slots[index] {
                Some(existing) if &**existing == name => return SourceInsert::Present,
                Some(_) => {
                    index = (index + 1) % len;
                    if index == start {
                        self.dropped += 1;
                        return SourceInsert::Exhausted;
                    }
                }
                None => {
                    self.slots[index] = Some(name.into());
                    self.occupied += 1;
                    return SourceInsert::Inserted;
                }
            }
        }
    }

    /// `true` if `name` was newly inserted.
    pub fn contains_or_insert(&mut self, name: &str) -> bool {
        self.insert(name) == SourceInsert::Inserted
    }

    pub fn contains(&self, name: &str) -> bool {
        let len = self.slots.len();
        if len == 0 {
            return false;
        }
        let start = djb2(name) as usize % len;
        let mut index = start;
        while let Some(existing) = &self.slots[index] {
            if &**existing == name {
                return true;
            }
            index = (index + 1) % len;
            if index == start {
                break;
            }
        }
        false
    }

    /// Number of occupied slots, i.e. distinct sources tracked.
    pub fn count(&self) -> usize {
        self.occupied
    }

    /// Maximum number of distinct sources this set can hold.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Insert attempts rejected because the table was full. A name that
    /// arrives again while the table is still full counts again.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Release every stored name and reset the counters.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.occupied = 0;
        self.dropped = 0;
    }
}
