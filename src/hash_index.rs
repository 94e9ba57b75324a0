use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordCountError};

/// Multiplier of the polynomial word hash
pub const HASH_BASE: u64 = 257;

/// Above this fill ratio a resizable index doubles before the next insert
const MAX_LOAD_FACTOR: f64 = 0.75;

/// Polynomial hash over the word bytes, base 257, wrapping on overflow.
/// The index reduces it modulo its capacity.
pub fn word_hash(word: &[u8]) -> u64 {
    word.iter()
        .fold(0u64, |h, &b| h.wrapping_mul(HASH_BASE).wrapping_add(u64::from(b)))
}

/// How the index reacts when it fills up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Double the slot count and rehash once the load factor passes 0.75
    #[default]
    Resizable,
    /// Never resize. Inserting into a full index fails with `CapacityExceeded`
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    /// Position of the entry in the owner's backing vector
    Occupied(usize),
}

/// Open addressing index from a hash to a position in some external vector.
///
/// The index never stores keys. Callers pass a matcher that compares the
/// candidate position against their own storage, so a single flat `Vec<Slot>`
/// is all that lives here. Collisions move on to the next slot (+1,
/// wrapping). There is no deletion, hence no tombstones: an empty slot always
/// ends a search.
#[derive(Debug)]
pub struct HashIndex {
    slots: Vec<Slot>,
    // Number of occupied slots
    size: usize,
    policy: IndexPolicy,
}

impl HashIndex {
    /// Creates an empty index with exactly `capacity` slots (at least one)
    pub fn new(capacity: usize, policy: IndexPolicy) -> Self {
        let capacity = capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize(capacity, Slot::Empty);
        Self {
            slots,
            size: 0,
            policy,
        }
    }

    fn home_slot(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Scans from the home slot of `hash` until an empty slot (not found) or a
    /// position accepted by `is_match`.
    pub fn find(&self, hash: u64, mut is_match: impl FnMut(usize) -> bool) -> Option<usize> {
        let capacity = self.slots.len();
        let mut slot_i = self.home_slot(hash);
        // A completely full fixed index has no empty slot to stop at
        for _ in 0..capacity {
            match self.slots[slot_i] {
                Slot::Empty => return None,
                Slot::Occupied(position) if is_match(position) => return Some(position),
                Slot::Occupied(_) => slot_i = (slot_i + 1) % capacity,
            }
        }
        None
    }

    /// Records `position` in the first empty slot at or after the home slot of `hash`.
    /// The caller guarantees the key is not already present.
    pub fn insert(&mut self, hash: u64, position: usize) -> Result<()> {
        let capacity = self.slots.len();
        let mut slot_i = self.home_slot(hash);
        for _ in 0..capacity {
            if self.slots[slot_i] == Slot::Empty {
                self.slots[slot_i] = Slot::Occupied(position);
                self.size += 1;
                return Ok(());
            }
            slot_i = (slot_i + 1) % capacity;
        }
        Err(WordCountError::CapacityExceeded { capacity })
    }

    /// True when the next insert should happen on a larger index
    pub fn needs_growth(&self) -> bool {
        self.policy == IndexPolicy::Resizable
            && (self.size + 1) as f64 > MAX_LOAD_FACTOR * self.slots.len() as f64
    }

    /// Drops every slot and reallocates with `capacity` slots.
    /// Positions must be re-inserted by the owner afterwards.
    pub fn reset(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        self.slots.clear();
        self.slots.resize(capacity, Slot::Empty);
        self.size = 0;
    }

    /// Empties every slot, keeping the current capacity
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.size = 0;
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Returns the number of occupied slots
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
