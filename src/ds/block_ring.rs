//! Clock-sweep ring of fixed-size byte blocks for second-chance eviction.
//!
//! Uses a fixed-size slot array and a hand pointer to evict the first
//! unreferenced block encountered. Fetches set a referenced bit that grants a
//! second chance before eviction. Every slot owns a `block_size` buffer that
//! is allocated once and overwritten in place.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           BlockRing                                  │
//!   │                                                                      │
//!   │   slots: Vec<Slot>            (len = cache_size / block_size)        │
//!   │   hand ──────────────────────────────────────────────┐               │
//!   │                                                      │               │
//!   │   index: FxHashMap<u64, usize> (key -> slot index)   │               │
//!   │   ┌─────────┬─────────┐                              ▼               │
//!   │   │  key 7  │   0     │   slot[0] = { occ:1 ref:1 }  [7 | data]      │
//!   │   │  key 9  │   1     │   slot[1] = { occ:1 ref:0 }  [9 | data]      │
//!   │   │  key 4  │   2     │   slot[2] = { occ:1 ref:1 }  [4 | data]      │
//!   │   └─────────┴─────────┘   slot[3] = { occ:0 ref:0 }  [  | data]      │
//!   │                                                                      │
//!   │   Eviction scan (hand moves forward):                                │
//!   │   [7 ref=1] -> clear ref, advance                                    │
//!   │   [9 ref=0] -> evict 9, copy new block here                          │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert Flow
//!
//! ```text
//!   insert(key, buf)
//!        │
//!        ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ Key resident?                                                        │
//!   │   YES → free its slot first (the key is re-placed by the sweep)      │
//!   │   NO  → continue                                                     │
//!   └──────────────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ At each slot from hand:                                              │
//!   │   ref=1 → clear ref, advance hand                                    │
//!   │   ref=0 → evict occupant (if any), copy buf in, advance hand         │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sweep needs at most two passes: the first pass clears every referenced
//! bit it meets, so the second pass must find an unreferenced slot.
//!
//! ## Performance Characteristics
//!
//! | Operation    | Time        | Notes                                  |
//! |--------------|-------------|----------------------------------------|
//! | `fetch`      | O(1)        | Hash lookup + bit set + block copy     |
//! | `insert`     | O(1) amort. | Sweep is O(n) worst case (two passes)  |
//! | `invalidate` | O(1)        | Hash removal + clear slot bits         |
//! | `contains`   | O(1)        | Does not set the referenced bit        |
//!
//! ## Notes
//! - Re-inserting a resident key does not overwrite in place: its slot is
//!   freed and the key goes wherever the sweep lands, possibly evicting a
//!   neighbour even though a free slot exists elsewhere.
//! - The sweep never searches for free slots; a freed slot is reused only
//!   when the hand reaches it.
//! - A ring with zero slots accepts nothing: `insert` is a no-op.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{CacheError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ClockMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ClockMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{ClockMetricsRecorder, CoreMetricsRecorder};

struct Slot {
    key: u64,
    referenced: bool,
    occupied: bool,
    data: Box<[u8]>,
}

impl Slot {
    fn new(block_size: usize) -> Self {
        Self {
            key: 0,
            referenced: false,
            occupied: false,
            data: vec![0u8; block_size].into_boxed_slice(),
        }
    }

    /// Marks the slot free. The buffer keeps its stale bytes.
    #[inline]
    fn release(&mut self) {
        self.key = 0;
        self.referenced = false;
        self.occupied = false;
    }
}

/// Fixed-size ring of byte blocks implementing the CLOCK (second-chance)
/// eviction algorithm.
///
/// Not synchronized; [`ClockCache`](crate::policy::clock::ClockCache) wraps it
/// in a mutex.
///
/// # Example
///
/// ```
/// use buffercache::ds::BlockRing;
///
/// let mut ring = BlockRing::new(2, 4);
/// ring.insert(1, &[1, 1, 1, 1]).unwrap();
/// ring.insert(2, &[2, 2, 2, 2]).unwrap();
///
/// // Fetching 1 gives it a second chance, so 2 is the victim.
/// let mut out = [0u8; 4];
/// ring.fetch(1, &mut out).unwrap();
/// assert_eq!(ring.insert(3, &[3, 3, 3, 3]), Ok(Some(2)));
/// ```
pub struct BlockRing {
    slots: Vec<Slot>,
    index: FxHashMap<u64, usize>,
    hand: usize,
    block_size: usize,
    #[cfg(feature = "metrics")]
    metrics: ClockMetrics,
}

impl BlockRing {
    /// Creates a ring of `num_blocks` zero-filled blocks of `block_size` bytes.
    pub fn new(num_blocks: usize, block_size: usize) -> Self {
        let mut slots = Vec::with_capacity(num_blocks);
        slots.resize_with(num_blocks, || Slot::new(block_size));
        Self {
            slots,
            index: FxHashMap::with_capacity_and_hasher(num_blocks, Default::default()),
            hand: 0,
            block_size,
            #[cfg(feature = "metrics")]
            metrics: ClockMetrics::default(),
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the size of every block in bytes.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the number of resident keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no key is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the slot the next sweep starts from.
    #[inline]
    pub fn hand(&self) -> usize {
        self.hand
    }

    /// Returns `true` if `key` is resident. Does not set the referenced bit.
    #[inline]
    pub fn contains(&self, key: u64) -> bool {
        self.index.contains_key(&key)
    }

    /// Copies `key`'s block into `buf` and sets its referenced bit.
    ///
    /// `buf` is untouched on error.
    pub fn fetch(&mut self, key: u64, buf: &mut [u8]) -> Result<(), CacheError> {
        self.check_len(buf.len())?;

        let Some(&idx) = self.index.get(&key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return Err(CacheError::KeyNotFound { key });
        };

        let slot = &mut self.slots[idx];
        slot.referenced = true;
        buf.copy_from_slice(&slot.data);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        Ok(())
    }

    /// Copies `buf` into the ring under `key`.
    ///
    /// Returns the key evicted by the sweep, if any. Freeing `key`'s own
    /// previous slot is not reported as an eviction.
    pub fn insert(&mut self, key: u64, buf: &[u8]) -> Result<Option<u64>, CacheError> {
        self.check_len(buf.len())?;
        if self.slots.is_empty() {
            return Ok(None);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(idx) = self.index.remove(&key) {
            self.slots[idx].release();
            trace!(key, slot = idx, "released resident block for re-insert");
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_new();
        }

        loop {
            let idx = self.hand;
            let slot = &mut self.slots[idx];
            if slot.referenced {
                slot.referenced = false;
                #[cfg(feature = "metrics")]
                self.metrics.record_ref_bit_reset();
                self.advance_hand();
                continue;
            }

            let evicted = slot.occupied.then_some(slot.key);
            slot.key = key;
            slot.occupied = true;
            slot.data.copy_from_slice(buf);

            if let Some(old) = evicted {
                self.index.remove(&old);
                trace!(key = old, slot = idx, "evicted block");
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
            self.index.insert(key, idx);
            self.advance_hand();
            return Ok(evicted);
        }
    }

    /// Frees `key`'s slot. Returns `false` if `key` was not resident.
    pub fn invalidate(&mut self, key: u64) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_invalidate_call();

        let Some(idx) = self.index.remove(&key) else {
            return false;
        };
        self.slots[idx].release();

        #[cfg(feature = "metrics")]
        self.metrics.record_invalidate_found();
        true
    }

    /// Frees every slot and rewinds the hand. Buffers stay allocated.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.release();
        }
        self.index.clear();
        self.hand = 0;

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        debug!(num_blocks = self.slots.len(), "cleared block ring");
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns a debug snapshot of slot occupancy in ring order as
    /// `(key, referenced)` pairs.
    pub fn debug_snapshot_slots(&self) -> Vec<Option<(u64, bool)>> {
        self.slots
            .iter()
            .map(|slot| slot.occupied.then_some((slot.key, slot.referenced)))
            .collect()
    }

    /// Verifies that the index, slot bits, and hand agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.slots.is_empty() {
            if self.hand != 0 {
                return Err(InvariantError::new(format!(
                    "hand {} on a ring with no slots",
                    self.hand
                )));
            }
        } else if self.hand >= self.slots.len() {
            return Err(InvariantError::new(format!(
                "hand {} out of range for {} slots",
                self.hand,
                self.slots.len()
            )));
        }

        let mut occupied = 0;
        for (idx, slot) in self.slots.iter().enumerate() {
            if slot.data.len() != self.block_size {
                return Err(InvariantError::new(format!(
                    "slot {} buffer is {} bytes, expected {}",
                    idx,
                    slot.data.len(),
                    self.block_size
                )));
            }
            if slot.occupied {
                occupied += 1;
            } else if slot.referenced || slot.key != 0 {
                return Err(InvariantError::new(format!(
                    "free slot {} not cleared (key {}, referenced {})",
                    idx, slot.key, slot.referenced
                )));
            }
        }

        if occupied != self.index.len() {
            return Err(InvariantError::new(format!(
                "{} occupied slots but {} index entries",
                occupied,
                self.index.len()
            )));
        }

        for (&key, &idx) in &self.index {
            let slot = self.slots.get(idx).ok_or_else(|| {
                InvariantError::new(format!("key {} maps to missing slot {}", key, idx))
            })?;
            if !slot.occupied || slot.key != key {
                return Err(InvariantError::new(format!(
                    "key {} maps to slot {} holding {:?}",
                    key,
                    idx,
                    slot.occupied.then_some(slot.key)
                )));
            }
        }
        Ok(())
    }

    fn check_len(&mut self, actual: usize) -> Result<(), CacheError> {
        if actual == self.block_size {
            return Ok(());
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_size_mismatch();
        debug!(expected = self.block_size, actual, "rejected buffer of wrong size");
        Err(CacheError::BufferSizeMismatch {
            expected: self.block_size,
            actual,
        })
    }

    #[inline]
    fn advance_hand(&mut self) {
        self.hand = (self.hand + 1) % self.slots.len();
        #[cfg(feature = "metrics")]
        self.metrics.record_hand_advance();
    }
}

#[cfg(feature = "metrics")]
impl BlockRing {
    /// Returns a snapshot of the ring's counters and current gauges.
    pub fn metrics_snapshot(&self) -> ClockMetricsSnapshot {
        self.metrics
            .snapshot(self.len(), self.capacity(), self.block_size)
    }

    /// Zeroes every counter.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl fmt::Debug for BlockRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRing")
            .field("capacity", &self.capacity())
            .field("block_size", &self.block_size)
            .field("len", &self.len())
            .field("hand", &self.hand)
            .finish_non_exhaustive()
    }
}
