//! Thread-safe Clock buffer cache.
//!
//! Implements the Clock algorithm (also known as Second-Chance) over a fixed
//! number of fixed-size byte blocks. It approximates LRU with O(1) fetches by
//! avoiding list manipulation on access.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                              ClockCache Layout                              │
//! │                                                                             │
//! │   inner: parking_lot::Mutex<BlockRing>                                      │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  index: FxHashMap<u64, usize>     (key -> slot index)               │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  slots: Vec<Slot>                 (circular buffer)                 │   │
//! │   │                                                                     │   │
//! │   │    [0]     [1]     [2]     [3]     [4]     [5]     [6]     [7]      │   │
//! │   │   ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐    │   │
//! │   │   │ A │   │ B │   │ C │   │ D │   │ E │   │   │   │   │   │   │    │   │
//! │   │   │ref│   │ref│   │   │   │ref│   │   │   │   │   │   │   │   │    │   │
//! │   │   └───┘   └───┘   └───┘   └───┘   └───┘   └───┘   └───┘   └───┘    │   │
//! │   │                     ▲                                               │   │
//! │   │                   hand (clock pointer)                              │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   On fetch: set referenced bit, copy block out                              │
//! │   On insert: sweep from hand, clear ref bits, evict first unreferenced      │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sizing
//!
//! The number of blocks is `cache_size / block_size`, rounded down. A
//! remainder smaller than one block is simply unused. Every block buffer is
//! allocated up front and reused for the lifetime of the cache.
//!
//! ## Concurrency
//!
//! Every operation takes the same [`parking_lot::Mutex`] for its whole
//! duration. The lock does not poison, so a panicking caller never wedges
//! other threads. Callers only ever see copies of block data.
//!
//! ## Example Usage
//!
//! ```
//! use buffercache::policy::clock::ClockCache;
//! use buffercache::traits::BufferCache;
//!
//! let cache = ClockCache::new(2 * 10, 10);
//! let block = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
//!
//! cache.insert(1, &block).unwrap();
//!
//! let mut out = [0u8; 10];
//! cache.fetch(1, &mut out).unwrap();
//! assert_eq!(out, block);
//!
//! cache.invalidate(1).unwrap();
//! assert!(cache.fetch(1, &mut out).unwrap_err().is_not_found());
//! ```

use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

use crate::builder::ClockCacheBuilder;
use crate::ds::BlockRing;
use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ClockMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::traits::{BufferCache, ConcurrentCache};

/// Fixed-capacity block cache with Clock eviction, safe to share across
/// threads.
///
/// # Example
///
/// ```
/// use buffercache::policy::clock::ClockCache;
/// use buffercache::traits::BufferCache;
///
/// let cache = ClockCache::new(1024 * 1024, 1024);
/// assert_eq!(cache.capacity(), 1024);
/// assert_eq!(cache.block_size(), 1024);
/// assert!(cache.is_empty());
/// ```
pub struct ClockCache {
    inner: Mutex<BlockRing>,
    capacity: usize,
    block_size: usize,
}

impl ClockCache {
    /// Creates a cache holding `cache_size / block_size` blocks.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero or `cache_size` is smaller than one
    /// block. For a non-panicking alternative, use [`try_new`](Self::try_new).
    pub fn new(cache_size: usize, block_size: usize) -> Self {
        match Self::try_new(cache_size, block_size) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error on invalid sizing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `block_size` is zero or fewer than one
    /// block fits in `cache_size`.
    ///
    /// # Example
    ///
    /// ```
    /// use buffercache::policy::clock::ClockCache;
    ///
    /// // 10 bytes of remainder are dropped.
    /// let cache = ClockCache::try_new(4106, 1024).unwrap();
    /// assert_eq!(cache.capacity(), 4);
    ///
    /// assert!(ClockCache::try_new(1000, 1024).is_err());
    /// ```
    pub fn try_new(cache_size: usize, block_size: usize) -> Result<Self, ConfigError> {
        if block_size == 0 {
            return Err(ConfigError::new("block size must be greater than zero"));
        }
        let num_blocks = cache_size / block_size;
        if num_blocks == 0 {
            return Err(ConfigError::new(format!(
                "cache size {} holds no block of {} bytes",
                cache_size, block_size
            )));
        }

        debug!(num_blocks, block_size, "allocating clock cache");
        Ok(Self {
            inner: Mutex::new(BlockRing::new(num_blocks, block_size)),
            capacity: num_blocks,
            block_size,
        })
    }

    /// Returns a builder for configuring cache sizing.
    ///
    /// # Example
    ///
    /// ```
    /// use buffercache::policy::clock::ClockCache;
    ///
    /// let cache = ClockCache::builder(4096).num_blocks(16).build();
    /// assert_eq!(cache.capacity(), 16);
    /// ```
    pub fn builder(block_size: usize) -> ClockCacheBuilder {
        ClockCacheBuilder::new(block_size)
    }

    /// Returns the number of blocks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of resident keys.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if no key is resident.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns `true` if `key` is resident. Does not count as an access.
    pub fn contains(&self, key: u64) -> bool {
        self.inner.lock().contains(key)
    }

    /// Returns the slot the next eviction sweep starts from.
    pub fn hand(&self) -> usize {
        self.inner.lock().hand()
    }

    /// Drops every resident key. Block buffers stay allocated.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Verifies the internal index and slot state agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

#[cfg(feature = "metrics")]
impl ClockCache {
    /// Returns a snapshot of the cache's counters and current gauges.
    pub fn metrics_snapshot(&self) -> ClockMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }

    /// Zeroes every counter.
    pub fn reset_metrics(&self) {
        self.inner.lock().reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<ClockMetricsSnapshot> for ClockCache {
    fn snapshot(&self) -> ClockMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl BufferCache for ClockCache {
    fn fetch(&self, key: u64, buf: &mut [u8]) -> Result<(), CacheError> {
        self.inner.lock().fetch(key, buf)
    }

    fn insert(&self, key: u64, buf: &[u8]) -> Result<(), CacheError> {
        self.inner.lock().insert(key, buf).map(|_| ())
    }

    fn invalidate(&self, key: u64) -> Result<(), CacheError> {
        self.inner.lock().invalidate(key);
        Ok(())
    }

    #[inline]
    fn block_size(&self) -> usize {
        self.block_size
    }
}

impl ConcurrentCache for ClockCache {}

impl fmt::Debug for ClockCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockCache")
            .field("capacity", &self.capacity)
            .field("block_size", &self.block_size)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
