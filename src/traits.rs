//! # Buffer Cache Capability Contract
//!
//! This module defines the interface an owner (a storage or I/O layer) uses to
//! talk to a block cache, independent of the replacement policy behind it.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────┐
//!   │                    BufferCache                           │
//!   │                                                          │
//!   │  fetch(&, u64, &mut [u8]) → Result<(), CacheError>       │
//!   │  insert(&, u64, &[u8])    → Result<(), CacheError>       │
//!   │  invalidate(&, u64)       → Result<(), CacheError>       │
//!   │  block_size(&)            → usize                        │
//!   └──────────────────────────┬───────────────────────────────┘
//!                              │
//!                              ▼
//!                  ┌───────────────────────┐
//!                  │      ClockCache       │   (Mutex<BlockRing>)
//!                  └───────────────────────┘
//! ```
//!
//! ## Copy Semantics
//!
//! Callers never see the cache's internal buffers. `insert` copies the
//! caller's bytes into a slot and `fetch` copies them back out, so mutating a
//! source buffer after `insert` (or a destination buffer after `fetch`) never
//! changes cached contents.
//!
//! ## Thread Safety
//!
//! All methods take `&self`; implementations synchronize internally. The
//! [`ConcurrentCache`] marker identifies implementations that are safe to
//! share across threads.

use crate::error::CacheError;

/// Fixed-block-size cache keyed by a 64-bit integer.
///
/// Every buffer passed in or out must be exactly [`block_size`](Self::block_size)
/// bytes long; anything else is rejected with
/// [`CacheError::BufferSizeMismatch`].
///
/// # Example
///
/// ```
/// use buffercache::policy::clock::ClockCache;
/// use buffercache::traits::BufferCache;
///
/// fn warm<C: BufferCache>(cache: &C, blocks: &[(u64, Vec<u8>)]) {
///     for (key, data) in blocks {
///         cache.insert(*key, data).unwrap();
///     }
/// }
///
/// let cache = ClockCache::new(4 * 8, 8);
/// warm(&cache, &[(1, vec![1; 8]), (2, vec![2; 8])]);
///
/// let mut out = [0u8; 8];
/// cache.fetch(2, &mut out).unwrap();
/// assert_eq!(out, [2; 8]);
/// ```
pub trait BufferCache {
    /// Copies the block stored under `key` into `buf`.
    ///
    /// Marks the block as recently used. On a miss `buf` is left untouched and
    /// [`CacheError::KeyNotFound`] is returned.
    fn fetch(&self, key: u64, buf: &mut [u8]) -> Result<(), CacheError>;

    /// Copies `buf` into the cache under `key`, evicting another block if the
    /// cache is full.
    fn insert(&self, key: u64, buf: &[u8]) -> Result<(), CacheError>;

    /// Drops `key` from the cache. Invalidating a non-resident key succeeds.
    fn invalidate(&self, key: u64) -> Result<(), CacheError>;

    /// Returns the size in bytes of every block.
    fn block_size(&self) -> usize;
}

/// Marker trait for caches that are safe to share across threads.
///
/// # Example
///
/// ```
/// use buffercache::policy::clock::ClockCache;
/// use buffercache::traits::{BufferCache, ConcurrentCache};
///
/// fn share<C: BufferCache + ConcurrentCache + 'static>(cache: std::sync::Arc<C>) {
///     let handle = std::thread::spawn(move || cache.invalidate(1));
///     handle.join().unwrap().unwrap();
/// }
///
/// share(std::sync::Arc::new(ClockCache::new(64, 16)));
/// ```
pub trait ConcurrentCache: Send + Sync {}
