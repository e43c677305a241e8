//! Sizing builder for [`ClockCache`].
//!
//! A cache is described by its block size plus either a total byte budget or
//! a block count. Byte budgets are floor-divided by the block size.
//!
//! ## Example
//!
//! ```rust
//! use buffercache::builder::ClockCacheBuilder;
//!
//! let cache = ClockCacheBuilder::new(4096).cache_size(4 * 1024 * 1024).build();
//! assert_eq!(cache.capacity(), 1024);
//!
//! let small = ClockCacheBuilder::new(512).num_blocks(8).try_build().unwrap();
//! assert_eq!(small.capacity(), 8);
//! ```

use crate::error::ConfigError;
use crate::policy::clock::ClockCache;

/// Block count used when neither a cache size nor a block count is given.
pub const DEFAULT_NUM_BLOCKS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sizing {
    Bytes(usize),
    Blocks(usize),
}

/// Builder for configuring [`ClockCache`] sizing.
#[derive(Debug, Clone)]
pub struct ClockCacheBuilder {
    block_size: usize,
    sizing: Sizing,
}

impl ClockCacheBuilder {
    /// Creates a builder for `block_size`-byte blocks and
    /// [`DEFAULT_NUM_BLOCKS`] blocks.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            sizing: Sizing::Blocks(DEFAULT_NUM_BLOCKS),
        }
    }

    /// Sizes the cache by total bytes; the block count is
    /// `bytes / block_size`.
    pub fn cache_size(mut self, bytes: usize) -> Self {
        self.sizing = Sizing::Bytes(bytes);
        self
    }

    /// Sizes the cache by block count.
    pub fn num_blocks(mut self, blocks: usize) -> Self {
        self.sizing = Sizing::Blocks(blocks);
        self
    }

    /// Builds the cache with the configured sizing.
    ///
    /// # Panics
    ///
    /// Panics if the sizing is invalid. For a non-panicking alternative, use
    /// [`try_build`](Self::try_build).
    pub fn build(self) -> ClockCache {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the cache, returning an error on invalid sizing instead of
    /// panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the block size is zero, the cache holds no
    /// block, or `num_blocks * block_size` overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use buffercache::builder::ClockCacheBuilder;
    ///
    /// assert!(ClockCacheBuilder::new(0).try_build().is_err());
    /// assert!(ClockCacheBuilder::new(8).num_blocks(0).try_build().is_err());
    /// ```
    pub fn try_build(self) -> Result<ClockCache, ConfigError> {
        let cache_size = match self.sizing {
            Sizing::Bytes(bytes) => bytes,
            Sizing::Blocks(blocks) => blocks.checked_mul(self.block_size).ok_or_else(|| {
                ConfigError::new(format!(
                    "{} blocks of {} bytes overflows usize",
                    blocks, self.block_size
                ))
            })?,
        };
        ClockCache::try_new(cache_size, self.block_size)
    }
}
