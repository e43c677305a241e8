//! Error types for the buffercache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned by cache operations (miss, wrong buffer size).
//! - [`ConfigError`]: Returned when cache sizing parameters are invalid
//!   (e.g. zero block size, cache smaller than one block).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use buffercache::error::{CacheError, ConfigError};
//! use buffercache::policy::clock::ClockCache;
//! use buffercache::traits::BufferCache;
//!
//! // Fallible constructor for user-configurable sizing
//! let cache: Result<ClockCache, ConfigError> = ClockCache::try_new(4096, 1024);
//! assert!(cache.is_ok());
//!
//! // A block size of zero is caught without panicking
//! assert!(ClockCache::try_new(4096, 0).is_err());
//!
//! let cache = ClockCache::new(4096, 1024);
//! let mut buf = vec![0u8; 1024];
//! assert_eq!(cache.fetch(7, &mut buf), Err(CacheError::KeyNotFound { key: 7 }));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by [`BufferCache`](crate::traits::BufferCache) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// The requested key has no resident block. Expected in normal use.
    KeyNotFound {
        /// The key that missed.
        key: u64,
    },
    /// The caller's buffer length differs from the cache block size.
    ///
    /// Raised before any cache state is touched; nothing is truncated.
    BufferSizeMismatch {
        /// The cache block size.
        expected: usize,
        /// The length of the buffer that was passed in.
        actual: usize,
    },
}

impl CacheError {
    /// Returns `true` for a cache miss.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::KeyNotFound { .. })
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::KeyNotFound { key } => write!(f, "key {} not found", key),
            CacheError::BufferSizeMismatch { expected, actual } => write!(
                f,
                "buffer length {} does not match block size {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for CacheError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on cache types
/// (e.g. [`ClockCache::check_invariants`](crate::policy::clock::ClockCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache sizing parameters are invalid.
///
/// Produced by [`ClockCache::try_new`](crate::policy::clock::ClockCache::try_new)
/// and [`ClockCacheBuilder::try_build`](crate::builder::ClockCacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use buffercache::policy::clock::ClockCache;
///
/// let err = ClockCache::try_new(512, 1024).unwrap_err();
/// assert!(err.to_string().contains("block"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- CacheError -------------------------------------------------------

    #[test]
    fn not_found_display_names_key() {
        let err = CacheError::KeyNotFound { key: 42 };
        assert_eq!(err.to_string(), "key 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn size_mismatch_display_shows_both_lengths() {
        let err = CacheError::BufferSizeMismatch {
            expected: 1024,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "buffer length 10 does not match block size 1024"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn cache_error_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CacheError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index length mismatch");
        assert_eq!(err.to_string(), "index length mismatch");
        assert_eq!(err.message(), "index length mismatch");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("block size must be greater than zero");
        assert_eq!(err.to_string(), "block size must be greater than zero");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad size");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad size"));
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
