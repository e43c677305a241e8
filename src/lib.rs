//! buffercache: a fixed-capacity, fixed-block-size CLOCK cache keyed by `u64`.
//!
//! [`ClockCache`] is the thread-safe entry point; [`BlockRing`] is the
//! unsynchronized ring it wraps.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::ds::BlockRing;
pub use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::ClockMetricsSnapshot;
pub use crate::policy::clock::ClockCache;
