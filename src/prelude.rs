pub use crate::builder::ClockCacheBuilder;
pub use crate::ds::BlockRing;
pub use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{ClockMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::clock::ClockCache;
pub use crate::traits::{BufferCache, ConcurrentCache};
