//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting*, and *export* responsibilities into
//! small, composable traits so that cache logic never depends on a monitoring
//! backend.
//!
//! ## Architecture
//!
//! ```text
//!              ┌─────────────────────────────┐
//!              │     CoreMetricsRecorder     │
//!              │  get_hit/get_miss/insert    │
//!              │  evicted_entry/clear        │
//!              └──────────────┬──────────────┘
//!                             │
//!                             ▼
//!              ┌─────────────────────────────┐
//!              │    ClockMetricsRecorder     │
//!              │  hand_advance/ref_bit_reset │
//!              │  invalidate/size_mismatch   │
//!              └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders are called with the cache lock held, so they take `&mut self`
//! and need no atomics.

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for Clock behavior (clock hand sweep) over fixed-size blocks.
pub trait ClockMetricsRecorder: CoreMetricsRecorder {
    fn record_hand_advance(&mut self);
    fn record_ref_bit_reset(&mut self);
    fn record_invalidate_call(&mut self);
    fn record_invalidate_found(&mut self);
    fn record_size_mismatch(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
