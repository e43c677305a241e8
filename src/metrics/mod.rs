//! Cache metrics: recording, snapshotting, and export.
//!
//! Enabled with the `metrics` feature. See [`traits`] for the layering.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::ClockMetrics;
pub use snapshot::ClockMetricsSnapshot;
pub use traits::{
    ClockMetricsRecorder, CoreMetricsRecorder, MetricsExporter, MetricsSnapshotProvider,
};
