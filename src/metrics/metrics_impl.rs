use crate::metrics::snapshot::ClockMetricsSnapshot;
use crate::metrics::traits::{ClockMetricsRecorder, CoreMetricsRecorder};

// ---------------------------------------------------------------------------
// ClockMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct ClockMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub hand_advances: u64,
    pub ref_bit_resets: u64,
    pub invalidate_calls: u64,
    pub invalidate_found: u64,
    pub size_mismatches: u64,
    pub clears: u64,
}

impl ClockMetrics {
    /// Copies the counters into a snapshot, attaching the given gauges.
    pub fn snapshot(
        &self,
        cache_len: usize,
        capacity: usize,
        block_size: usize,
    ) -> ClockMetricsSnapshot {
        ClockMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evicted_entries: self.evicted_entries,
            hand_advances: self.hand_advances,
            ref_bit_resets: self.ref_bit_resets,
            invalidate_calls: self.invalidate_calls,
            invalidate_found: self.invalidate_found,
            size_mismatches: self.size_mismatches,
            clears: self.clears,
            cache_len,
            capacity,
            block_size,
        }
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CoreMetricsRecorder for ClockMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ClockMetricsRecorder for ClockMetrics {
    fn record_hand_advance(&mut self) {
        self.hand_advances += 1;
    }
    fn record_ref_bit_reset(&mut self) {
        self.ref_bit_resets += 1;
    }
    fn record_invalidate_call(&mut self) {
        self.invalidate_calls += 1;
    }
    fn record_invalidate_found(&mut self) {
        self.invalidate_found += 1;
    }
    fn record_size_mismatch(&mut self) {
        self.size_mismatches += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_hit_and_miss_both_count_calls() {
        let mut metrics = ClockMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_get_miss();
        assert_eq!(metrics.get_calls, 3);
        assert_eq!(metrics.get_hits, 1);
        assert_eq!(metrics.get_misses, 2);
    }

    #[test]
    fn snapshot_carries_gauges() {
        let mut metrics = ClockMetrics::default();
        metrics.record_insert_call();
        metrics.record_insert_new();
        metrics.record_hand_advance();

        let snapshot = metrics.snapshot(1, 8, 512);
        assert_eq!(snapshot.insert_calls, 1);
        assert_eq!(snapshot.insert_new, 1);
        assert_eq!(snapshot.hand_advances, 1);
        assert_eq!(snapshot.cache_len, 1);
        assert_eq!(snapshot.capacity, 8);
        assert_eq!(snapshot.block_size, 512);
    }

    #[test]
    fn reset_zeroes_counters() {
        let mut metrics = ClockMetrics::default();
        metrics.record_evicted_entry();
        metrics.record_size_mismatch();
        metrics.reset();
        assert_eq!(metrics.snapshot(0, 0, 0), ClockMetricsSnapshot::default());
    }
}
