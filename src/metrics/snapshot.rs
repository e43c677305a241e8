/// Point-in-time copy of a clock cache's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClockMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64, // re-inserts of a resident key (evict-then-reinsert)
    pub insert_new: u64,

    pub evicted_entries: u64,

    pub hand_advances: u64,
    pub ref_bit_resets: u64,

    pub invalidate_calls: u64,
    pub invalidate_found: u64,

    pub size_mismatches: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
    pub block_size: usize,
}

impl ClockMetricsSnapshot {
    /// Fraction of fetches that hit, or `0.0` before the first fetch.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
