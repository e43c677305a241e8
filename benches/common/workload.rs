//! Block access streams for hit-rate benchmarks.
//!
//! Every block number maps to a fixed byte pattern, so a replay can check
//! that each hit returns exactly the bytes stored on the earlier miss.

use buffercache::traits::BufferCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of the block-number stream over a file of `file_blocks` blocks.
#[derive(Debug, Clone, Copy)]
pub enum AccessPattern {
    /// Any block with equal probability.
    Random,
    /// `hot_prob` of accesses land in the first `hot_fraction` of the file.
    HotRegion { hot_fraction: f64, hot_prob: f64 },
    /// Front-to-back read of the file, wrapping at the end.
    SequentialScan,
    /// Runs of `run_len` consecutive blocks starting at random offsets.
    Readahead { run_len: u64 },
}

#[derive(Debug)]
pub struct BlockStream {
    file_blocks: u64,
    pattern: AccessPattern,
    rng: StdRng,
    cursor: u64,
    run_left: u64,
}

impl BlockStream {
    pub fn new(file_blocks: u64, pattern: AccessPattern, seed: u64) -> Self {
        Self {
            file_blocks: file_blocks.max(1),
            pattern,
            rng: StdRng::seed_from_u64(seed),
            cursor: 0,
            run_left: 0,
        }
    }

    pub fn next_block(&mut self) -> u64 {
        match self.pattern {
            AccessPattern::Random => self.rng.random_range(0..self.file_blocks),
            AccessPattern::HotRegion {
                hot_fraction,
                hot_prob,
            } => {
                let hot = (self.file_blocks as f64 * hot_fraction.clamp(0.0, 1.0)) as u64;
                let hot = hot.clamp(1, self.file_blocks);
                if hot == self.file_blocks || self.rng.random::<f64>() < hot_prob {
                    self.rng.random_range(0..hot)
                } else {
                    self.rng.random_range(hot..self.file_blocks)
                }
            },
            AccessPattern::SequentialScan => self.step(),
            AccessPattern::Readahead { run_len } => {
                if self.run_left == 0 {
                    self.cursor = self.rng.random_range(0..self.file_blocks);
                    self.run_left = run_len.max(1);
                }
                self.run_left -= 1;
                self.step()
            },
        }
    }

    fn step(&mut self) -> u64 {
        let block = self.cursor;
        self.cursor = (self.cursor + 1) % self.file_blocks;
        block
    }
}

/// Writes the pattern for `block` into `buf`.
pub fn fill_block(block: u64, buf: &mut [u8]) {
    let seed = block.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    for (i, byte) in buf.iter_mut().enumerate() {
        *byte = seed.rotate_left(i as u32 % 64) as u8;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayStats {
    pub hits: u64,
    pub misses: u64,
    /// Hits whose bytes did not match the block's pattern.
    pub corrupt: u64,
}

impl ReplayStats {
    pub fn hit_rate(self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Replays `operations` block reads against `cache`, reading through on a
/// miss.
pub fn replay<C: BufferCache>(
    cache: &C,
    stream: &mut BlockStream,
    operations: usize,
) -> ReplayStats {
    let mut stats = ReplayStats::default();
    let mut expected = vec![0u8; cache.block_size()];
    let mut out = vec![0u8; cache.block_size()];

    for _ in 0..operations {
        let block = stream.next_block();
        fill_block(block, &mut expected);
        if cache.fetch(block, &mut out).is_ok() {
            stats.hits += 1;
            if out != expected {
                stats.corrupt += 1;
            }
        } else {
            stats.misses += 1;
            let _ = cache.insert(block, &expected);
        }
    }

    stats
}
