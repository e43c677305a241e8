// ==============================================
// CLOCK CACHE CONCURRENCY TESTS (integration)
// ==============================================
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use buffercache::error::CacheError;
use buffercache::policy::clock::ClockCache;
use buffercache::traits::BufferCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BLOCK_SIZE: usize = 64;

/// Fills a block with a pattern derived from `key` so readers can detect torn
/// or misrouted copies.
fn block_for(key: u64) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    for (i, chunk) in block.chunks_exact_mut(8).enumerate() {
        let word = key.wrapping_mul(31).wrapping_add(i as u64);
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    block
}

#[test]
fn test_concurrent_inserts_fill_without_eviction() {
    let num_threads = 8;
    let inserts_per_thread = 200;
    let cache = Arc::new(ClockCache::new(
        num_threads * inserts_per_thread * BLOCK_SIZE,
        BLOCK_SIZE,
    ));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..inserts_per_thread {
                    let key = (thread_id * inserts_per_thread + i) as u64;
                    cache.insert(key, &block_for(key)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), num_threads * inserts_per_thread);
    assert_eq!(cache.hand(), 0);
    cache.check_invariants().unwrap();

    let mut out = [0u8; BLOCK_SIZE];
    for key in 0..(num_threads * inserts_per_thread) as u64 {
        cache.fetch(key, &mut out).unwrap();
        assert_eq!(out, block_for(key));
    }
}

#[test]
fn test_mixed_operations_never_observe_torn_blocks() {
    let num_threads = 8;
    let ops_per_thread = 2_000;
    let cache = Arc::new(ClockCache::new(32 * BLOCK_SIZE, BLOCK_SIZE));
    let hits = Arc::new(AtomicUsize::new(0));
    let misses = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            let hits = Arc::clone(&hits);
            let misses = Arc::clone(&misses);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(thread_id as u64);
                let mut out = [0u8; BLOCK_SIZE];
                for _ in 0..ops_per_thread {
                    let key = rng.random_range(0..128u64);
                    match rng.random_range(0..10) {
                        0..=3 => cache.insert(key, &block_for(key)).unwrap(),
                        4..=8 => match cache.fetch(key, &mut out) {
                            Ok(()) => {
                                assert_eq!(out, block_for(key));
                                hits.fetch_add(1, Ordering::Relaxed);
                            },
                            Err(CacheError::KeyNotFound { .. }) => {
                                misses.fetch_add(1, Ordering::Relaxed);
                            },
                            Err(e) => panic!("unexpected error: {}", e),
                        },
                        _ => cache.invalidate(key).unwrap(),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let total = hits.load(Ordering::Relaxed) + misses.load(Ordering::Relaxed);
    assert!(total > 0);
    assert!(cache.len() <= cache.capacity());
    assert!(cache.hand() < cache.capacity());
    cache.check_invariants().unwrap();
}

#[test]
fn test_fetches_during_churn_return_intact_blocks() {
    let cache = Arc::new(ClockCache::new(16 * BLOCK_SIZE, BLOCK_SIZE));
    cache.insert(u64::MAX, &block_for(u64::MAX)).unwrap();

    let reader = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            let mut out = [0u8; BLOCK_SIZE];
            for i in 0..5_000u64 {
                let key = if i % 2 == 0 { u64::MAX } else { i % 4_000 };
                if cache.fetch(key, &mut out).is_ok() {
                    assert_eq!(out, block_for(key));
                }
            }
        })
    };

    let writers: Vec<_> = (0..4u64)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..1_000u64 {
                    let key = thread_id * 1_000 + i;
                    cache.insert(key, &block_for(key)).unwrap();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    assert_eq!(cache.len(), cache.capacity());
    cache.check_invariants().unwrap();
}
