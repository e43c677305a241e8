#![no_main]

use buffercache::policy::clock::ClockCache;
use buffercache::traits::BufferCache;
use libfuzzer_sys::fuzz_target;

// Fuzz eviction patterns with recently-used bits
//
// Fills the cache, then varies which blocks are fetched before each new
// insert. Every insert into the full cache must evict exactly one block and
// leave the new block resident.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let capacity = (data[0] as usize % 20).max(2);
    let cache = ClockCache::new(capacity * 4, 4);

    for i in 0..capacity as u64 {
        cache.insert(i, &[i as u8; 4]).unwrap();
    }

    let mut idx = 1;
    while idx + 1 < data.len() {
        let resident: Vec<u64> = (0..(capacity as u64 + idx as u64))
            .filter(|&k| cache.contains(k))
            .collect();
        let key = resident[data[idx] as usize % resident.len()];
        let fetched = data[idx + 1] % 2 == 0;

        if fetched {
            let mut out = [0u8; 4];
            cache.fetch(key, &mut out).unwrap();
        }

        let new_key = capacity as u64 + idx as u64;
        cache.insert(new_key, &[new_key as u8; 4]).unwrap();

        assert!(cache.contains(new_key));
        assert_eq!(cache.len(), capacity);
        cache.check_invariants().unwrap();

        idx += 2;
    }
});
