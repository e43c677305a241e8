#![no_main]

use buffercache::ds::BlockRing;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on BlockRing
//
// Tests random sequences of insert, fetch, contains, invalidate, clear, and
// wrong-sized buffers, checking the ring's invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = (data[0] as usize % 50).max(1);
    let block_size = 8;
    let mut ring = BlockRing::new(capacity, block_size);

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 6;
        let key = data[idx + 1] as u64;
        let byte = data[idx + 2];

        match op {
            0 | 1 => {
                let evicted = ring.insert(key, &[byte; 8]).unwrap();
                assert_ne!(evicted, Some(key));
                let mut out = [0u8; 8];
                ring.fetch(key, &mut out).unwrap();
                assert_eq!(out, [byte; 8]);
            }
            2 => {
                let mut out = [0u8; 8];
                let _ = ring.fetch(key, &mut out);
            }
            3 => {
                let was_resident = ring.contains(key);
                assert_eq!(ring.invalidate(key), was_resident);
            }
            4 => {
                let len = ring.len();
                assert!(ring.insert(key, &[byte; 3]).is_err());
                assert_eq!(ring.len(), len);
            }
            5 => {
                if byte == 0 {
                    ring.clear();
                    assert!(ring.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(ring.len() <= ring.capacity());
        ring.check_invariants().unwrap();

        idx += 3;
    }
});
