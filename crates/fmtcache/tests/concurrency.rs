// ==============================================
// FORMAT SPEC CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Many threads hammering one cache with common and uncommon precisions at
// once. These need real threads and cannot live inline.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use fmtcache::{CacheConfig, FormatSpecCache};

const THREADS: usize = 8;
const ITERATIONS: usize = 5_000;

/// Deterministic per-thread precision sequence covering negatives, the
/// common range, the uncommon range and clamped values.
fn precision_for(thread: usize, i: usize) -> i32 {
    let x = (thread * 7919 + i * 104_729) % 40;
    x as i32 - 5
}

fn expected(specifier: &str, precision: i32) -> String {
    format!("{}{}", specifier, precision.clamp(0, 28))
}

#[test]
fn concurrent_mixed_gets_return_correct_content() {
    let cache = Arc::new(FormatSpecCache::new("F"));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..ITERATIONS {
                    let p = precision_for(t, i);
                    let spec = cache.get(p);
                    assert_eq!(&*spec, expected("F", p), "thread {} precision {}", t, p);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Capacity bound and map/list agreement
    let resident = cache.resident_precisions();
    assert!(resident.len() <= 8);
    assert_eq!(resident.len(), cache.uncommon_len());
    let unique: HashSet<_> = resident.iter().collect();
    assert_eq!(unique.len(), resident.len());
    assert!(resident.iter().all(|p| (6..=28).contains(p)));

    // No lost counter updates
    let snap = cache.stats().snapshot();
    assert_eq!(snap.lookups(), (THREADS * ITERATIONS) as u64);
    assert!(snap.evictions <= snap.misses);
}

#[test]
fn concurrent_common_gets_share_one_instance() {
    let cache = Arc::new(FormatSpecCache::new("P"));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..=5).map(|p| cache.get(p)).collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<Arc<str>>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for specs in &results[1..] {
        for (a, b) in results[0].iter().zip(specs) {
            assert!(Arc::ptr_eq(a, b));
        }
    }
}

#[test]
fn concurrent_uncommon_gets_never_diverge_without_eviction() {
    // Capacity covers every uncommon precision, so each one is built once
    let config = CacheConfig::default().with_capacity(23);
    let cache = Arc::new(FormatSpecCache::with_config("F", config).unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Each thread walks the range from a different start
                (0..23)
                    .map(|i| {
                        let p = 6 + ((i + t * 3) % 23) as i32;
                        (p, cache.get(p))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen: Vec<Option<Arc<str>>> = vec![None; 29];
    for handle in handles {
        for (p, spec) in handle.join().unwrap() {
            match &seen[p as usize] {
                Some(first) => assert!(Arc::ptr_eq(first, &spec), "precision {} diverged", p),
                None => seen[p as usize] = Some(spec),
            }
        }
    }

    let snap = cache.stats().snapshot();
    assert_eq!(snap.misses, 23);
    assert_eq!(snap.evictions, 0);
    assert_eq!(cache.uncommon_len(), 23);
}

#[test]
fn concurrent_families_do_not_interfere() {
    let fixed = Arc::new(FormatSpecCache::new("F"));
    let percent = Arc::new(FormatSpecCache::new("P"));
    let barrier = Arc::new(Barrier::new(THREADS));

    // Warm fixed with a stable working set
    for p in 6..=13 {
        fixed.get(p);
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let fixed = Arc::clone(&fixed);
            let percent = Arc::clone(&percent);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..ITERATIONS {
                    if t % 2 == 0 {
                        // Churns percent hard
                        let p = 6 + ((t + i) % 23) as i32;
                        assert_eq!(&*percent.get(p), expected("P", p));
                    } else {
                        // Only touches fixed's resident set
                        let p = 6 + ((t + i) % 8) as i32;
                        assert_eq!(&*fixed.get(p), expected("F", p));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(fixed.stats().evictions(), 0);
    let mut resident = fixed.resident_precisions();
    resident.sort_unstable();
    assert_eq!(resident, (6..=13).collect::<Vec<u32>>());
    assert!(percent.stats().evictions() > 0);
}

#[test]
fn concurrent_global_caches() {
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..1_000 {
                    let p = precision_for(t, i);
                    assert_eq!(&*fmtcache::fixed().get(p), expected("F", p));
                    assert_eq!(&*fmtcache::percent().get(p), expected("P", p));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(fmtcache::fixed().uncommon_len() <= 8);
    assert!(fmtcache::percent().uncommon_len() <= 8);
}
