//! Concurrent workload against a single cache

use anyhow::{bail, Result};
use fmtcache::FormatSpecCache;
use fmtspec::specifier;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Barrier;
use std::thread;
use std::time::Instant;
use tracing::info;

/// Outcome of a stress run
#[derive(Debug, Serialize)]
pub struct StressReport {
    pub specifier: String,
    pub threads: usize,
    pub iterations: usize,
    pub elapsed_ms: u128,
    pub ops_per_sec: f64,
    pub common_hits: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_ratio: f64,
    pub resident: Vec<u32>,
}

/// splitmix64 step
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Precision for lookup `i` on `thread`
///
/// Roughly 80% common, 15% uncommon, 5% negative or oversized.
fn precision_at(seed: u64, thread: usize, i: usize) -> i32 {
    let r = mix(seed ^ mix(thread as u64) ^ (i as u64).rotate_left(17));
    let pick = (r >> 32) % 100;
    let low = (r & 0xffff) as i32;
    match pick {
        0..=79 => low % 6,
        80..=94 => 6 + low % 23,
        95..=97 => -1 - low % 10,
        _ => 29 + low,
    }
}

/// Run the workload and verify the cache afterwards
///
/// Every returned spec is checked against a freshly built string; a
/// mismatch, a capacity overrun or lost statistics fail the run.
pub fn run(
    cache: &FormatSpecCache,
    threads: usize,
    iterations: usize,
    seed: u64,
) -> Result<StressReport> {
    if threads == 0 {
        bail!("threads must be greater than 0");
    }
    let total = match threads.checked_mul(iterations) {
        Some(total) => total as u64,
        None => bail!("{} threads x {} iterations overflows", threads, iterations),
    };

    let before = cache.stats().snapshot();
    let config = *cache.config();
    let barrier = Barrier::new(threads);
    let start = Instant::now();

    let mismatches: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    let mut bad = 0usize;
                    for i in 0..iterations {
                        let p = precision_at(seed, t, i);
                        let spec = cache.get(p);
                        let want = specifier::build(cache.specifier(), config.normalize(p));
                        if *spec != *want {
                            bad += 1;
                        }
                    }
                    bad
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(usize::MAX))
            .fold(0usize, usize::saturating_add)
    });

    let elapsed = start.elapsed();
    let after = cache.stats().snapshot();
    let resident = cache.resident_precisions();

    if mismatches > 0 {
        bail!("{} lookups returned the wrong spec", mismatches);
    }

    let unique: HashSet<_> = resident.iter().collect();
    if resident.len() > config.capacity || unique.len() != resident.len() {
        bail!(
            "uncommon partition inconsistent: {} entries ({} unique), capacity {}",
            resident.len(),
            unique.len(),
            config.capacity
        );
    }

    let counted = after.lookups() - before.lookups();
    if counted != total {
        bail!("stats recorded {} lookups, expected {}", counted, total);
    }

    let hits = after.hits - before.hits;
    let misses = after.misses - before.misses;
    let secs = elapsed.as_secs_f64();
    let report = StressReport {
        specifier: cache.specifier().to_string(),
        threads,
        iterations,
        elapsed_ms: elapsed.as_millis(),
        ops_per_sec: if secs > 0.0 { total as f64 / secs } else { 0.0 },
        common_hits: after.common_hits - before.common_hits,
        hits,
        misses,
        evictions: after.evictions - before.evictions,
        hit_ratio: if hits + misses == 0 {
            0.0
        } else {
            hits as f64 / (hits + misses) as f64
        },
        resident,
    };

    info!(
        "Stress finished in {:?}: {:.0} ops/sec, uncommon hit ratio {:.3}",
        elapsed, report.ops_per_sec, report.hit_ratio
    );
    Ok(report)
}
