#![forbid(unsafe_code)]

use sentinel_kernel_contracts::ph1sentinel::{SeriesStats, VolatilityDataPoint};

const HASH_SEED: u64 = 17;
const HASH_BASE: u64 = 1_000_003;

/// Population statistics over the raw, unrounded values.
pub fn compute_stats(raw: &[f64]) -> SeriesStats {
    if raw.is_empty() {
        return SeriesStats {
            mean: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }
    let count = raw.len() as f64;
    let mean = raw.iter().sum::<f64>() / count;
    let variance = raw.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    SeriesStats {
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
    }
}

/// Rolling polynomial fingerprint over the rounded values, as 16 hex chars.
/// Equality check only; not a security primitive.
pub fn series_hash(points: &[VolatilityDataPoint]) -> String {
    let mut hash = HASH_SEED;
    for point in points {
        let tenths = (point.value * 10.0).round() as u64;
        hash = hash.wrapping_mul(HASH_BASE).wrapping_add(tenths + 1);
    }
    hash = hash.wrapping_mul(HASH_BASE).wrapping_add(points.len() as u64);
    format!("{hash:016x}")
}
