#![forbid(unsafe_code)]

//! Seeded uniform and Gaussian sampling.
//!
//! Every series build owns exactly one `SeededRandom`. Nothing in this crate
//! keeps a generator in a static or shares one between calls.

use std::f64::consts::TAU;

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use sentinel_kernel_contracts::cohort::{AgeCohortBand, Vertical};

pub const COHORT_SEED_STRIDE: u64 = 10_000;
pub const VERTICAL_SEED_STRIDE: u64 = 100_000;

/// `seed + cohort_index*10000 + vertical_index*100000 + n`, wrapping.
pub fn combined_seed(seed: u64, vertical: Vertical, cohort: AgeCohortBand, n: u32) -> u64 {
    seed.wrapping_add(cohort.index().wrapping_mul(COHORT_SEED_STRIDE))
        .wrapping_add(vertical.index().wrapping_mul(VERTICAL_SEED_STRIDE))
        .wrapping_add(n as u64)
}

#[derive(Debug, Clone)]
pub struct SeededRandom {
    inner: Pcg64Mcg,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn for_cohort(seed: u64, vertical: Vertical, cohort: AgeCohortBand, n: u32) -> Self {
        Self::new(combined_seed(seed, vertical, cohort, n))
    }

    /// Uniform in [0, 1) with 53 bits of precision.
    pub fn next_uniform(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Box–Muller over two consecutive uniform draws.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        // 1 - u keeps the log argument in (0, 1].
        let u1 = 1.0 - self.next_uniform();
        let u2 = self.next_uniform();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + std_dev * z
    }
}
