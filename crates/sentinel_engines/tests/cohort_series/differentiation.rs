use std::collections::BTreeMap;

use sentinel_engines::ph1sentinel::build_cohort_series;
use sentinel_kernel_contracts::cohort::Vertical;
use sentinel_kernel_contracts::ph1sentinel::{CohortSeriesRequest, CohortSeriesResult, DEFAULT_DEMO_SEED};

const SEEDS: [u64; 2] = [DEFAULT_DEMO_SEED, 7];
const SAMPLE_N: u32 = 100;
const SWEEP_SEEDS: u64 = 2_000;

fn series_for(vertical: Vertical, seed: u64) -> Vec<CohortSeriesResult> {
    vertical
        .cohorts()
        .iter()
        .map(|cohort| {
            build_cohort_series(&CohortSeriesRequest::v1(vertical, *cohort, SAMPLE_N, seed).unwrap())
                .unwrap()
        })
        .collect()
}

#[test]
fn at_series_diff_01_distinct_cohorts_distinct_hashes() {
    for vertical in Vertical::ALL {
        for seed in SEEDS {
            let mut seen = BTreeMap::new();
            for out in series_for(vertical, seed) {
                if let Some(prev) = seen.insert(out.series_hash.clone(), out.age_cohort) {
                    panic!(
                        "{vertical:?} seed {seed}: {prev:?} and {:?} share a hash",
                        out.age_cohort
                    );
                }
            }
        }
    }
}

#[test]
fn at_series_diff_02_extreme_cohorts_differ_in_mean_or_spread() {
    let mut failures = Vec::new();
    for vertical in Vertical::ALL {
        let cohorts = vertical.cohorts();
        let youngest = cohorts[0];
        let oldest = cohorts[cohorts.len() - 1];
        for n in [SAMPLE_N, 600] {
            for seed in (0..SWEEP_SEEDS).chain(SEEDS) {
                let build = |cohort| {
                    build_cohort_series(&CohortSeriesRequest::v1(vertical, cohort, n, seed).unwrap())
                        .unwrap()
                        .stats
                };
                let (a, b) = (build(youngest), build(oldest));
                let mean_gap = (a.mean - b.mean).abs();
                let spread_gap = (a.std_dev - b.std_dev).abs();
                if !(mean_gap > 0.5 || spread_gap > 0.5) {
                    failures.push((vertical, n, seed, mean_gap, spread_gap));
                }
            }
        }
    }
    assert!(failures.is_empty(), "extreme cohorts not separated: {failures:?}");
}

#[test]
fn at_series_diff_03_same_cohort_differs_across_verticals() {
    let cohort = Vertical::University.cohorts()[1];
    let hashes: Vec<String> = [Vertical::University, Vertical::Healthcare, Vertical::Employer]
        .into_iter()
        .map(|v| {
            build_cohort_series(&CohortSeriesRequest::v1(v, cohort, SAMPLE_N, 1).unwrap())
                .unwrap()
                .series_hash
        })
        .collect();
    assert_ne!(hashes[0], hashes[1]);
    assert_ne!(hashes[1], hashes[2]);
    assert_ne!(hashes[0], hashes[2]);
}
