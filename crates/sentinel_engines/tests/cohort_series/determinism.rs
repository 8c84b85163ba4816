use std::collections::BTreeSet;
use std::thread;

use sentinel_engines::ph1sentinel::{build_cohort_series, Ph1SentinelRuntime};
use sentinel_kernel_contracts::cohort::{AgeCohortBand, Vertical};
use sentinel_kernel_contracts::ph1sentinel::{CohortSeriesRequest, SystemState, DEFAULT_DEMO_SEED};
use sentinel_kernel_contracts::Validate;

fn req(vertical: Vertical, cohort: AgeCohortBand, n: u32, seed: u64) -> CohortSeriesRequest {
    CohortSeriesRequest::v1(vertical, cohort, n, seed).unwrap()
}

#[test]
fn at_series_det_01_identical_inputs_identical_output() {
    for vertical in Vertical::ALL {
        for cohort in vertical.cohorts() {
            for seed in [1u64, DEFAULT_DEMO_SEED, u64::MAX] {
                let r = req(vertical, *cohort, 250, seed);
                let a = build_cohort_series(&r).unwrap();
                let b = build_cohort_series(&r).unwrap();
                assert_eq!(a.series_hash, b.series_hash);
                assert_eq!(a.points, b.points);
                assert_eq!(a, b);
            }
        }
    }
}

#[test]
fn at_series_det_02_distinct_seeds_distinct_hashes() {
    let mut hashes = BTreeSet::new();
    for seed in 0..50u64 {
        let out = build_cohort_series(&req(Vertical::Healthcare, AgeCohortBand::Age35To44, 540, seed))
            .unwrap();
        assert!(hashes.insert(out.series_hash), "hash collision at seed {seed}");
    }
}

#[test]
fn at_series_det_03_sample_size_feeds_the_seed() {
    let a = build_cohort_series(&req(Vertical::K12, AgeCohortBand::Age14To18, 600, 10)).unwrap();
    let b = build_cohort_series(&req(Vertical::K12, AgeCohortBand::Age14To18, 601, 10)).unwrap();
    assert_ne!(a.series_hash, b.series_hash);
}

#[test]
fn at_series_det_04_end_to_end_k12_cohort() {
    let r = req(Vertical::K12, AgeCohortBand::Age14To18, 600, 42_424_242);
    let first = build_cohort_series(&r).unwrap();
    assert_eq!(first.points.len(), 15);
    assert!(first.validate().is_ok());

    let run = first.consecutive_days_above_baseline;
    assert_eq!(
        first.system_state.is_sustained_breach(),
        run >= first.trigger_days as u16
    );

    // Regression fixture: moves only if the generator stream, model or hash changes.
    assert_eq!(first.series_hash, "964c4694cde8939f");
    assert_eq!(first.system_state, SystemState::Critical);
    assert_eq!(run, 10);

    for _ in 0..5 {
        let again = build_cohort_series(&r).unwrap();
        assert_eq!(again.series_hash, first.series_hash);
    }
}

#[test]
fn at_series_det_05_concurrent_calls_match_sequential() {
    let requests: Vec<CohortSeriesRequest> = Vertical::ALL
        .into_iter()
        .flat_map(|v| v.cohorts().iter().map(move |c| req(v, *c, 100, 31)))
        .collect();
    let expected: Vec<String> = requests
        .iter()
        .map(|r| build_cohort_series(r).unwrap().series_hash)
        .collect();

    let runtime = Ph1SentinelRuntime::default();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    requests
                        .iter()
                        .map(|r| runtime.build_cohort_series(r).unwrap().series_hash)
                        .collect::<Vec<String>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn at_series_det_06_as_of_only_moves_calendar_effects() {
    let r = req(Vertical::Employer, AgeCohortBand::Age45To54, 520, 3);
    let base = build_cohort_series(&r).unwrap();
    // Shifting the anchor by whole weeks keeps every weekday in place.
    let shifted = build_cohort_series(&r.clone().with_as_of(r.as_of.offset_days(14)).unwrap()).unwrap();
    assert_eq!(base.points, shifted.points);
    for (a, b) in base.trigger_events.iter().zip(&shifted.trigger_events) {
        assert_eq!(b.triggered_at, a.triggered_at.offset_days(14));
    }
}
