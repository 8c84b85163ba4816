use sentinel_engines::ph1sentinel::{build_cohort_series, build_sentinel_demo_data};
use sentinel_engines::sample_size::{resolve_sample_size, sample_size};
use sentinel_kernel_contracts::cohort::{AgeCohortBand, Vertical};
use sentinel_kernel_contracts::ph1sentinel::{
    CohortSeriesRequest, SentinelDemoRequest, SystemState, K_ANONYMITY_FLOOR,
};

fn all_requests(seeds: &[u64]) -> Vec<CohortSeriesRequest> {
    let mut out = Vec::new();
    for vertical in Vertical::ALL {
        for cohort in vertical.cohorts() {
            for seed in seeds {
                out.push(CohortSeriesRequest::v1(vertical, *cohort, 100, *seed).unwrap());
            }
        }
    }
    out
}

#[test]
fn at_series_inv_01_values_stay_in_bounds() {
    for req in all_requests(&[0, 1, 2, 3, 42_424_242]) {
        for history_days in [2u16, 14, 45, 90] {
            // Shortest window only fits the minimum trigger length.
            let req = req
                .clone()
                .with_trigger_days(3)
                .and_then(|r| r.with_history_days(history_days))
                .unwrap();
            let out = build_cohort_series(&req).unwrap();
            assert_eq!(out.points.len(), history_days as usize + 1);
            for point in &out.points {
                assert!((0.0..=100.0).contains(&point.value));
            }
        }
    }
}

#[test]
fn at_series_inv_02_breach_state_iff_run_reaches_trigger_days() {
    for trigger_days in [3u8, 5, 7] {
        for req in all_requests(&[5, 6, 7, 8, 9, 10]) {
            let req = req.with_trigger_days(trigger_days).unwrap();
            let out = build_cohort_series(&req).unwrap();
            let run = out.consecutive_days_above_baseline;
            assert_eq!(
                out.system_state.is_sustained_breach(),
                run >= trigger_days as u16
            );
            if out.system_state == SystemState::Baseline {
                assert!(run < trigger_days as u16);
            }
            if out.system_state == SystemState::Critical {
                assert!(!out.trigger_events.is_empty());
                assert!(run >= trigger_days as u16 + 3);
            }
        }
    }
}

#[test]
fn at_series_inv_03_one_trigger_per_run() {
    for req in all_requests(&[11, 12, 13]) {
        let out = build_cohort_series(&req).unwrap();
        let mut expected = 0;
        let mut run = 0u16;
        for point in &out.points {
            if point.exceeds_baseline {
                run += 1;
                if run == out.trigger_days as u16 {
                    expected += 1;
                }
            } else {
                run = 0;
            }
        }
        assert_eq!(out.trigger_events.len(), expected);
        for trigger in &out.trigger_events {
            assert_eq!(trigger.days_above_baseline, out.trigger_days);
        }
    }
}

#[test]
fn at_series_inv_04_k_anonymity_floor() {
    for vertical in Vertical::ALL {
        for cohort in AgeCohortBand::ALL {
            let n = sample_size(vertical, cohort);
            assert!(n == 0 || n >= K_ANONYMITY_FLOOR);
            assert!(resolve_sample_size(vertical, cohort) >= K_ANONYMITY_FLOOR);
        }
    }
}

#[test]
fn at_series_inv_05_vertical_membership() {
    let minors = [
        AgeCohortBand::Age5To10,
        AgeCohortBand::Age11To13,
        AgeCohortBand::Age14To18,
    ];
    for cohort in minors {
        assert!(Vertical::K12.includes(cohort));
        assert!(!Vertical::University.includes(cohort));
        assert!(!Vertical::Global.includes(cohort));
        assert!(CohortSeriesRequest::v1(Vertical::University, cohort, 100, 1).is_err());
        assert!(SentinelDemoRequest::v1(Vertical::Global, cohort, None).is_err());
    }
}

#[test]
fn at_series_inv_06_every_demo_cohort_builds() {
    for vertical in Vertical::ALL {
        for cohort in vertical.cohorts() {
            let data =
                build_sentinel_demo_data(&SentinelDemoRequest::v1(vertical, *cohort, None).unwrap())
                    .unwrap();
            assert_eq!(data.sample_size, sample_size(vertical, *cohort));
            assert!(data.cohort_label.contains(cohort.as_str()));
            assert!(data.cohort_label.starts_with(vertical.display_name()));
        }
    }
}

#[test]
fn at_series_inv_07_result_serializes_with_public_spellings() {
    let req = CohortSeriesRequest::v1(Vertical::K12, AgeCohortBand::Age14To18, 600, 42_424_242)
        .unwrap();
    let out = build_cohort_series(&req).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["vertical"], "k12");
    assert_eq!(json["age_cohort"], "14-18");
    assert_eq!(json["system_state"], out.system_state.as_str());
    assert_eq!(json["points"].as_array().unwrap().len(), 15);
    assert_eq!(json["series_hash"], out.series_hash.as_str());
}
