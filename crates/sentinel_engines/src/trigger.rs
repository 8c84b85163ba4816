#![forbid(unsafe_code)]

use sentinel_kernel_contracts::ph1sentinel::{SentinelTrigger, VolatilityDataPoint};
use sentinel_kernel_contracts::{ContractViolation, MonotonicTimeNs};

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerScan {
    pub triggers: Vec<SentinelTrigger>,
    /// Longest run of exceeding days anywhere in the series.
    pub max_consecutive: u16,
    /// Run ending at day 0.
    pub current_run: u16,
}

/// One trigger per run, on the day the run first reaches `trigger_days`.
pub fn detect_triggers(
    points: &[VolatilityDataPoint],
    trigger_days: u8,
    as_of: MonotonicTimeNs,
) -> Result<TriggerScan, ContractViolation> {
    let mut triggers = Vec::new();
    let mut consecutive: u16 = 0;
    let mut max_consecutive: u16 = 0;
    let mut peak = 0.0_f64;

    for point in points {
        if !point.exceeds_baseline {
            consecutive = 0;
            peak = 0.0;
            continue;
        }

        consecutive = consecutive.saturating_add(1);
        peak = peak.max(point.value);
        max_consecutive = max_consecutive.max(consecutive);

        if consecutive == trigger_days as u16 {
            triggers.push(SentinelTrigger::v1(
                as_of.offset_days(point.day_offset as i64),
                point.day_offset,
                trigger_days,
                peak,
            )?);
        }
    }

    Ok(TriggerScan {
        triggers,
        max_consecutive,
        current_run: consecutive,
    })
}
