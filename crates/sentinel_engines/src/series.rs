#![forbid(unsafe_code)]

use std::f64::consts::TAU;

use sentinel_kernel_contracts::ph1sentinel::VolatilityDataPoint;
use sentinel_kernel_contracts::{ContractViolation, MonotonicTimeNs};

use crate::characteristics::CohortCharacteristics;
use crate::prng::SeededRandom;

/// Organic signal: weekday dip, seasonal swing, Gaussian noise and mean reversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalModel {
    pub noise_scale: f64,
    pub seasonal_amplitude: f64,
    pub weekend_offset: f64,
}

impl SignalModel {
    /// Returns `history_days + 1` clamped raw values, oldest first.
    pub fn generate(
        &self,
        rng: &mut SeededRandom,
        characteristics: &CohortCharacteristics,
        baseline_threshold: f64,
        history_days: u16,
        as_of: MonotonicTimeNs,
    ) -> Vec<f64> {
        let center = characteristics.center(baseline_threshold);
        let span = history_days as f64;
        let mut current = center;
        let mut values = Vec::with_capacity(history_days as usize + 1);

        for (idx, day_offset) in (-(history_days as i64)..=0).enumerate() {
            let progress = if span > 0.0 { idx as f64 / span } else { 0.0 };

            let weekday = if is_weekend(as_of, day_offset) {
                self.weekend_offset
            } else {
                0.0
            };
            let seasonal = characteristics.seasonal_sensitivity
                * self.seasonal_amplitude
                * (TAU * progress).sin();
            let noise = rng.normal(0.0, self.noise_scale * characteristics.variance_multiplier);
            let reversion = characteristics.recovery_rate * (center - current);

            current = (current + weekday + seasonal + noise + reversion).clamp(0.0, 100.0);
            values.push(current);
        }
        values
    }
}

/// Presentation ramp over the tail of the window, applied after the organic model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrativeEmphasis {
    pub days: usize,
    pub step: f64,
}

impl NarrativeEmphasis {
    pub fn apply(&self, values: &mut [f64]) {
        let start = values.len().saturating_sub(self.days);
        for (k, value) in values[start..].iter_mut().enumerate() {
            *value = (*value + (k + 1) as f64 * self.step).clamp(0.0, 100.0);
        }
    }
}

/// Saturday or Sunday in UTC for the day `day_offset` days from `as_of`.
pub fn is_weekend(as_of: MonotonicTimeNs, day_offset: i64) -> bool {
    // 1970-01-01 was a Thursday; 0 = Sunday.
    let weekday = (as_of.epoch_day() as i64 + day_offset + 4).rem_euclid(7);
    weekday == 0 || weekday == 6
}

pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn to_points(
    raw: &[f64],
    trigger_threshold: f64,
) -> Result<Vec<VolatilityDataPoint>, ContractViolation> {
    let first_offset = -(raw.len() as i32 - 1);
    raw.iter()
        .enumerate()
        .map(|(idx, value)| {
            let rounded = round_tenths(*value);
            VolatilityDataPoint::v1(
                first_offset + idx as i32,
                rounded,
                rounded > trigger_threshold,
            )
        })
        .collect()
}
