#![forbid(unsafe_code)]

use sentinel_kernel_contracts::cohort::AgeCohortBand;
use sentinel_kernel_contracts::ph1sentinel::DEFAULT_BASELINE_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortCharacteristics {
    pub baseline_offset: f64,
    pub variance_multiplier: f64,
    pub recovery_rate: f64,
    pub seasonal_sensitivity: f64,
    pub trigger_threshold: f64,
}

const fn row(
    baseline_offset: f64,
    variance_multiplier: f64,
    recovery_rate: f64,
    seasonal_sensitivity: f64,
    trigger_threshold: f64,
) -> CohortCharacteristics {
    CohortCharacteristics {
        baseline_offset,
        variance_multiplier,
        recovery_rate,
        seasonal_sensitivity,
        trigger_threshold,
    }
}

// Extreme bands of every vertical (5-10 vs 55-64, 18-24 vs 65+) sit >= 14
// points apart in offset with damped noise; the differentiation sweep
// depends on that spacing.
pub fn characteristics(cohort: AgeCohortBand) -> CohortCharacteristics {
    match cohort {
        AgeCohortBand::Age5To10 => row(-18.0, 0.50, 0.60, 0.30, 52.0),
        AgeCohortBand::Age11To13 => row(-3.0, 1.00, 0.35, 0.50, 50.0),
        AgeCohortBand::Age14To18 => row(6.0, 1.50, 0.25, 0.70, 48.0),
        AgeCohortBand::Age18To24 => row(14.0, 1.00, 0.45, 0.80, 49.0),
        AgeCohortBand::Age25To34 => row(4.0, 1.10, 0.35, 0.45, 50.0),
        AgeCohortBand::Age35To44 => row(1.0, 0.95, 0.40, 0.35, 51.0),
        AgeCohortBand::Age45To54 => row(-1.0, 0.85, 0.45, 0.30, 51.0),
        AgeCohortBand::Age55To64 => row(-2.0, 0.90, 0.50, 0.25, 52.0),
        AgeCohortBand::Age65Plus => row(-10.0, 0.50, 0.60, 0.20, 53.0),
    }
}

impl CohortCharacteristics {
    /// Trigger threshold moved by however far the caller shifted the baseline
    /// away from the default, clamped into [0, 100].
    pub fn effective_threshold(&self, baseline_threshold: f64) -> f64 {
        let shifted = self.trigger_threshold + (baseline_threshold - DEFAULT_BASELINE_THRESHOLD);
        shifted.clamp(0.0, 100.0)
    }

    /// Level the series reverts toward.
    pub fn center(&self, baseline_threshold: f64) -> f64 {
        baseline_threshold + self.baseline_offset
    }
}
