#![forbid(unsafe_code)]

use sentinel_kernel_contracts::cohort::{AgeCohortBand, Vertical};

const K12_SAMPLE_SIZES: [(AgeCohortBand, u32); 7] = [
    (AgeCohortBand::Age5To10, 420),
    (AgeCohortBand::Age11To13, 380),
    (AgeCohortBand::Age14To18, 600),
    (AgeCohortBand::Age25To34, 48),
    (AgeCohortBand::Age35To44, 62),
    (AgeCohortBand::Age45To54, 41),
    (AgeCohortBand::Age55To64, 23),
];

const UNIVERSITY_SAMPLE_SIZES: [(AgeCohortBand, u32); 6] = [
    (AgeCohortBand::Age18To24, 2400),
    (AgeCohortBand::Age25To34, 820),
    (AgeCohortBand::Age35To44, 310),
    (AgeCohortBand::Age45To54, 190),
    (AgeCohortBand::Age55To64, 120),
    (AgeCohortBand::Age65Plus, 35),
];

const HEALTHCARE_SAMPLE_SIZES: [(AgeCohortBand, u32); 6] = [
    (AgeCohortBand::Age18To24, 140),
    (AgeCohortBand::Age25To34, 610),
    (AgeCohortBand::Age35To44, 540),
    (AgeCohortBand::Age45To54, 430),
    (AgeCohortBand::Age55To64, 260),
    (AgeCohortBand::Age65Plus, 45),
];

const EMPLOYER_SAMPLE_SIZES: [(AgeCohortBand, u32); 6] = [
    (AgeCohortBand::Age18To24, 210),
    (AgeCohortBand::Age25To34, 880),
    (AgeCohortBand::Age35To44, 760),
    (AgeCohortBand::Age45To54, 520),
    (AgeCohortBand::Age55To64, 300),
    (AgeCohortBand::Age65Plus, 28),
];

const GLOBAL_SAMPLE_SIZES: [(AgeCohortBand, u32); 6] = [
    (AgeCohortBand::Age18To24, 5200),
    (AgeCohortBand::Age25To34, 6100),
    (AgeCohortBand::Age35To44, 5400),
    (AgeCohortBand::Age45To54, 4700),
    (AgeCohortBand::Age55To64, 3900),
    (AgeCohortBand::Age65Plus, 3100),
];

fn table(vertical: Vertical) -> &'static [(AgeCohortBand, u32)] {
    match vertical {
        Vertical::K12 => &K12_SAMPLE_SIZES,
        Vertical::University => &UNIVERSITY_SAMPLE_SIZES,
        Vertical::Healthcare => &HEALTHCARE_SAMPLE_SIZES,
        Vertical::Employer => &EMPLOYER_SAMPLE_SIZES,
        Vertical::Global => &GLOBAL_SAMPLE_SIZES,
    }
}

/// 0 means the cohort is not applicable to the vertical.
pub fn sample_size(vertical: Vertical, cohort: AgeCohortBand) -> u32 {
    table(vertical)
        .iter()
        .find(|(band, _)| *band == cohort)
        .map(|(_, n)| *n)
        .unwrap_or(0)
}

pub fn vertical_default_sample_size(vertical: Vertical) -> u32 {
    match vertical {
        Vertical::K12 => 600,
        Vertical::University => 1200,
        Vertical::Healthcare => 800,
        Vertical::Employer => 1000,
        Vertical::Global => 5000,
    }
}

/// Table entry, or the vertical default when the entry is 0.
pub fn resolve_sample_size(vertical: Vertical, cohort: AgeCohortBand) -> u32 {
    match sample_size(vertical, cohort) {
        0 => vertical_default_sample_size(vertical),
        n => n,
    }
}
