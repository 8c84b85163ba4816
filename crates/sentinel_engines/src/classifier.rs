#![forbid(unsafe_code)]

use sentinel_kernel_contracts::ph1sentinel::SystemState;

/// Callers keep `trigger_days >= 3`; below that the elevated band starts at zero.
pub fn classify(consecutive_days: u16, trigger_count: usize, trigger_days: u8) -> SystemState {
    let run = consecutive_days as i32;
    let trigger_days = trigger_days as i32;

    if trigger_count > 0 && run >= trigger_days + 3 {
        SystemState::Critical
    } else if run >= trigger_days {
        SystemState::SustainedVolatility
    } else if run >= trigger_days - 2 {
        SystemState::Elevated
    } else {
        SystemState::Baseline
    }
}
