#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonotonicTimeNs(pub u64);

pub const NS_PER_DAY: u64 = 86_400 * 1_000_000_000;

impl MonotonicTimeNs {
    /// Whole days since the unix epoch.
    pub fn epoch_day(self) -> u64 {
        self.0 / NS_PER_DAY
    }

    /// Shifts by a (usually negative) number of days, saturating at zero.
    pub fn offset_days(self, days: i64) -> MonotonicTimeNs {
        let delta = days.unsigned_abs().saturating_mul(NS_PER_DAY);
        if days < 0 {
            MonotonicTimeNs(self.0.saturating_sub(delta))
        } else {
            MonotonicTimeNs(self.0.saturating_add(delta))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReasonCodeId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum ContractViolation {
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
        got: f64,
    },
    NotFinite {
        field: &'static str,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::InvalidValue { field, reason } => {
                write!(f, "invalid argument {field}: {reason}")
            }
            ContractViolation::InvalidRange {
                field,
                min,
                max,
                got,
            } => write!(
                f,
                "invalid argument {field}: {got} is outside {min}..={max}"
            ),
            ContractViolation::NotFinite { field } => {
                write!(f, "invalid argument {field}: must be finite")
            }
        }
    }
}

impl std::error::Error for ContractViolation {}

pub trait Validate {
    fn validate(&self) -> Result<(), ContractViolation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_days_moves_backwards_and_saturates() {
        let t = MonotonicTimeNs(10 * NS_PER_DAY);
        assert_eq!(t.offset_days(-3), MonotonicTimeNs(7 * NS_PER_DAY));
        assert_eq!(t.offset_days(0), t);
        assert_eq!(t.offset_days(-20), MonotonicTimeNs(0));
        assert_eq!(t.epoch_day(), 10);
    }

    #[test]
    fn violation_display_names_the_field() {
        let v = ContractViolation::InvalidValue {
            field: "cohort_series_request.age_cohort",
            reason: "not a member of vertical",
        };
        assert!(v.to_string().contains("cohort_series_request.age_cohort"));
    }
}
