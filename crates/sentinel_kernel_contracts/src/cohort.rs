#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::ContractViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    K12,
    University,
    Healthcare,
    Employer,
    Global,
}

const K12_COHORTS: [AgeCohortBand; 7] = [
    AgeCohortBand::Age5To10,
    AgeCohortBand::Age11To13,
    AgeCohortBand::Age14To18,
    AgeCohortBand::Age25To34,
    AgeCohortBand::Age35To44,
    AgeCohortBand::Age45To54,
    AgeCohortBand::Age55To64,
];

const ADULT_COHORTS: [AgeCohortBand; 6] = [
    AgeCohortBand::Age18To24,
    AgeCohortBand::Age25To34,
    AgeCohortBand::Age35To44,
    AgeCohortBand::Age45To54,
    AgeCohortBand::Age55To64,
    AgeCohortBand::Age65Plus,
];

impl Vertical {
    pub const ALL: [Vertical; 5] = [
        Vertical::K12,
        Vertical::University,
        Vertical::Healthcare,
        Vertical::Employer,
        Vertical::Global,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Vertical::K12 => "k12",
            Vertical::University => "university",
            Vertical::Healthcare => "healthcare",
            Vertical::Employer => "employer",
            Vertical::Global => "global",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }

    /// Stable position used when deriving sub-seeds. Append-only.
    pub fn index(self) -> u64 {
        match self {
            Vertical::K12 => 0,
            Vertical::University => 1,
            Vertical::Healthcare => 2,
            Vertical::Employer => 3,
            Vertical::Global => 4,
        }
    }

    /// Member bands, youngest first.
    pub fn cohorts(self) -> &'static [AgeCohortBand] {
        match self {
            Vertical::K12 => &K12_COHORTS,
            Vertical::University | Vertical::Healthcare | Vertical::Employer | Vertical::Global => {
                &ADULT_COHORTS
            }
        }
    }

    pub fn includes(self, cohort: AgeCohortBand) -> bool {
        self.cohorts().contains(&cohort)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Vertical::K12 => "K-12",
            Vertical::University => "University",
            Vertical::Healthcare => "Healthcare",
            Vertical::Employer => "Employer",
            Vertical::Global => "Global",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeCohortBand {
    #[serde(rename = "5-10")]
    Age5To10,
    #[serde(rename = "11-13")]
    Age11To13,
    #[serde(rename = "14-18")]
    Age14To18,
    #[serde(rename = "18-24")]
    Age18To24,
    #[serde(rename = "25-34")]
    Age25To34,
    #[serde(rename = "35-44")]
    Age35To44,
    #[serde(rename = "45-54")]
    Age45To54,
    #[serde(rename = "55-64")]
    Age55To64,
    #[serde(rename = "65+")]
    Age65Plus,
}

impl AgeCohortBand {
    pub const ALL: [AgeCohortBand; 9] = [
        AgeCohortBand::Age5To10,
        AgeCohortBand::Age11To13,
        AgeCohortBand::Age14To18,
        AgeCohortBand::Age18To24,
        AgeCohortBand::Age25To34,
        AgeCohortBand::Age35To44,
        AgeCohortBand::Age45To54,
        AgeCohortBand::Age55To64,
        AgeCohortBand::Age65Plus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgeCohortBand::Age5To10 => "5-10",
            AgeCohortBand::Age11To13 => "11-13",
            AgeCohortBand::Age14To18 => "14-18",
            AgeCohortBand::Age18To24 => "18-24",
            AgeCohortBand::Age25To34 => "25-34",
            AgeCohortBand::Age35To44 => "35-44",
            AgeCohortBand::Age45To54 => "45-54",
            AgeCohortBand::Age55To64 => "55-64",
            AgeCohortBand::Age65Plus => "65+",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }

    /// Stable position used when deriving sub-seeds. Append-only.
    pub fn index(self) -> u64 {
        match self {
            AgeCohortBand::Age5To10 => 0,
            AgeCohortBand::Age11To13 => 1,
            AgeCohortBand::Age14To18 => 2,
            AgeCohortBand::Age18To24 => 3,
            AgeCohortBand::Age25To34 => 4,
            AgeCohortBand::Age35To44 => 5,
            AgeCohortBand::Age45To54 => 6,
            AgeCohortBand::Age55To64 => 7,
            AgeCohortBand::Age65Plus => 8,
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(
            self,
            AgeCohortBand::Age5To10 | AgeCohortBand::Age11To13 | AgeCohortBand::Age14To18
        )
    }
}

pub fn validate_membership(
    field: &'static str,
    vertical: Vertical,
    cohort: AgeCohortBand,
) -> Result<(), ContractViolation> {
    if !vertical.includes(cohort) {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "age cohort is not applicable to vertical",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k12_includes_student_bands() {
        for cohort in [
            AgeCohortBand::Age5To10,
            AgeCohortBand::Age11To13,
            AgeCohortBand::Age14To18,
        ] {
            assert!(Vertical::K12.includes(cohort));
        }
    }

    #[test]
    fn university_and_global_exclude_child_bands() {
        for vertical in [Vertical::University, Vertical::Global] {
            for cohort in AgeCohortBand::ALL.into_iter().filter(|c| c.is_minor()) {
                assert!(!vertical.includes(cohort));
            }
        }
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(Vertical::parse("k12"), Some(Vertical::K12));
        assert_eq!(Vertical::parse("K12"), None);
        assert_eq!(Vertical::parse("hospital"), None);
        assert_eq!(AgeCohortBand::parse("65+"), Some(AgeCohortBand::Age65Plus));
        assert_eq!(AgeCohortBand::parse("19-23"), None);
    }

    #[test]
    fn serde_spellings_match_as_str() {
        for cohort in AgeCohortBand::ALL {
            let json = serde_json::to_string(&cohort).unwrap();
            assert_eq!(json, format!("\"{}\"", cohort.as_str()));
        }
        for vertical in Vertical::ALL {
            let json = serde_json::to_string(&vertical).unwrap();
            assert_eq!(json, format!("\"{}\"", vertical.as_str()));
        }
    }

    #[test]
    fn indices_are_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for cohort in AgeCohortBand::ALL {
            assert!(seen.insert(cohort.index()));
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn membership_violation_is_explicit() {
        let out = validate_membership(
            "test.age_cohort",
            Vertical::University,
            AgeCohortBand::Age5To10,
        );
        assert!(matches!(out, Err(ContractViolation::InvalidValue { .. })));
    }
}
