#![forbid(unsafe_code)]

pub mod cohort;
pub mod common;
pub mod ph1sentinel;

pub use common::{
    ContractViolation, MonotonicTimeNs, ReasonCodeId, SchemaVersion, Validate, NS_PER_DAY,
};
