#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::cohort::{validate_membership, AgeCohortBand, Vertical};
use crate::{ContractViolation, MonotonicTimeNs, ReasonCodeId, SchemaVersion, Validate};

pub const PH1SENTINEL_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

pub const DEFAULT_HISTORY_DAYS: u16 = 14;
pub const MAX_HISTORY_DAYS: u16 = 90;
pub const DEFAULT_BASELINE_THRESHOLD: f64 = 50.0;
pub const DEFAULT_TRIGGER_DAYS: u8 = 5;
pub const MIN_TRIGGER_DAYS: u8 = 3;
pub const DEFAULT_DEMO_SEED: u64 = 42_424_242;
/// 2025-01-01T00:00:00Z.
pub const DEFAULT_AS_OF: MonotonicTimeNs = MonotonicTimeNs(1_735_689_600_000_000_000);
pub const K_ANONYMITY_FLOOR: u32 = 5;
pub const SERIES_HASH_HEX_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentinelCapabilityId {
    CohortSeriesBuild,
    SentinelDemoBuild,
}

impl SentinelCapabilityId {
    pub fn as_str(self) -> &'static str {
        match self {
            SentinelCapabilityId::CohortSeriesBuild => "COHORT_SERIES_BUILD",
            SentinelCapabilityId::SentinelDemoBuild => "SENTINEL_DEMO_BUILD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemState {
    Baseline,
    Elevated,
    SustainedVolatility,
    Critical,
}

impl SystemState {
    pub fn as_str(self) -> &'static str {
        match self {
            SystemState::Baseline => "baseline",
            SystemState::Elevated => "elevated",
            SystemState::SustainedVolatility => "sustained_volatility",
            SystemState::Critical => "critical",
        }
    }

    /// True for the states that require a completed breach run.
    pub fn is_sustained_breach(self) -> bool {
        matches!(
            self,
            SystemState::SustainedVolatility | SystemState::Critical
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSeriesRequest {
    pub schema_version: SchemaVersion,
    pub vertical: Vertical,
    pub age_cohort: AgeCohortBand,
    pub n: u32,
    pub seed: u64,
    pub history_days: u16,
    pub baseline_threshold: f64,
    pub trigger_days: u8,
    pub narrative_emphasis: bool,
    pub as_of: MonotonicTimeNs,
}

impl CohortSeriesRequest {
    pub fn v1(
        vertical: Vertical,
        age_cohort: AgeCohortBand,
        n: u32,
        seed: u64,
    ) -> Result<Self, ContractViolation> {
        let req = Self {
            schema_version: PH1SENTINEL_CONTRACT_VERSION,
            vertical,
            age_cohort,
            n,
            seed,
            history_days: DEFAULT_HISTORY_DAYS,
            baseline_threshold: DEFAULT_BASELINE_THRESHOLD,
            trigger_days: DEFAULT_TRIGGER_DAYS,
            narrative_emphasis: true,
            as_of: DEFAULT_AS_OF,
        };
        req.validate()?;
        Ok(req)
    }

    pub fn with_history_days(mut self, history_days: u16) -> Result<Self, ContractViolation> {
        self.history_days = history_days;
        self.validate()?;
        Ok(self)
    }

    pub fn with_baseline_threshold(
        mut self,
        baseline_threshold: f64,
    ) -> Result<Self, ContractViolation> {
        self.baseline_threshold = baseline_threshold;
        self.validate()?;
        Ok(self)
    }

    pub fn with_trigger_days(mut self, trigger_days: u8) -> Result<Self, ContractViolation> {
        self.trigger_days = trigger_days;
        self.validate()?;
        Ok(self)
    }

    pub fn with_as_of(mut self, as_of: MonotonicTimeNs) -> Result<Self, ContractViolation> {
        self.as_of = as_of;
        self.validate()?;
        Ok(self)
    }

    pub fn with_narrative_emphasis(mut self, narrative_emphasis: bool) -> Self {
        self.narrative_emphasis = narrative_emphasis;
        self
    }

    pub fn point_count(&self) -> usize {
        self.history_days as usize + 1
    }
}

impl Validate for CohortSeriesRequest {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != PH1SENTINEL_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_request.schema_version",
                reason: "must match PH1SENTINEL_CONTRACT_VERSION",
            });
        }
        validate_membership(
            "cohort_series_request.age_cohort",
            self.vertical,
            self.age_cohort,
        )?;
        if self.n == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_request.n",
                reason: "must be > 0",
            });
        }
        if self.history_days == 0 || self.history_days > MAX_HISTORY_DAYS {
            return Err(ContractViolation::InvalidRange {
                field: "cohort_series_request.history_days",
                min: 1.0,
                max: MAX_HISTORY_DAYS as f64,
                got: self.history_days as f64,
            });
        }
        validate_percent(
            "cohort_series_request.baseline_threshold",
            self.baseline_threshold,
        )?;
        let max_trigger_days = self.history_days + 1;
        if self.trigger_days < MIN_TRIGGER_DAYS || self.trigger_days as u16 > max_trigger_days {
            return Err(ContractViolation::InvalidRange {
                field: "cohort_series_request.trigger_days",
                min: MIN_TRIGGER_DAYS as f64,
                max: max_trigger_days as f64,
                got: self.trigger_days as f64,
            });
        }
        if self.as_of.epoch_day() < self.history_days as u64 {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_request.as_of",
                reason: "must be at least history_days after the unix epoch",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelDemoRequest {
    pub schema_version: SchemaVersion,
    pub vertical: Vertical,
    pub age_cohort: AgeCohortBand,
    pub seed: u64,
}

impl SentinelDemoRequest {
    pub fn v1(
        vertical: Vertical,
        age_cohort: AgeCohortBand,
        seed: Option<u64>,
    ) -> Result<Self, ContractViolation> {
        let req = Self {
            schema_version: PH1SENTINEL_CONTRACT_VERSION,
            vertical,
            age_cohort,
            seed: seed.unwrap_or(DEFAULT_DEMO_SEED),
        };
        req.validate()?;
        Ok(req)
    }
}

impl Validate for SentinelDemoRequest {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != PH1SENTINEL_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_demo_request.schema_version",
                reason: "must match PH1SENTINEL_CONTRACT_VERSION",
            });
        }
        validate_membership(
            "sentinel_demo_request.age_cohort",
            self.vertical,
            self.age_cohort,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityDataPoint {
    pub day_offset: i32,
    pub value: f64,
    pub exceeds_baseline: bool,
}

impl VolatilityDataPoint {
    pub fn v1(
        day_offset: i32,
        value: f64,
        exceeds_baseline: bool,
    ) -> Result<Self, ContractViolation> {
        let point = Self {
            day_offset,
            value,
            exceeds_baseline,
        };
        point.validate()?;
        Ok(point)
    }
}

impl Validate for VolatilityDataPoint {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.day_offset > 0 {
            return Err(ContractViolation::InvalidValue {
                field: "volatility_data_point.day_offset",
                reason: "must be <= 0",
            });
        }
        validate_percent("volatility_data_point.value", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentinelTrigger {
    pub triggered_at: MonotonicTimeNs,
    pub day_offset: i32,
    pub days_above_baseline: u8,
    pub peak_value: f64,
}

impl SentinelTrigger {
    pub fn v1(
        triggered_at: MonotonicTimeNs,
        day_offset: i32,
        days_above_baseline: u8,
        peak_value: f64,
    ) -> Result<Self, ContractViolation> {
        let trigger = Self {
            triggered_at,
            day_offset,
            days_above_baseline,
            peak_value,
        };
        trigger.validate()?;
        Ok(trigger)
    }
}

impl Validate for SentinelTrigger {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.day_offset > 0 {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_trigger.day_offset",
                reason: "must be <= 0",
            });
        }
        if self.days_above_baseline < MIN_TRIGGER_DAYS {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_trigger.days_above_baseline",
                reason: "must be >= MIN_TRIGGER_DAYS",
            });
        }
        validate_percent("sentinel_trigger.peak_value", self.peak_value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Validate for SeriesStats {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_percent("series_stats.mean", self.mean)?;
        validate_percent("series_stats.min", self.min)?;
        validate_percent("series_stats.max", self.max)?;
        if !self.std_dev.is_finite() {
            return Err(ContractViolation::NotFinite {
                field: "series_stats.std_dev",
            });
        }
        if self.std_dev < 0.0 {
            return Err(ContractViolation::InvalidValue {
                field: "series_stats.std_dev",
                reason: "must be >= 0",
            });
        }
        // Tolerate float drift in the mean of a constant series.
        if self.min > self.mean + 1e-9 || self.mean > self.max + 1e-9 {
            return Err(ContractViolation::InvalidValue {
                field: "series_stats.mean",
                reason: "must lie within min..=max",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSeriesResult {
    pub schema_version: SchemaVersion,
    pub vertical: Vertical,
    pub age_cohort: AgeCohortBand,
    pub points: Vec<VolatilityDataPoint>,
    pub baseline: f64,
    pub upper_band: f64,
    pub lower_band: f64,
    pub trigger_days: u8,
    pub trigger_events: Vec<SentinelTrigger>,
    pub system_state: SystemState,
    pub consecutive_days_above_baseline: u16,
    pub current_run_days: u16,
    pub assessments: Vec<String>,
    pub series_hash: String,
    pub stats: SeriesStats,
}

impl CohortSeriesResult {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        vertical: Vertical,
        age_cohort: AgeCohortBand,
        points: Vec<VolatilityDataPoint>,
        baseline: f64,
        upper_band: f64,
        lower_band: f64,
        trigger_days: u8,
        trigger_events: Vec<SentinelTrigger>,
        system_state: SystemState,
        consecutive_days_above_baseline: u16,
        current_run_days: u16,
        assessments: Vec<String>,
        series_hash: String,
        stats: SeriesStats,
    ) -> Result<Self, ContractViolation> {
        let out = Self {
            schema_version: PH1SENTINEL_CONTRACT_VERSION,
            vertical,
            age_cohort,
            points,
            baseline,
            upper_band,
            lower_band,
            trigger_days,
            trigger_events,
            system_state,
            consecutive_days_above_baseline,
            current_run_days,
            assessments,
            series_hash,
            stats,
        };
        out.validate()?;
        Ok(out)
    }
}

impl Validate for CohortSeriesResult {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != PH1SENTINEL_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_result.schema_version",
                reason: "must match PH1SENTINEL_CONTRACT_VERSION",
            });
        }
        validate_membership(
            "cohort_series_result.age_cohort",
            self.vertical,
            self.age_cohort,
        )?;
        if self.points.len() < 2 || self.points.len() > MAX_HISTORY_DAYS as usize + 1 {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_result.points",
                reason: "must contain 2..=MAX_HISTORY_DAYS+1 points",
            });
        }
        validate_percent("cohort_series_result.baseline", self.baseline)?;
        validate_percent("cohort_series_result.upper_band", self.upper_band)?;
        validate_percent("cohort_series_result.lower_band", self.lower_band)?;
        if self.lower_band > self.baseline || self.baseline > self.upper_band {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_result.baseline",
                reason: "must satisfy lower_band <= baseline <= upper_band",
            });
        }

        let first_offset = -(self.points.len() as i32 - 1);
        for (idx, point) in self.points.iter().enumerate() {
            point.validate()?;
            if point.day_offset != first_offset + idx as i32 {
                return Err(ContractViolation::InvalidValue {
                    field: "cohort_series_result.points",
                    reason: "day offsets must increase by one and end at 0",
                });
            }
            if point.exceeds_baseline != (point.value > self.baseline) {
                return Err(ContractViolation::InvalidValue {
                    field: "cohort_series_result.points",
                    reason: "exceeds_baseline must equal value > baseline",
                });
            }
        }

        if self.trigger_days < MIN_TRIGGER_DAYS || self.trigger_days as usize > self.points.len() {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_result.trigger_days",
                reason: "must be within MIN_TRIGGER_DAYS..=points.len()",
            });
        }
        let mut previous_offset = None;
        for trigger in &self.trigger_events {
            trigger.validate()?;
            if trigger.days_above_baseline != self.trigger_days {
                return Err(ContractViolation::InvalidValue {
                    field: "cohort_series_result.trigger_events",
                    reason: "days_above_baseline must equal trigger_days",
                });
            }
            if trigger.day_offset < first_offset {
                return Err(ContractViolation::InvalidValue {
                    field: "cohort_series_result.trigger_events",
                    reason: "day_offset must fall within the series window",
                });
            }
            if previous_offset.is_some_and(|prev| trigger.day_offset <= prev) {
                return Err(ContractViolation::InvalidValue {
                    field: "cohort_series_result.trigger_events",
                    reason: "must be ordered by day_offset",
                });
            }
            previous_offset = Some(trigger.day_offset);
        }

        let run = self.consecutive_days_above_baseline;
        if run as usize > self.points.len() || self.current_run_days > run {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_result.consecutive_days_above_baseline",
                reason: "must satisfy current_run_days <= run <= points.len()",
            });
        }
        let reached = run >= self.trigger_days as u16;
        if reached == self.trigger_events.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_result.trigger_events",
                reason: "must be non-empty exactly when the longest run reaches trigger_days",
            });
        }
        if self.system_state.is_sustained_breach() != reached {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_result.system_state",
                reason: "must be a breach state exactly when the longest run reaches trigger_days",
            });
        }

        if self.assessments.is_empty() || self.assessments.len() > 16 {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_result.assessments",
                reason: "must contain 1..=16 entries",
            });
        }
        for assessment in &self.assessments {
            validate_token("cohort_series_result.assessments", assessment, 256)?;
        }
        validate_series_hash("cohort_series_result.series_hash", &self.series_hash)?;
        self.stats.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentinelData {
    pub schema_version: SchemaVersion,
    pub vertical: Vertical,
    pub age_cohort: AgeCohortBand,
    pub sample_size: u32,
    pub cohort_label: String,
    pub series: CohortSeriesResult,
}

impl SentinelData {
    pub fn v1(
        sample_size: u32,
        cohort_label: String,
        series: CohortSeriesResult,
    ) -> Result<Self, ContractViolation> {
        let out = Self {
            schema_version: PH1SENTINEL_CONTRACT_VERSION,
            vertical: series.vertical,
            age_cohort: series.age_cohort,
            sample_size,
            cohort_label,
            series,
        };
        out.validate()?;
        Ok(out)
    }
}

impl Validate for SentinelData {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != PH1SENTINEL_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_data.schema_version",
                reason: "must match PH1SENTINEL_CONTRACT_VERSION",
            });
        }
        if self.sample_size < K_ANONYMITY_FLOOR {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_data.sample_size",
                reason: "must be >= K_ANONYMITY_FLOOR",
            });
        }
        validate_token("sentinel_data.cohort_label", &self.cohort_label, 128)?;
        if self.vertical != self.series.vertical || self.age_cohort != self.series.age_cohort {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_data.series",
                reason: "vertical and age_cohort must match the series",
            });
        }
        self.series.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ph1SentinelRequest {
    CohortSeries(CohortSeriesRequest),
    SentinelDemo(SentinelDemoRequest),
}

impl Validate for Ph1SentinelRequest {
    fn validate(&self) -> Result<(), ContractViolation> {
        match self {
            Ph1SentinelRequest::CohortSeries(req) => req.validate(),
            Ph1SentinelRequest::SentinelDemo(req) => req.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSeriesOk {
    pub schema_version: SchemaVersion,
    pub capability_id: SentinelCapabilityId,
    pub reason_code: ReasonCodeId,
    pub result: CohortSeriesResult,
}

impl CohortSeriesOk {
    pub fn v1(
        reason_code: ReasonCodeId,
        result: CohortSeriesResult,
    ) -> Result<Self, ContractViolation> {
        let out = Self {
            schema_version: PH1SENTINEL_CONTRACT_VERSION,
            capability_id: SentinelCapabilityId::CohortSeriesBuild,
            reason_code,
            result,
        };
        out.validate()?;
        Ok(out)
    }
}

impl Validate for CohortSeriesOk {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != PH1SENTINEL_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_ok.schema_version",
                reason: "must match PH1SENTINEL_CONTRACT_VERSION",
            });
        }
        if self.capability_id != SentinelCapabilityId::CohortSeriesBuild {
            return Err(ContractViolation::InvalidValue {
                field: "cohort_series_ok.capability_id",
                reason: "must be COHORT_SERIES_BUILD",
            });
        }
        self.result.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentinelDemoOk {
    pub schema_version: SchemaVersion,
    pub capability_id: SentinelCapabilityId,
    pub reason_code: ReasonCodeId,
    pub data: SentinelData,
}

impl SentinelDemoOk {
    pub fn v1(reason_code: ReasonCodeId, data: SentinelData) -> Result<Self, ContractViolation> {
        let out = Self {
            schema_version: PH1SENTINEL_CONTRACT_VERSION,
            capability_id: SentinelCapabilityId::SentinelDemoBuild,
            reason_code,
            data,
        };
        out.validate()?;
        Ok(out)
    }
}

impl Validate for SentinelDemoOk {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != PH1SENTINEL_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_demo_ok.schema_version",
                reason: "must match PH1SENTINEL_CONTRACT_VERSION",
            });
        }
        if self.capability_id != SentinelCapabilityId::SentinelDemoBuild {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_demo_ok.capability_id",
                reason: "must be SENTINEL_DEMO_BUILD",
            });
        }
        self.data.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelRefuse {
    pub schema_version: SchemaVersion,
    pub capability_id: SentinelCapabilityId,
    pub reason_code: ReasonCodeId,
    pub message: String,
}

impl SentinelRefuse {
    pub fn v1(
        capability_id: SentinelCapabilityId,
        reason_code: ReasonCodeId,
        message: String,
    ) -> Result<Self, ContractViolation> {
        let out = Self {
            schema_version: PH1SENTINEL_CONTRACT_VERSION,
            capability_id,
            reason_code,
            message,
        };
        out.validate()?;
        Ok(out)
    }
}

impl Validate for SentinelRefuse {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != PH1SENTINEL_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_refuse.schema_version",
                reason: "must match PH1SENTINEL_CONTRACT_VERSION",
            });
        }
        validate_token("sentinel_refuse.message", &self.message, 256)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ph1SentinelResponse {
    CohortSeriesOk(CohortSeriesOk),
    SentinelDemoOk(SentinelDemoOk),
    Refuse(SentinelRefuse),
}

impl Validate for Ph1SentinelResponse {
    fn validate(&self) -> Result<(), ContractViolation> {
        match self {
            Ph1SentinelResponse::CohortSeriesOk(out) => out.validate(),
            Ph1SentinelResponse::SentinelDemoOk(out) => out.validate(),
            Ph1SentinelResponse::Refuse(out) => out.validate(),
        }
    }
}

/// Rule of 5: a reported sample size is either 0 (not applicable) or at least the floor.
pub fn validate_sample_size(field: &'static str, sample_size: u32) -> Result<(), ContractViolation> {
    if sample_size != 0 && sample_size < K_ANONYMITY_FLOOR {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must be 0 or >= K_ANONYMITY_FLOOR",
        });
    }
    Ok(())
}

fn validate_percent(field: &'static str, value: f64) -> Result<(), ContractViolation> {
    if !value.is_finite() {
        return Err(ContractViolation::NotFinite { field });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ContractViolation::InvalidRange {
            field,
            min: 0.0,
            max: 100.0,
            got: value,
        });
    }
    Ok(())
}

fn validate_series_hash(field: &'static str, value: &str) -> Result<(), ContractViolation> {
    if value.len() != SERIES_HASH_HEX_LEN {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must be 16 hex characters",
        });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must be lowercase hex",
        });
    }
    Ok(())
}

fn validate_token(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), ContractViolation> {
    if value.trim().is_empty() {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must not be empty",
        });
    }
    if value.len() > max_len {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "exceeds max length",
        });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must not contain control characters",
        });
    }
    Ok(())
}
