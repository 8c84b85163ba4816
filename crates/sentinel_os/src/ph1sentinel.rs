#![forbid(unsafe_code)]

use sentinel_engines::ph1sentinel::Ph1SentinelRuntime;
use sentinel_kernel_contracts::cohort::{AgeCohortBand, Vertical};
use sentinel_kernel_contracts::ph1sentinel::{
    CohortSeriesRequest, CohortSeriesResult, Ph1SentinelRequest, Ph1SentinelResponse,
    SentinelCapabilityId, SentinelData, SentinelDemoRequest, SentinelRefuse, MAX_HISTORY_DAYS,
};
use sentinel_kernel_contracts::{ContractViolation, Validate};
use tracing::{debug, info, warn};

pub mod reason_codes {
    use sentinel_kernel_contracts::ReasonCodeId;

    // PH1.SENTINEL OS wiring reason-code namespace. Values are placeholders until registry lock.
    pub const PH1_SENTINEL_VALIDATION_FAILED: ReasonCodeId = ReasonCodeId(0x5345_0101);
    pub const PH1_SENTINEL_BUDGET_EXCEEDED: ReasonCodeId = ReasonCodeId(0x5345_0102);
    pub const PH1_SENTINEL_INTERNAL_PIPELINE_ERROR: ReasonCodeId = ReasonCodeId(0x5345_01F1);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ph1SentinelWiringConfig {
    pub sentinel_enabled: bool,
    pub max_history_days: u16,
}

impl Ph1SentinelWiringConfig {
    pub fn mvp_v1(sentinel_enabled: bool) -> Self {
        Self {
            sentinel_enabled,
            max_history_days: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelDemoInput {
    pub vertical: Vertical,
    pub age_cohort: AgeCohortBand,
    pub seed: Option<u64>,
}

impl SentinelDemoInput {
    pub fn v1(
        vertical: Vertical,
        age_cohort: AgeCohortBand,
        seed: Option<u64>,
    ) -> Result<Self, ContractViolation> {
        let input = Self {
            vertical,
            age_cohort,
            seed,
        };
        input.validate()?;
        Ok(input)
    }
}

impl Validate for SentinelDemoInput {
    fn validate(&self) -> Result<(), ContractViolation> {
        if !self.vertical.includes(self.age_cohort) {
            return Err(ContractViolation::InvalidValue {
                field: "sentinel_demo_input.age_cohort",
                reason: "age cohort is not applicable to vertical",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SentinelWiringOutcome {
    NotInvokedDisabled,
    Refused(SentinelRefuse),
    SeriesForwarded(CohortSeriesResult),
    DemoForwarded(SentinelData),
}

pub trait Ph1SentinelEngine {
    fn run(&self, req: &Ph1SentinelRequest) -> Ph1SentinelResponse;
}

impl Ph1SentinelEngine for Ph1SentinelRuntime {
    fn run(&self, req: &Ph1SentinelRequest) -> Ph1SentinelResponse {
        Ph1SentinelRuntime::run(self, req)
    }
}

#[derive(Debug, Clone)]
pub struct Ph1SentinelWiring<E>
where
    E: Ph1SentinelEngine,
{
    config: Ph1SentinelWiringConfig,
    engine: E,
}

impl<E> Ph1SentinelWiring<E>
where
    E: Ph1SentinelEngine,
{
    pub fn new(config: Ph1SentinelWiringConfig, engine: E) -> Result<Self, ContractViolation> {
        if config.max_history_days == 0 || config.max_history_days > MAX_HISTORY_DAYS {
            return Err(ContractViolation::InvalidValue {
                field: "ph1sentinel_wiring_config.max_history_days",
                reason: "must be within 1..=MAX_HISTORY_DAYS",
            });
        }
        Ok(Self { config, engine })
    }

    pub fn run_series(
        &self,
        req: &CohortSeriesRequest,
    ) -> Result<SentinelWiringOutcome, ContractViolation> {
        req.validate()?;

        if !self.config.sentinel_enabled {
            debug!("sentinel disabled; series not built");
            return Ok(SentinelWiringOutcome::NotInvokedDisabled);
        }
        if req.history_days > self.config.max_history_days {
            warn!(
                history_days = req.history_days,
                max_history_days = self.config.max_history_days,
                "series request exceeds wiring history budget"
            );
            return Ok(SentinelWiringOutcome::Refused(SentinelRefuse::v1(
                SentinelCapabilityId::CohortSeriesBuild,
                reason_codes::PH1_SENTINEL_BUDGET_EXCEEDED,
                "history_days exceeds wiring budget".to_string(),
            )?));
        }

        debug!(
            vertical = req.vertical.as_str(),
            age_cohort = req.age_cohort.as_str(),
            n = req.n,
            seed = req.seed,
            "invoking cohort series build"
        );
        let resp = self
            .engine
            .run(&Ph1SentinelRequest::CohortSeries(req.clone()));
        resp.validate()?;

        let result = match resp {
            Ph1SentinelResponse::Refuse(refuse) => return Ok(self.refused(refuse)),
            Ph1SentinelResponse::CohortSeriesOk(ok) => ok.result,
            Ph1SentinelResponse::SentinelDemoOk(_) => {
                return Ok(self.refused(SentinelRefuse::v1(
                    SentinelCapabilityId::CohortSeriesBuild,
                    reason_codes::PH1_SENTINEL_INTERNAL_PIPELINE_ERROR,
                    "unexpected demo response for series request".to_string(),
                )?))
            }
        };

        if result.vertical != req.vertical
            || result.age_cohort != req.age_cohort
            || result.points.len() != req.point_count()
        {
            return Ok(self.refused(SentinelRefuse::v1(
                SentinelCapabilityId::CohortSeriesBuild,
                reason_codes::PH1_SENTINEL_VALIDATION_FAILED,
                "series result does not match request".to_string(),
            )?));
        }

        info!(
            vertical = result.vertical.as_str(),
            age_cohort = result.age_cohort.as_str(),
            system_state = result.system_state.as_str(),
            series_hash = %result.series_hash,
            "cohort series forwarded"
        );
        Ok(SentinelWiringOutcome::SeriesForwarded(result))
    }

    pub fn run_demo(
        &self,
        input: &SentinelDemoInput,
    ) -> Result<SentinelWiringOutcome, ContractViolation> {
        input.validate()?;

        if !self.config.sentinel_enabled {
            debug!("sentinel disabled; demo data not built");
            return Ok(SentinelWiringOutcome::NotInvokedDisabled);
        }

        let req = SentinelDemoRequest::v1(input.vertical, input.age_cohort, input.seed)?;
        debug!(
            vertical = req.vertical.as_str(),
            age_cohort = req.age_cohort.as_str(),
            seed = req.seed,
            "invoking sentinel demo build"
        );
        let resp = self.engine.run(&Ph1SentinelRequest::SentinelDemo(req));
        resp.validate()?;

        let data = match resp {
            Ph1SentinelResponse::Refuse(refuse) => return Ok(self.refused(refuse)),
            Ph1SentinelResponse::SentinelDemoOk(ok) => ok.data,
            Ph1SentinelResponse::CohortSeriesOk(_) => {
                return Ok(self.refused(SentinelRefuse::v1(
                    SentinelCapabilityId::SentinelDemoBuild,
                    reason_codes::PH1_SENTINEL_INTERNAL_PIPELINE_ERROR,
                    "unexpected series response for demo request".to_string(),
                )?))
            }
        };

        if data.vertical != input.vertical || data.age_cohort != input.age_cohort {
            return Ok(self.refused(SentinelRefuse::v1(
                SentinelCapabilityId::SentinelDemoBuild,
                reason_codes::PH1_SENTINEL_VALIDATION_FAILED,
                "demo data does not match requested cohort".to_string(),
            )?));
        }

        info!(
            cohort_label = %data.cohort_label,
            system_state = data.series.system_state.as_str(),
            triggers = data.series.trigger_events.len(),
            "sentinel demo data forwarded"
        );
        Ok(SentinelWiringOutcome::DemoForwarded(data))
    }

    fn refused(&self, refuse: SentinelRefuse) -> SentinelWiringOutcome {
        warn!(
            capability_id = refuse.capability_id.as_str(),
            reason_code = refuse.reason_code.0,
            message = %refuse.message,
            "sentinel request refused"
        );
        SentinelWiringOutcome::Refused(refuse)
    }
}
