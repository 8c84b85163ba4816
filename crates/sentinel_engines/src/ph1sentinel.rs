#![forbid(unsafe_code)]

use sentinel_kernel_contracts::cohort::{AgeCohortBand, Vertical};
use sentinel_kernel_contracts::ph1sentinel::{
    CohortSeriesOk, CohortSeriesRequest, CohortSeriesResult, Ph1SentinelRequest,
    Ph1SentinelResponse, SentinelCapabilityId, SentinelData, SentinelDemoOk, SentinelDemoRequest,
    SentinelRefuse, SystemState, DEFAULT_HISTORY_DAYS, MAX_HISTORY_DAYS,
};
use sentinel_kernel_contracts::{ContractViolation, ReasonCodeId, Validate};

use crate::characteristics::characteristics;
use crate::classifier::classify;
use crate::prng::SeededRandom;
use crate::sample_size::resolve_sample_size;
use crate::series::{round_tenths, to_points, NarrativeEmphasis, SignalModel};
use crate::stats::{compute_stats, series_hash};
use crate::trigger::{detect_triggers, TriggerScan};

pub mod reason_codes {
    use sentinel_kernel_contracts::ReasonCodeId;

    // PH1.SENTINEL reason-code namespace. Values are placeholders until global registry lock.
    pub const PH1_SENTINEL_OK_COHORT_SERIES: ReasonCodeId = ReasonCodeId(0x5345_0001);
    pub const PH1_SENTINEL_OK_DEMO_DATA: ReasonCodeId = ReasonCodeId(0x5345_0002);

    pub const PH1_SENTINEL_INPUT_SCHEMA_INVALID: ReasonCodeId = ReasonCodeId(0x5345_00F1);
    pub const PH1_SENTINEL_COHORT_NOT_APPLICABLE: ReasonCodeId = ReasonCodeId(0x5345_00F2);
    pub const PH1_SENTINEL_BUDGET_EXCEEDED: ReasonCodeId = ReasonCodeId(0x5345_00F3);
    pub const PH1_SENTINEL_INTERNAL_PIPELINE_ERROR: ReasonCodeId = ReasonCodeId(0x5345_00F4);
}

const MAX_TRIGGER_ASSESSMENTS: usize = 8;
const TREND_WINDOW_DAYS: usize = 7;
const TREND_DEADBAND: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ph1SentinelConfig {
    pub noise_scale: f64,
    pub seasonal_amplitude: f64,
    pub weekend_offset: f64,
    pub emphasis_days: u8,
    pub emphasis_step: f64,
    pub band_width: f64,
    pub max_history_days: u16,
}

impl Ph1SentinelConfig {
    pub fn mvp_v1() -> Self {
        Self {
            noise_scale: 4.0,
            seasonal_amplitude: 5.0,
            weekend_offset: -5.0,
            emphasis_days: 7,
            emphasis_step: 2.0,
            band_width: 10.0,
            max_history_days: MAX_HISTORY_DAYS,
        }
    }

    fn signal_model(&self) -> SignalModel {
        SignalModel {
            noise_scale: self.noise_scale,
            seasonal_amplitude: self.seasonal_amplitude,
            weekend_offset: self.weekend_offset,
        }
    }

    fn narrative_emphasis(&self) -> NarrativeEmphasis {
        NarrativeEmphasis {
            days: self.emphasis_days as usize,
            step: self.emphasis_step,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ph1SentinelRuntime {
    config: Ph1SentinelConfig,
}

impl Ph1SentinelRuntime {
    pub fn new(config: Ph1SentinelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Ph1SentinelConfig {
        &self.config
    }

    pub fn run(&self, req: &Ph1SentinelRequest) -> Ph1SentinelResponse {
        let capability_id = capability_from_request(req);
        if let Err(violation) = req.validate() {
            return self.refuse(
                capability_id,
                reason_code_for_violation(&violation),
                "sentinel request failed contract validation",
            );
        }

        match req {
            Ph1SentinelRequest::CohortSeries(r) => {
                if r.history_days > self.config.max_history_days {
                    return self.refuse(
                        capability_id,
                        reason_codes::PH1_SENTINEL_BUDGET_EXCEEDED,
                        "history_days exceeds configured budget",
                    );
                }
                match self
                    .build_cohort_series(r)
                    .and_then(|result| {
                        CohortSeriesOk::v1(reason_codes::PH1_SENTINEL_OK_COHORT_SERIES, result)
                    }) {
                    Ok(ok) => Ph1SentinelResponse::CohortSeriesOk(ok),
                    Err(_) => self.refuse(
                        capability_id,
                        reason_codes::PH1_SENTINEL_INTERNAL_PIPELINE_ERROR,
                        "failed to construct cohort series output",
                    ),
                }
            }
            Ph1SentinelRequest::SentinelDemo(r) => {
                if DEFAULT_HISTORY_DAYS > self.config.max_history_days {
                    return self.refuse(
                        capability_id,
                        reason_codes::PH1_SENTINEL_BUDGET_EXCEEDED,
                        "demo history window exceeds configured budget",
                    );
                }
                match self
                    .build_sentinel_demo_data(r)
                    .and_then(|data| SentinelDemoOk::v1(reason_codes::PH1_SENTINEL_OK_DEMO_DATA, data))
                {
                    Ok(ok) => Ph1SentinelResponse::SentinelDemoOk(ok),
                    Err(_) => self.refuse(
                        capability_id,
                        reason_codes::PH1_SENTINEL_INTERNAL_PIPELINE_ERROR,
                        "failed to construct sentinel demo output",
                    ),
                }
            }
        }
    }

    pub fn build_cohort_series(
        &self,
        req: &CohortSeriesRequest,
    ) -> Result<CohortSeriesResult, ContractViolation> {
        req.validate()?;
        if req.history_days > self.config.max_history_days {
            return Err(ContractViolation::InvalidRange {
                field: "cohort_series_request.history_days",
                min: 1.0,
                max: self.config.max_history_days as f64,
                got: req.history_days as f64,
            });
        }

        let cohort = characteristics(req.age_cohort);
        let threshold = cohort.effective_threshold(req.baseline_threshold);

        let mut rng = SeededRandom::for_cohort(req.seed, req.vertical, req.age_cohort, req.n);
        let mut raw = self.config.signal_model().generate(
            &mut rng,
            &cohort,
            req.baseline_threshold,
            req.history_days,
            req.as_of,
        );
        if req.narrative_emphasis {
            self.config.narrative_emphasis().apply(&mut raw);
        }

        let points = to_points(&raw, threshold)?;
        let scan = detect_triggers(&points, req.trigger_days, req.as_of)?;
        let system_state = classify(scan.max_consecutive, scan.triggers.len(), req.trigger_days);
        let stats = compute_stats(&raw);
        let hash = series_hash(&points);

        let half_band = self.config.band_width * cohort.variance_multiplier;
        let upper_band = round_tenths((threshold + half_band).min(100.0)).max(threshold);
        let lower_band = round_tenths((threshold - half_band).max(0.0)).min(threshold);

        let assessments = assessments(system_state, &scan, req.trigger_days, &raw);

        CohortSeriesResult::v1(
            req.vertical,
            req.age_cohort,
            points,
            threshold,
            upper_band,
            lower_band,
            req.trigger_days,
            scan.triggers,
            system_state,
            scan.max_consecutive,
            scan.current_run,
            assessments,
            hash,
            stats,
        )
    }

    pub fn build_sentinel_demo_data(
        &self,
        req: &SentinelDemoRequest,
    ) -> Result<SentinelData, ContractViolation> {
        req.validate()?;
        let sample_size = resolve_sample_size(req.vertical, req.age_cohort);
        let series_req =
            CohortSeriesRequest::v1(req.vertical, req.age_cohort, sample_size, req.seed)?;
        let series = self.build_cohort_series(&series_req)?;
        SentinelData::v1(
            sample_size,
            cohort_label(req.vertical, req.age_cohort, sample_size),
            series,
        )
    }

    fn refuse(
        &self,
        capability_id: SentinelCapabilityId,
        reason_code: ReasonCodeId,
        message: &'static str,
    ) -> Ph1SentinelResponse {
        let out = SentinelRefuse::v1(capability_id, reason_code, message.to_string())
            .expect("SentinelRefuse::v1 must construct for static messages");
        Ph1SentinelResponse::Refuse(out)
    }
}

impl Default for Ph1SentinelRuntime {
    fn default() -> Self {
        Self::new(Ph1SentinelConfig::mvp_v1())
    }
}

/// Builds one cohort series with the default model configuration.
pub fn build_cohort_series(
    req: &CohortSeriesRequest,
) -> Result<CohortSeriesResult, ContractViolation> {
    Ph1SentinelRuntime::default().build_cohort_series(req)
}

/// Resolves the sample size, builds the series and attaches a display label.
pub fn build_sentinel_demo_data(
    req: &SentinelDemoRequest,
) -> Result<SentinelData, ContractViolation> {
    Ph1SentinelRuntime::default().build_sentinel_demo_data(req)
}

pub fn cohort_label(vertical: Vertical, cohort: AgeCohortBand, sample_size: u32) -> String {
    format!(
        "{} {}, ages {} (n={})",
        vertical.display_name(),
        population_noun(vertical, cohort),
        cohort.as_str(),
        sample_size
    )
}

fn population_noun(vertical: Vertical, cohort: AgeCohortBand) -> &'static str {
    match vertical {
        Vertical::K12 if cohort.is_minor() => "Students",
        Vertical::K12 => "Staff",
        Vertical::University if cohort == AgeCohortBand::Age18To24 => "Students",
        Vertical::University => "Staff/Faculty",
        Vertical::Healthcare => "Staff",
        Vertical::Employer => "Employees",
        Vertical::Global => "Adults",
    }
}

fn assessments(
    state: SystemState,
    scan: &TriggerScan,
    trigger_days: u8,
    raw: &[f64],
) -> Vec<String> {
    let run = scan.max_consecutive;
    let mut out = vec![match state {
        SystemState::Baseline => format!(
            "Baseline: longest run above baseline is {run} day(s), below the {trigger_days}-day trigger"
        ),
        SystemState::Elevated => format!(
            "Elevated: {run} consecutive day(s) above baseline, approaching the {trigger_days}-day trigger"
        ),
        SystemState::SustainedVolatility => {
            format!("Sustained volatility: {run} consecutive days above baseline")
        }
        SystemState::Critical => format!(
            "Critical: {run} consecutive days above baseline with {} trigger(s) fired",
            scan.triggers.len()
        ),
    }];

    for trigger in scan.triggers.iter().take(MAX_TRIGGER_ASSESSMENTS) {
        out.push(format!(
            "Trigger fired on day {} after {} consecutive days (peak {:.1})",
            trigger.day_offset, trigger.days_above_baseline, trigger.peak_value
        ));
    }

    if run > 0 && scan.current_run < run {
        out.push(format!(
            "Longest run above baseline ended before today; current run is {} day(s)",
            scan.current_run
        ));
    }

    if raw.len() > TREND_WINDOW_DAYS {
        let split = raw.len() - TREND_WINDOW_DAYS;
        let earlier = raw[..split].iter().sum::<f64>() / split as f64;
        let recent = raw[split..].iter().sum::<f64>() / TREND_WINDOW_DAYS as f64;
        let delta = recent - earlier;
        out.push(if delta > TREND_DEADBAND {
            format!("Rising: final 7-day mean is {delta:.1} above the earlier window")
        } else if delta < -TREND_DEADBAND {
            format!("Easing: final 7-day mean is {:.1} below the earlier window", -delta)
        } else {
            format!("Stable: final 7-day mean within {TREND_DEADBAND:.1} of the earlier window")
        });
    }

    out
}

fn capability_from_request(req: &Ph1SentinelRequest) -> SentinelCapabilityId {
    match req {
        Ph1SentinelRequest::CohortSeries(_) => SentinelCapabilityId::CohortSeriesBuild,
        Ph1SentinelRequest::SentinelDemo(_) => SentinelCapabilityId::SentinelDemoBuild,
    }
}

fn reason_code_for_violation(violation: &ContractViolation) -> ReasonCodeId {
    match violation {
        ContractViolation::InvalidValue { field, .. } if field.ends_with(".age_cohort") => {
            reason_codes::PH1_SENTINEL_COHORT_NOT_APPLICABLE
        }
        _ => reason_codes::PH1_SENTINEL_INPUT_SCHEMA_INVALID,
    }
}
