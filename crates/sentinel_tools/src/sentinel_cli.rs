#![forbid(unsafe_code)]

use sentinel_engines::ph1sentinel::{cohort_label, Ph1SentinelRuntime};
use sentinel_engines::sample_size::sample_size;
use sentinel_kernel_contracts::cohort::{AgeCohortBand, Vertical};
use sentinel_kernel_contracts::ph1sentinel::{CohortSeriesRequest, MAX_HISTORY_DAYS};
use sentinel_kernel_contracts::Validate;
use sentinel_os::ph1sentinel::{
    Ph1SentinelWiring, Ph1SentinelWiringConfig, SentinelDemoInput, SentinelWiringOutcome,
};
use serde_json::json;

const USAGE: &str = "usage: sentinel <series|demo|cohorts> ...\n  \
sentinel series <vertical> <cohort> <n> <seed> [--history-days N] [--trigger-days N] [--no-emphasis]\n  \
sentinel demo <vertical> <cohort> [seed]\n  \
sentinel cohorts <vertical>";

pub fn execute_sentinel_command(args: &[String]) -> Result<String, String> {
    let subcommand = args.first().ok_or_else(|| USAGE.to_string())?;
    let rest = &args[1..];
    match subcommand.as_str() {
        "series" => run_series(rest),
        "demo" => run_demo(rest),
        "cohorts" => list_cohorts(rest),
        other => Err(format!(
            "unknown sentinel subcommand: {other}. expected one of: series, demo, cohorts"
        )),
    }
}

pub fn parse_vertical(raw: &str) -> Result<Vertical, String> {
    Vertical::parse(raw).ok_or_else(|| {
        let allowed: Vec<&str> = Vertical::ALL.iter().map(|v| v.as_str()).collect();
        format!("unknown vertical '{raw}'. allowed: {}", allowed.join(", "))
    })
}

pub fn parse_cohort(vertical: Vertical, raw: &str) -> Result<AgeCohortBand, String> {
    let allowed = || {
        vertical
            .cohorts()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    match AgeCohortBand::parse(raw) {
        Some(cohort) if vertical.includes(cohort) => Ok(cohort),
        Some(_) => Err(format!(
            "age cohort '{raw}' is not applicable to {}. allowed: {}",
            vertical.as_str(),
            allowed()
        )),
        None => Err(format!("unknown age cohort '{raw}'. allowed: {}", allowed())),
    }
}

fn run_series(args: &[String]) -> Result<String, String> {
    let mut positional = Vec::new();
    let mut history_days = None;
    let mut trigger_days = None;
    let mut narrative_emphasis = true;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--history-days" => {
                history_days = Some(parse_number::<u16>("history-days", iter.next())?);
            }
            "--trigger-days" => {
                trigger_days = Some(parse_number::<u8>("trigger-days", iter.next())?);
            }
            "--no-emphasis" => narrative_emphasis = false,
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
            _ => positional.push(arg),
        }
    }
    let [vertical, cohort, n, seed] = positional.as_slice() else {
        return Err(USAGE.to_string());
    };

    let vertical = parse_vertical(vertical)?;
    let cohort = parse_cohort(vertical, cohort)?;
    let n = parse_number::<u32>("n", Some(*n))?;
    let seed = parse_number::<u64>("seed", Some(*seed))?;

    let mut req = CohortSeriesRequest::v1(vertical, cohort, n, seed)
        .map_err(|e| format!("invalid series request: {e}"))?
        .with_narrative_emphasis(narrative_emphasis);
    // Both lengths are checked together so flag order does not matter.
    if let Some(days) = history_days {
        req.history_days = days;
    }
    if let Some(days) = trigger_days {
        req.trigger_days = days;
    }
    req.validate()
        .map_err(|e| format!("invalid series request: {e}"))?;

    let outcome = wiring()?
        .run_series(&req)
        .map_err(|e| format!("series build failed: {e}"))?;
    render(outcome)
}

fn run_demo(args: &[String]) -> Result<String, String> {
    let (vertical, cohort, seed) = match args {
        [vertical, cohort] => (vertical, cohort, None),
        [vertical, cohort, seed] => {
            let seed = parse_number::<u64>("seed", Some(seed))?;
            (vertical, cohort, Some(seed))
        }
        _ => return Err(USAGE.to_string()),
    };
    let vertical = parse_vertical(vertical)?;
    let cohort = parse_cohort(vertical, cohort)?;
    let input = SentinelDemoInput::v1(vertical, cohort, seed)
        .map_err(|e| format!("invalid demo request: {e}"))?;

    let outcome = wiring()?
        .run_demo(&input)
        .map_err(|e| format!("demo build failed: {e}"))?;
    render(outcome)
}

fn list_cohorts(args: &[String]) -> Result<String, String> {
    let [vertical] = args else {
        return Err("usage: sentinel cohorts <vertical>".to_string());
    };
    let vertical = parse_vertical(vertical)?;
    let rows: Vec<_> = vertical
        .cohorts()
        .iter()
        .map(|cohort| {
            let n = sample_size(vertical, *cohort);
            json!({
                "age_cohort": cohort.as_str(),
                "sample_size": n,
                "label": cohort_label(vertical, *cohort, n),
            })
        })
        .collect();
    serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())
}

fn wiring() -> Result<Ph1SentinelWiring<Ph1SentinelRuntime>, String> {
    let config = Ph1SentinelWiringConfig {
        max_history_days: MAX_HISTORY_DAYS,
        ..Ph1SentinelWiringConfig::mvp_v1(true)
    };
    Ph1SentinelWiring::new(config, Ph1SentinelRuntime::default())
        .map_err(|e| format!("invalid wiring config: {e}"))
}

fn render(outcome: SentinelWiringOutcome) -> Result<String, String> {
    match outcome {
        SentinelWiringOutcome::SeriesForwarded(result) => {
            serde_json::to_string_pretty(&result).map_err(|e| e.to_string())
        }
        SentinelWiringOutcome::DemoForwarded(data) => {
            serde_json::to_string_pretty(&data).map_err(|e| e.to_string())
        }
        SentinelWiringOutcome::Refused(refuse) => Err(format!(
            "refused ({:#010x}): {}",
            refuse.reason_code.0, refuse.message
        )),
        SentinelWiringOutcome::NotInvokedDisabled => Err("sentinel is disabled".to_string()),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: Option<&String>) -> Result<T, String> {
    let raw = raw.ok_or_else(|| format!("missing value for {name}"))?;
    raw.parse::<T>()
        .map_err(|_| format!("invalid {name}: '{raw}'"))
}
