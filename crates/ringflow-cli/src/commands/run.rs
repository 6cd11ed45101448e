use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use ringflow_core::{ScenarioConfig, SimulationConfig, SimulationReport, format_case};
use ringflow_sim::SeededSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Scenario file (TOML). Without one the built-in scenario is used.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Seed for the random source. Drawn from the OS when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Processor count of a case; repeat to run several cases.
    #[arg(short = 'n', long = "processors")]
    pub processors: Vec<usize>,
    #[arg(long)]
    pub load_min: Option<u64>,
    #[arg(long)]
    pub load_max: Option<u64>,
    #[arg(long)]
    pub cycle_min: Option<u64>,
    #[arg(long)]
    pub cycle_max: Option<u64>,
    /// Stop once simulated time reaches this execution cycle.
    #[arg(long)]
    pub max_iter: Option<u64>,
    /// Output format: text or json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Result of one case of a scenario.
#[derive(Debug, Serialize)]
pub struct CaseResult {
    pub case: usize,
    pub config: SimulationConfig,
    pub report: SimulationReport,
}

/// All cases of a scenario, plus the seed that reproduces them.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub cases: Vec<CaseResult>,
}

pub fn run(args: &RunArgs) -> anyhow::Result<()> {
    let scenario = resolve_scenario(args)?;
    let summary = execute(&scenario)?;
    println!("{}", render(&summary, args.format)?);
    Ok(())
}

/// Load the scenario file (or the defaults) and apply command-line overrides.
pub fn resolve_scenario(args: &RunArgs) -> anyhow::Result<ScenarioConfig> {
    let mut scenario = match &args.config {
        Some(path) => ScenarioConfig::from_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };

    if args.seed.is_some() {
        scenario.seed = args.seed;
    }
    if !args.processors.is_empty() {
        scenario.processor_counts = args.processors.clone();
    }
    if let Some(v) = args.load_min {
        scenario.loads.min = v;
    }
    if let Some(v) = args.load_max {
        scenario.loads.max = v;
    }
    if let Some(v) = args.cycle_min {
        scenario.cycles.min = v;
    }
    if let Some(v) = args.cycle_max {
        scenario.cycles.max = v;
    }
    if let Some(v) = args.max_iter {
        scenario.max_iter = v;
    }

    scenario.validate()?;
    Ok(scenario)
}

/// Run every case in order, drawing all of them from one random source.
pub fn execute(scenario: &ScenarioConfig) -> anyhow::Result<RunSummary> {
    let mut source = match scenario.seed {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_entropy(),
    };
    let seed = source.seed();
    info!(seed, cases = scenario.processor_counts.len(), "running scenario");

    let mut cases = Vec::with_capacity(scenario.processor_counts.len());
    for (i, config) in scenario.cases().into_iter().enumerate() {
        let case = i + 1;
        let report = ringflow_sim::simulate(&config, &mut source)
            .with_context(|| format!("case {case} ({} processors)", config.processors))?;
        info!(
            case,
            processors = config.processors,
            outcome = report.outcome.label(),
            stages = report.stages,
            spread = report.spread(),
            "case finished"
        );
        cases.push(CaseResult {
            case,
            config,
            report,
        });
    }

    Ok(RunSummary { seed, cases })
}

pub fn render(summary: &RunSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => {
            let mut out = format!("Seed: {}\n", summary.seed);
            for case in &summary.cases {
                out.push('\n');
                out.push_str(&format_case(case.case, &case.config, &case.report));
            }
            Ok(out)
        }
    }
}
