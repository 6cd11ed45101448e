//! Run outcomes and console formatting.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Loads are steady and every processor has moved past its last snapshot.
    Converged,
    /// The lowest pending execution cycle reached the iteration cap first.
    IterationCapReached,
}

impl Outcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, Outcome::Converged)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Converged => "CONVERGED",
            Outcome::IterationCapReached => "ITERATION CAP REACHED",
        }
    }
}

/// Everything a finished run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub processors: usize,
    pub initial_loads: Vec<u64>,
    pub initial_cycles: Vec<u64>,
    pub final_loads: Vec<u64>,
    /// Execution cycles as of the last round whose loads were not yet steady.
    pub final_cycles: Vec<u64>,
    /// Execution cycles each processor was scheduled for when the run stopped.
    pub pending_cycles: Vec<u64>,
    /// Number of scheduler rounds executed.
    pub stages: u64,
    /// Lowest pending execution cycle when the run stopped.
    pub last_cycle: u64,
    pub outcome: Outcome,
}

impl SimulationReport {
    pub fn converged(&self) -> bool {
        self.outcome.is_converged()
    }

    pub fn total_load(&self) -> u64 {
        self.final_loads.iter().sum()
    }

    /// Difference between the largest and smallest final load.
    pub fn spread(&self) -> u64 {
        let max = self.final_loads.iter().max().copied().unwrap_or(0);
        let min = self.final_loads.iter().min().copied().unwrap_or(0);
        max - min
    }
}

/// Render a vector as `[a, b, c]`.
pub fn format_vector(values: &[u64]) -> String {
    let items: Vec<String> = values.iter().map(u64::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Render the console block for one case of a scenario.
///
/// `case_number` is 1-based.
pub fn format_case(case_number: usize, config: &SimulationConfig, report: &SimulationReport) -> String {
    let outcome = match report.outcome {
        Outcome::Converged => format!(
            "Number of stages to reach steady balanced state: {}",
            report.stages
        ),
        Outcome::IterationCapReached => "Max iterations were reached".to_string(),
    };

    format!(
        "Case {case_number}\n\
         Number of Processors: {processors}\n\
         Minimum Load Value: {load_min}\n\
         Maximum Load Value: {load_max}\n\
         Minimum Interval Value: {cycle_min}\n\
         Maximum Interval Value: {cycle_max}\n\
         \n\
         Initial Loads::\n{initial_loads}\n\n\
         Initial Cycles::\n{initial_cycles}\n\n\
         {outcome}\n\n\
         Final Loads::\n{final_loads}\n\n\
         Final Cycles::\n{final_cycles}\n",
        processors = config.processors,
        load_min = config.loads.min,
        load_max = config.loads.max,
        cycle_min = config.cycles.min,
        cycle_max = config.cycles.max,
        initial_loads = format_vector(&report.initial_loads),
        initial_cycles = format_vector(&report.initial_cycles),
        final_loads = format_vector(&report.final_loads),
        final_cycles = format_vector(&report.final_cycles),
    )
}
