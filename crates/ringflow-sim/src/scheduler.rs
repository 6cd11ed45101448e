//! Stage scheduler.
//!
//! Simulated time is the execution-cycle axis. Each stage jumps straight
//! to the lowest pending cycle, runs the balance step of every processor
//! due at that cycle (in ring order), and reschedules each of them a
//! random interval later.

use tracing::{debug, info, warn};

use ringflow_core::{Outcome, ProcessorId, SimulationConfig, SimulationReport};

use crate::balancer;
use crate::error::{SimError, SimResult};
use crate::predicate;
use crate::source::{RandomSource, uniform_cycles, uniform_loads};
use crate::state::RingState;

/// What happened in one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    /// 1-based stage number.
    pub stage: u64,
    /// The execution cycle the stage ran at.
    pub cycle: u64,
    /// Processors that ran their balance step, in ring order.
    pub due: Vec<ProcessorId>,
    /// Whether loads were still changing when the stage ended.
    pub unsteady: bool,
}

/// A single simulation run. Owns its state and its random source.
pub struct Simulation<R> {
    config: SimulationConfig,
    state: RingState,
    source: R,
    initial_loads: Vec<u64>,
    initial_cycles: Vec<u64>,
    stages: u64,
    current_cycle: u64,
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(config: SimulationConfig, state: RingState, source: R) -> SimResult<Self> {
        config.validate()?;
        if state.processors() != config.processors {
            return Err(SimError::ProcessorCountMismatch {
                expected: config.processors,
                actual: state.processors(),
            });
        }

        Ok(Self {
            initial_loads: state.loads().to_vec(),
            initial_cycles: state.cycles().to_vec(),
            current_cycle: state.lowest_cycle(),
            config,
            state,
            source,
            stages: 0,
        })
    }

    pub fn state(&self) -> &RingState {
        &self.state
    }

    /// Stages executed so far.
    pub fn stages(&self) -> u64 {
        self.stages
    }

    /// The lowest pending execution cycle.
    pub fn current_cycle(&self) -> u64 {
        self.current_cycle
    }

    /// Simulated time has reached the iteration cap.
    pub fn cap_reached(&self) -> bool {
        self.current_cycle >= self.config.max_iter
    }

    pub fn is_finished(&self) -> bool {
        predicate::is_finished(&self.state)
    }

    /// Run one stage at the current lowest cycle.
    pub fn step(&mut self) -> SimResult<StageRecord> {
        let cycle = self.current_cycle;
        let due = self.state.due_at(cycle);

        for &pid in &due {
            let transfer = balancer::balance(self.state.loads_mut(), pid)?;
            let interval = self
                .source
                .next_in(self.config.cycles.min, self.config.cycles.max);
            self.state.advance(pid, interval);

            if !transfer.is_empty() {
                debug!(
                    pid,
                    to_left = transfer.to_left,
                    to_right = transfer.to_right,
                    shed = transfer.total(),
                    "processor shed load"
                );
            }
        }

        self.stages += 1;

        let unsteady = !predicate::is_steady(self.state.loads(), self.state.past_loads());
        if unsteady {
            self.state.snapshot_cycles();
        }
        self.state.snapshot_loads();
        self.current_cycle = self.state.lowest_cycle();

        debug!(
            stage = self.stages,
            cycle,
            due = due.len(),
            unsteady,
            next_cycle = self.current_cycle,
            "stage complete"
        );

        Ok(StageRecord {
            stage: self.stages,
            cycle,
            due,
            unsteady,
        })
    }

    /// Run stages until the loads settle or the iteration cap is reached.
    pub fn run(&mut self) -> SimResult<SimulationReport> {
        while !self.cap_reached() && !self.is_finished() {
            self.step()?;
        }

        let report = self.report();
        match report.outcome {
            Outcome::Converged => info!(
                processors = self.config.processors,
                stages = report.stages,
                cycle = report.last_cycle,
                "loads reached a steady balanced state"
            ),
            Outcome::IterationCapReached => warn!(
                processors = self.config.processors,
                stages = report.stages,
                max_iter = self.config.max_iter,
                "iteration cap reached before loads settled"
            ),
        }
        Ok(report)
    }

    /// Snapshot of the run so far.
    pub fn report(&self) -> SimulationReport {
        let outcome = if self.is_finished() {
            Outcome::Converged
        } else {
            Outcome::IterationCapReached
        };

        SimulationReport {
            processors: self.config.processors,
            initial_loads: self.initial_loads.clone(),
            initial_cycles: self.initial_cycles.clone(),
            final_loads: self.state.loads().to_vec(),
            final_cycles: self.state.past_cycles().to_vec(),
            pending_cycles: self.state.cycles().to_vec(),
            stages: self.stages,
            last_cycle: self.current_cycle,
            outcome,
        }
    }
}

/// Run a simulation from explicit initial loads and execution cycles.
pub fn run_simulation<R: RandomSource>(
    config: &SimulationConfig,
    loads: Vec<u64>,
    cycles: Vec<u64>,
    source: R,
) -> SimResult<SimulationReport> {
    config.validate()?;
    let state = RingState::new(loads, cycles)?;
    Simulation::new(config.clone(), state, source)?.run()
}

/// Draw initial loads and cycles from `source`, then run.
///
/// All loads are drawn before any cycle.
pub fn simulate<R: RandomSource>(config: &SimulationConfig, mut source: R) -> SimResult<SimulationReport> {
    config.validate()?;
    let loads = uniform_loads(&mut source, config);
    let cycles = uniform_cycles(&mut source, config);
    debug!(processors = config.processors, "initial vectors drawn");
    run_simulation(config, loads, cycles, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SequenceSource;

    fn sim(loads: Vec<u64>, cycles: Vec<u64>, intervals: Vec<u64>) -> Simulation<SequenceSource> {
        let config = SimulationConfig::new(loads.len()).with_cycles(1, 1000);
        let state = RingState::new(loads, cycles).unwrap();
        Simulation::new(config, state, SequenceSource::new(intervals)).unwrap()
    }

    #[test]
    fn stage_runs_only_due_processors() {
        let mut s = sim(vec![30, 0, 0], vec![100, 200, 300], vec![150]);
        let record = s.step().unwrap();

        assert_eq!(record.stage, 1);
        assert_eq!(record.cycle, 100);
        assert_eq!(record.due, vec![0]);
        assert!(record.unsteady);
        assert_eq!(s.state().loads(), &[10, 10, 10]);
        assert_eq!(s.state().cycles(), &[250, 200, 300]);
        assert_eq!(s.current_cycle(), 200);
    }

    #[test]
    fn unsteady_stage_refreshes_cycle_snapshot() {
        let mut s = sim(vec![30, 0, 0], vec![100, 200, 300], vec![150]);
        s.step().unwrap();

        assert_eq!(s.state().past_cycles(), &[250, 200, 300]);
        assert_eq!(s.state().past_loads(), &[10, 10, 10]);
    }

    #[test]
    fn steady_stage_keeps_cycle_snapshot() {
        let mut s = sim(vec![10, 10, 10], vec![100, 200, 300], vec![50]);
        let record = s.step().unwrap();

        assert!(!record.unsteady);
        assert_eq!(s.state().cycles(), &[150, 200, 300]);
        assert_eq!(s.state().past_cycles(), &[100, 200, 300]);
    }

    #[test]
    fn simultaneous_processors_run_in_ring_order() {
        let mut s = sim(vec![0, 9, 9, 0], vec![5, 5, 5, 5], vec![10, 20, 30, 40]);
        let record = s.step().unwrap();

        assert_eq!(record.due, vec![0, 1, 2, 3]);
        assert_eq!(s.state().cycles(), &[15, 25, 35, 45]);
        assert_eq!(s.state().total_load(), 18);
    }

    #[test]
    fn run_stops_once_every_processor_moved() {
        let mut s = sim(vec![10, 10, 10], vec![100, 100, 100], vec![7]);
        let report = s.run().unwrap();

        assert_eq!(report.outcome, Outcome::Converged);
        assert_eq!(report.stages, 1);
        assert_eq!(report.final_loads, vec![10, 10, 10]);
        assert_eq!(report.final_cycles, vec![100, 100, 100]);
        assert_eq!(report.pending_cycles, vec![107, 107, 107]);
    }

    #[test]
    fn zero_cap_reports_exhaustion_without_touching_loads() {
        let config = SimulationConfig::new(3).with_max_iter(0);
        let state = RingState::new(vec![30, 0, 0], vec![100, 200, 300]).unwrap();
        let mut s = Simulation::new(config, state, SequenceSource::new(vec![100])).unwrap();

        let report = s.run().unwrap();

        assert_eq!(report.outcome, Outcome::IterationCapReached);
        assert_eq!(report.stages, 0);
        assert_eq!(report.final_loads, vec![30, 0, 0]);
    }

    #[test]
    fn rejects_state_of_wrong_size() {
        let state = RingState::new(vec![1, 2], vec![3, 4]).unwrap();
        let result = Simulation::new(SimulationConfig::new(3), state, SequenceSource::default());

        assert!(matches!(
            result,
            Err(SimError::ProcessorCountMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn rejects_invalid_config_before_running() {
        let config = SimulationConfig::new(3).with_cycles(10, 1);
        let result = run_simulation(&config, vec![1, 2, 3], vec![1, 2, 3], SequenceSource::default());

        assert!(matches!(result, Err(SimError::Config(_))));
    }
}
