//! Per-run simulation state.

use ringflow_core::{ConfigError, ProcessorId};

use crate::error::{SimError, SimResult};

/// Loads and execution cycles of every processor, plus the snapshots the
/// stopping rule compares against.
///
/// Both snapshots start equal to the initial vectors. The load snapshot is
/// refreshed after every stage; the cycle snapshot only after stages whose
/// loads were not yet steady.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingState {
    loads: Vec<u64>,
    past_loads: Vec<u64>,
    cycles: Vec<u64>,
    past_cycles: Vec<u64>,
}

impl RingState {
    pub fn new(loads: Vec<u64>, cycles: Vec<u64>) -> SimResult<Self> {
        if loads.len() != cycles.len() {
            return Err(SimError::LengthMismatch {
                loads: loads.len(),
                cycles: cycles.len(),
            });
        }
        if loads.is_empty() {
            return Err(ConfigError::NoProcessors.into());
        }
        // Balance steps conserve the total, so it only has to fit once.
        loads
            .iter()
            .enumerate()
            .try_fold(0u64, |total, (pid, &load)| {
                total.checked_add(load).ok_or(SimError::LoadOverflow { pid })
            })?;
        Ok(Self {
            past_loads: loads.clone(),
            past_cycles: cycles.clone(),
            loads,
            cycles,
        })
    }

    pub fn processors(&self) -> usize {
        self.loads.len()
    }

    pub fn loads(&self) -> &[u64] {
        &self.loads
    }

    pub fn past_loads(&self) -> &[u64] {
        &self.past_loads
    }

    pub fn cycles(&self) -> &[u64] {
        &self.cycles
    }

    pub fn past_cycles(&self) -> &[u64] {
        &self.past_cycles
    }

    /// Sum of all loads. Fits a `u64`: `new` rejects larger totals and
    /// transfers conserve it.
    pub fn total_load(&self) -> u64 {
        self.loads.iter().sum()
    }

    /// The lowest pending execution cycle.
    pub fn lowest_cycle(&self) -> u64 {
        // Never empty: `new` rejects zero processors.
        self.cycles.iter().copied().min().unwrap_or(0)
    }

    /// Processors scheduled at exactly `cycle`, in ring order.
    pub fn due_at(&self, cycle: u64) -> Vec<ProcessorId> {
        self.cycles
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == cycle)
            .map(|(pid, _)| pid)
            .collect()
    }

    pub(crate) fn loads_mut(&mut self) -> &mut [u64] {
        &mut self.loads
    }

    /// Push `pid`'s next execution forward by `interval` cycles.
    pub(crate) fn advance(&mut self, pid: ProcessorId, interval: u64) {
        self.cycles[pid] = self.cycles[pid].saturating_add(interval);
    }

    pub(crate) fn snapshot_loads(&mut self) {
        self.past_loads.copy_from_slice(&self.loads);
    }

    pub(crate) fn snapshot_cycles(&mut self) {
        self.past_cycles.copy_from_slice(&self.cycles);
    }
}
