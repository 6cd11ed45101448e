//! Simulator error types.

use ringflow_core::{ConfigError, ProcessorId};
use thiserror::Error;

/// Errors that abort a simulation run.
///
/// Hitting the iteration cap is not an error; it is reported through
/// `Outcome::IterationCapReached`.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "transfer of {amount} from processor {from} to {to} exceeds its load of {available}"
    )]
    InvariantViolation {
        from: ProcessorId,
        to: ProcessorId,
        amount: u64,
        available: u64,
    },

    #[error("load of processor {pid} would exceed u64::MAX")]
    LoadOverflow { pid: ProcessorId },

    #[error("processor {pid} is not on a ring of {processors}")]
    ProcessorOutOfRange { pid: ProcessorId, processors: usize },

    #[error("load vector has {loads} entries but cycle vector has {cycles}")]
    LengthMismatch { loads: usize, cycles: usize },

    #[error("state holds {actual} processors but the configuration expects {expected}")]
    ProcessorCountMismatch { expected: usize, actual: usize },
}

pub type SimResult<T> = Result<T, SimError>;
