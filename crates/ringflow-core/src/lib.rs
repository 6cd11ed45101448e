//! ringflow-core — types shared by the simulator and its driver.
//!
//! - **`ring`** — processor indices and neighbor arithmetic on the ring
//! - **`config`** — per-run and scenario configuration (TOML)
//! - **`report`** — run outcomes and console formatting
//! - **`error`** — configuration precondition failures

pub mod config;
pub mod error;
pub mod report;
pub mod ring;

pub use config::{Bounds, ScenarioConfig, SimulationConfig};
pub use error::{ConfigError, ConfigResult};
pub use report::{Outcome, SimulationReport, format_case, format_vector};
pub use ring::{ProcessorId, Ring};
