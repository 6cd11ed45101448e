//! ringflow-sim — nearest-neighbor diffusion load balancing on a ring.
//!
//! Each processor holds an integer load and a next-execution cycle. The
//! scheduler repeatedly picks the lowest pending cycle, lets every
//! processor due at that cycle run its local balance step, then pushes
//! those processors' next execution forward by a random interval. The
//! run ends once loads are steady and every processor has moved past its
//! last snapshot, or when simulated time reaches the iteration cap.
//!
//! # Architecture
//!
//! ```text
//! Simulation
//!   ├── RingState (loads, cycles, and their snapshots)
//!   ├── RandomSource (interval draws, injected)
//!   ├── balancer::balance (three-way averaging with ring neighbors)
//!   └── predicate (steady loads, stalled cycles)
//! ```
//!
//! # Balance rule
//!
//! ```text
//! sum   = load[left] + load[p] + load[right]
//! avg   = sum / 3                       (real-valued)
//!
//! if load[p] < avg: nothing to do       (only overloaded processors push)
//!
//! start = ceil(avg) if sum % 3 == 2 else floor(avg)
//! left  gets start      - load[left]    when load[left]  < avg
//! right gets floor(avg) - load[right]   when load[right] < avg
//! ```

pub mod balancer;
pub mod error;
pub mod predicate;
pub mod scheduler;
pub mod source;
pub mod state;

pub use balancer::{Transfer, balance, give};
pub use error::{SimError, SimResult};
pub use predicate::{cycles_stalled, is_finished, is_steady, loads_unchanged, within_one};
pub use scheduler::{Simulation, StageRecord, run_simulation, simulate};
pub use source::{RandomSource, SeededSource, SequenceSource, uniform_cycles, uniform_loads};
pub use state::RingState;
