//! Local three-way balance step.
//!
//! A processor compares itself with its two ring neighbors and, if it
//! holds at least the window average, pushes load to each neighbor that
//! sits below the average. Neighbors never pull.
//!
//! Averages are compared exactly: `x < sum / 3` is evaluated as
//! `3 * x < sum`, and `floor(sum / 3)` / `ceil(sum / 3)` are integer
//! divisions, so no floating point is involved. Window arithmetic runs in
//! `u128`, which holds three times any `u64` load.

use tracing::trace;

use ringflow_core::{ProcessorId, Ring};

use crate::error::{SimError, SimResult};

/// Amounts a processor pushed to its neighbors in one balance step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transfer {
    pub to_left: u64,
    pub to_right: u64,
}

impl Transfer {
    pub fn is_empty(&self) -> bool {
        self.to_left == 0 && self.to_right == 0
    }

    pub fn total(&self) -> u64 {
        self.to_left + self.to_right
    }
}

/// Move `amount` units of load from `from` to `to`.
///
/// A zero amount is a no-op. A source holding less than `amount` is an
/// `InvariantViolation`, and a destination that cannot hold the extra load
/// is a `LoadOverflow`; nothing is moved in either case.
pub fn give(loads: &mut [u64], from: ProcessorId, to: ProcessorId, amount: u64) -> SimResult<()> {
    if amount == 0 {
        return Ok(());
    }
    for pid in [from, to] {
        if pid >= loads.len() {
            return Err(SimError::ProcessorOutOfRange {
                pid,
                processors: loads.len(),
            });
        }
    }

    let available = loads[from];
    if available < amount {
        return Err(SimError::InvariantViolation {
            from,
            to,
            amount,
            available,
        });
    }

    let received = loads[to]
        .checked_add(amount)
        .ok_or(SimError::LoadOverflow { pid: to })?;

    loads[from] -= amount;
    loads[to] = received;
    trace!(from, to, amount, "load transferred");
    Ok(())
}

/// Run the balance step of processor `pid` on a ring of `loads.len()`
/// processors.
pub fn balance(loads: &mut [u64], pid: ProcessorId) -> SimResult<Transfer> {
    let ring = Ring::new(loads.len());
    if !ring.contains(pid) {
        return Err(SimError::ProcessorOutOfRange {
            pid,
            processors: loads.len(),
        });
    }

    let (left, right) = (ring.left(pid), ring.right(pid));
    let [l, own, r] = [left, pid, right].map(|i| u128::from(loads[i]));
    let sum = l + own + r;

    // Underloaded processors never initiate a transfer.
    if 3 * own < sum {
        return Ok(Transfer::default());
    }

    let floor_avg = sum / 3;
    // Rounding up on a remainder of two keeps the redistribution integral.
    let start = if sum % 3 == 2 { floor_avg + 1 } else { floor_avg };

    // The left neighbor is filled to `start`, the right one only to floor(avg).
    let to_left = if 3 * l < sum { start - l } else { 0 };
    let to_right = if 3 * r < sum { floor_avg - r } else { 0 };

    // load[p] < floor(avg) - to_left - to_right, without going negative.
    if own + to_left + to_right < floor_avg {
        return Ok(Transfer::default());
    }

    // Both amounts are below floor(avg) + 1 <= u64::MAX.
    let to_left = u64::try_from(to_left).map_err(|_| SimError::LoadOverflow { pid: left })?;
    let to_right = u64::try_from(to_right).map_err(|_| SimError::LoadOverflow { pid: right })?;

    let window_before = window_total(loads, ring, pid);

    give(loads, pid, left, to_left)?;
    give(loads, pid, right, to_right)?;

    debug_assert_eq!(
        window_before,
        window_total(loads, ring, pid),
        "balance step of processor {pid} changed its window total"
    );

    Ok(Transfer { to_left, to_right })
}

/// Sum of the distinct processors in `pid`'s window.
fn window_total(loads: &[u64], ring: Ring, pid: ProcessorId) -> u128 {
    ring.neighborhood(pid)
        .into_iter()
        .map(|i| u128::from(loads[i]))
        .sum()
}
