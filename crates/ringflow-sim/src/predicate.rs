//! Stopping rule: steady loads and stalled execution cycles.
//!
//! Loads are *steady* when they are unchanged since the last snapshot, or
//! when both the current and the previous distribution have a max-min
//! spread of at most one. A run is only *finished* once loads are steady
//! and no processor's execution cycle still equals its snapshot, which
//! forces every processor to act again after the last unsteady stage.

use crate::state::RingState;

/// Max-min spread of `values` is at most one. Empty input counts as balanced.
pub fn within_one(values: &[u64]) -> bool {
    match (values.iter().min(), values.iter().max()) {
        (Some(min), Some(max)) => max - min <= 1,
        _ => true,
    }
}

/// Loads match their snapshot at every index except the last.
///
/// The final processor is never compared, so a difference confined to
/// index `N - 1` still reads as unchanged.
pub fn loads_unchanged(loads: &[u64], past_loads: &[u64]) -> bool {
    let compared = loads.len().saturating_sub(1);
    loads
        .iter()
        .zip(past_loads)
        .take(compared)
        .all(|(now, past)| now == past)
}

/// Loads are unchanged, or both distributions are within one unit.
pub fn is_steady(loads: &[u64], past_loads: &[u64]) -> bool {
    loads_unchanged(loads, past_loads) || (within_one(loads) && within_one(past_loads))
}

/// Some processor's execution cycle has not moved since the snapshot.
pub fn cycles_stalled(cycles: &[u64], past_cycles: &[u64]) -> bool {
    cycles.iter().zip(past_cycles).any(|(c, p)| c == p)
}

/// The scheduler may stop: loads are steady and no cycle is stalled.
pub fn is_finished(state: &RingState) -> bool {
    is_steady(state.loads(), state.past_loads())
        && !cycles_stalled(state.cycles(), state.past_cycles())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_of_one_is_balanced() {
        assert!(within_one(&[5, 5, 6, 5]));
        assert!(within_one(&[5]));
        assert!(within_one(&[]));
    }

    #[test]
    fn spread_above_one_is_not_balanced() {
        assert!(!within_one(&[5, 5, 8, 5]));
        assert!(!within_one(&[4, 6]));
    }

    #[test]
    fn identical_loads_are_steady_regardless_of_spread() {
        let loads = [1, 90, 3, 700];
        assert!(is_steady(&loads, &loads));
    }

    #[test]
    fn last_index_is_not_compared() {
        assert!(loads_unchanged(&[1, 2, 3], &[1, 2, 99]));
        assert!(!loads_unchanged(&[1, 2, 3], &[1, 7, 3]));
        assert!(is_steady(&[1, 50, 3], &[1, 50, 99]));
    }

    #[test]
    fn single_processor_always_reads_unchanged() {
        assert!(loads_unchanged(&[4], &[9]));
    }

    #[test]
    fn changed_but_balanced_on_both_sides_is_steady() {
        assert!(is_steady(&[5, 6, 5], &[6, 5, 5]));
    }

    #[test]
    fn changed_and_only_current_balanced_is_not_steady() {
        assert!(!is_steady(&[10, 10, 10], &[30, 0, 0]));
    }

    #[test]
    fn stalled_when_any_cycle_matches() {
        assert!(cycles_stalled(&[110, 200, 300], &[100, 200, 250]));
        assert!(!cycles_stalled(&[110, 210, 310], &[100, 200, 300]));
    }

    #[test]
    fn fresh_state_is_never_finished() {
        let state = RingState::new(vec![10, 10, 10], vec![100, 100, 100]).unwrap();
        // Every cycle equals its snapshot before the first stage.
        assert!(is_steady(state.loads(), state.past_loads()));
        assert!(!is_finished(&state));
    }
}
