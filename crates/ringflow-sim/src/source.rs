//! Random interval and load sources.
//!
//! The simulator never touches process-wide random state. Every run owns
//! a `RandomSource`, so a run is fully determined by its source and its
//! initial vectors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ringflow_core::SimulationConfig;

/// A source of integers drawn from an inclusive range.
pub trait RandomSource {
    /// Draw a value in `min..=max`. Returns `min` when `min >= max`.
    fn next_in(&mut self, min: u64, max: u64) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_in(&mut self, min: u64, max: u64) -> u64 {
        (**self).next_in(min, max)
    }
}

/// Uniform draws from a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a fresh seed from the OS. The seed is kept so the run can be
    /// replayed with [`SeededSource::new`].
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next_in(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Each value is clamped into the requested range. An empty list always
/// yields `min`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<u64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_in(&mut self, min: u64, max: u64) -> u64 {
        if self.values.is_empty() || min >= max {
            return min;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(min, max)
    }
}

/// Initial loads, one uniform draw per processor.
pub fn uniform_loads<R: RandomSource>(source: &mut R, config: &SimulationConfig) -> Vec<u64> {
    (0..config.processors)
        .map(|_| source.next_in(config.loads.min, config.loads.max))
        .collect()
}

/// Initial execution cycles, one uniform draw per processor.
pub fn uniform_cycles<R: RandomSource>(source: &mut R, config: &SimulationConfig) -> Vec<u64> {
    (0..config.processors)
        .map(|_| source.next_in(config.cycles.min, config.cycles.max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_source_is_reproducible() {
        let mut a = SeededSource::new(1234);
        let mut b = SeededSource::new(1234);

        let xs: Vec<u64> = (0..32).map(|_| a.next_in(100, 1000)).collect();
        let ys: Vec<u64> = (0..32).map(|_| b.next_in(100, 1000)).collect();

        assert_eq!(xs, ys);
        assert_eq!(a.seed(), 1234);
    }

    #[test]
    fn seeded_source_stays_in_range() {
        let mut src = SeededSource::new(7);
        for _ in 0..1000 {
            let v = src.next_in(10, 12);
            assert!((10..=12).contains(&v));
        }
    }

    #[test]
    fn collapsed_range_returns_min() {
        let mut src = SeededSource::new(7);
        assert_eq!(src.next_in(5, 5), 5);

        let mut seq = SequenceSource::new(vec![9]);
        assert_eq!(seq.next_in(5, 5), 5);
        assert_eq!(seq.drawn(), 0);
    }

    #[test]
    fn sequence_source_wraps_and_clamps() {
        let mut seq = SequenceSource::new(vec![3, 50, 7]);

        assert_eq!(seq.next_in(5, 10), 5);
        assert_eq!(seq.next_in(5, 10), 10);
        assert_eq!(seq.next_in(5, 10), 7);
        assert_eq!(seq.next_in(5, 10), 5); // wraps
        assert_eq!(seq.drawn(), 4);
    }

    #[test]
    fn empty_sequence_yields_min() {
        let mut seq = SequenceSource::default();
        assert_eq!(seq.next_in(2, 8), 2);
    }

    #[test]
    fn uniform_vectors_have_one_entry_per_processor() {
        let cfg = SimulationConfig::new(17).with_loads(1, 3).with_cycles(4, 6);
        let mut src = SeededSource::new(99);

        let loads = uniform_loads(&mut src, &cfg);
        let cycles = uniform_cycles(&mut src, &cfg);

        assert_eq!(loads.len(), 17);
        assert_eq!(cycles.len(), 17);
        assert!(loads.iter().all(|l| (1..=3).contains(l)));
        assert!(cycles.iter().all(|c| (4..=6).contains(c)));
    }

    #[test]
    fn mutable_reference_is_a_source() {
        fn draw<R: RandomSource>(mut r: R) -> u64 {
            r.next_in(0, 100)
        }

        let mut seq = SequenceSource::new(vec![42]);
        assert_eq!(draw(&mut seq), 42);
        assert_eq!(seq.drawn(), 1);
    }
}
