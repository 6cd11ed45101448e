//! Ring topology.
//!
//! Processors are identified only by their index `0..N-1`. Each one has
//! exactly two neighbors: `(i - 1 + N) % N` on the left and `(i + 1) % N`
//! on the right.

/// Index of a processor on the ring.
pub type ProcessorId = usize;

/// A ring of `processors` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    processors: usize,
}

impl Ring {
    /// Create a ring with the given number of processors.
    pub fn new(processors: usize) -> Self {
        Self { processors }
    }

    pub fn processors(&self) -> usize {
        self.processors
    }

    /// Whether `pid` names a processor on this ring.
    pub fn contains(&self, pid: ProcessorId) -> bool {
        pid < self.processors
    }

    /// Left neighbor of `pid`.
    ///
    /// Written as `(pid - 1 + N) % N` with the addition first, so index 0
    /// wraps to `N - 1` without relying on unsigned underflow.
    pub fn left(&self, pid: ProcessorId) -> ProcessorId {
        (pid + self.processors - 1) % self.processors
    }

    /// Right neighbor of `pid`.
    pub fn right(&self, pid: ProcessorId) -> ProcessorId {
        (pid + 1) % self.processors
    }

    /// The distinct members of the three-processor window around `pid`.
    ///
    /// On rings with fewer than three processors the left and right
    /// neighbors coincide (or are `pid` itself), and each member is listed
    /// once.
    pub fn neighborhood(&self, pid: ProcessorId) -> Vec<ProcessorId> {
        let mut members = vec![self.left(pid), pid, self.right(pid)];
        members.sort_unstable();
        members.dedup();
        members
    }
}
