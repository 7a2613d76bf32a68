use crate::types::{HashSet, VertexId, index};
use core::time::Duration;

/// Per-unit bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitStats {
    /// Vertices whose work this unit executed.
    pub executed: usize,
    /// Times this unit found the frontier empty and waited on in-flight work.
    pub waits: usize,
}

/// Result of a completed traversal.
#[derive(Debug, Clone)]
pub struct TraversalReport {
    pub(crate) order: Vec<VertexId>,
    pub(crate) visited: Vec<bool>,
    pub(crate) units: Vec<UnitStats>,
    pub(crate) peak_frontier: usize,
    pub(crate) peak_in_flight: usize,
    pub(crate) elapsed: Duration,
}

impl TraversalReport {
    /// Vertices in the order execution units took them from the frontier.
    ///
    /// With a single unit this is breadth-first order from the seeds.
    #[must_use]
    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    /// Number of vertices executed.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.order.len()
    }

    /// Whether `vertex` was reached.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.visited.get(index(vertex)).copied().unwrap_or(false)
    }

    /// Set of reached vertices.
    #[must_use]
    pub fn visited_set(&self) -> HashSet<VertexId> {
        self.order.iter().copied().collect()
    }

    /// Statistics of each execution unit, indexed by unit.
    #[must_use]
    pub fn units(&self) -> &[UnitStats] {
        &self.units
    }

    /// Largest frontier length observed.
    #[must_use]
    pub fn peak_frontier(&self) -> usize {
        self.peak_frontier
    }

    /// Largest number of vertices executing at the same time.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight
    }

    /// Wall-clock duration of the parallel phase.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
