use crate::{
    scheduler::{TraversalError, UnitStats, state::SharedFrontier},
    source::GraphSource,
    sync::Arc,
    types::VertexId,
};

/// Everything an execution unit needs, handed to each unit at spawn time.
pub(super) struct UnitContext<G: GraphSource> {
    pub(super) graph: Arc<G>,
    pub(super) shared: SharedFrontier<G::Error>,
}

impl<G: GraphSource> UnitContext<G> {
    /// Loop of a single execution unit: pop, execute outside the lock, push
    /// unseen neighbors, until quiescence or abort.
    pub(super) fn run(&self, unit: usize) -> UnitStats {
        let Self { graph, shared } = self;
        let mut stats = UnitStats::default();
        tracing::debug!(unit, "execution unit started");
        while let Some(slot) = shared.next_vertex(&mut stats.waits) {
            let vertex = slot.vertex;
            tracing::trace!(unit, vertex, "executing vertex");
            match graph.execute_work(vertex) {
                Ok(neighbors) => {
                    stats.executed += 1;
                    slot.complete(&neighbors);
                }
                Err(source) => {
                    tracing::warn!(unit, vertex, error = %source, "vertex work failed, aborting traversal");
                    slot.fail(TraversalError::Work { vertex, source });
                }
            }
        }
        tracing::debug!(
            unit,
            executed = stats.executed,
            waits = stats.waits,
            "execution unit finished"
        );
        stats
    }
}

/// A vertex popped from the frontier whose work has not been accounted for
/// yet.
///
/// Holding an `InFlight` keeps the in-flight counter above zero, which keeps
/// every other unit from declaring termination. The slot must be released
/// through `complete` or `fail`. If it is dropped instead (the unit is
/// unwinding from a panic in vertex work), the slot is released and the
/// traversal is aborted, so that no sibling waits forever.
#[must_use]
pub(crate) struct InFlight<'a, E: std::error::Error + 'static> {
    shared: &'a SharedFrontier<E>,
    vertex: VertexId,
    released: bool,
}

impl<'a, E: std::error::Error + 'static> InFlight<'a, E> {
    pub(super) fn new(shared: &'a SharedFrontier<E>, vertex: VertexId) -> Self {
        Self {
            shared,
            vertex,
            released: false,
        }
    }

    fn complete(mut self, neighbors: &[VertexId]) {
        self.released = true;
        self.shared.complete(neighbors);
    }

    fn fail(mut self, fault: TraversalError<E>) {
        self.released = true;
        self.shared.fail(Some(fault));
    }
}

impl<E: std::error::Error + 'static> Drop for InFlight<'_, E> {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!(vertex = self.vertex, "execution unit unwound, aborting traversal");
            self.shared.fail(None);
        }
    }
}
