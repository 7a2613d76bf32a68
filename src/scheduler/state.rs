use crate::{
    scheduler::{TraversalError, unit::InFlight},
    sync::{Condvar, Mutex, lock, wait},
    types::{VertexId, index},
};
use derive_more::{Deref, DerefMut};
use std::collections::VecDeque;

/// FIFO queue of discovered vertices whose work has not started yet.
#[derive(Debug, Default, Deref, DerefMut)]
pub(crate) struct Frontier(VecDeque<VertexId>);

/// Dense "discovered" markers indexed by vertex ID.
#[derive(Debug, Deref)]
pub(crate) struct VisitedSet(Vec<bool>);

impl VisitedSet {
    fn new(vertex_count: usize) -> Self {
        Self(vec![false; vertex_count])
    }

    /// Marks `vertex` as discovered.
    ///
    /// Returns `Some(true)` if this call discovered it, `Some(false)` if it was
    /// already discovered and `None` if it is out of range.
    fn try_mark(&mut self, vertex: VertexId) -> Option<bool> {
        let flag = self.0.get_mut(index(vertex))?;
        Some(!core::mem::replace(flag, true))
    }
}

/// All mutable traversal state.
///
/// Frontier, visited flags and the in-flight counter live behind one lock so
/// that "frontier empty and nothing in flight" is always read as a single
/// fact, and so that check-mark-push of a vertex is one atomic step.
#[derive(Debug)]
pub(crate) struct FrontierState<E: std::error::Error + 'static> {
    frontier: Frontier,
    visited: VisitedSet,
    /// Vertices popped from the frontier whose neighbors are not pushed yet.
    in_flight: usize,
    /// Set on the first fault; units stop at their next loop boundary.
    aborted: bool,
    /// First fault observed; later faults are dropped.
    fault: Option<TraversalError<E>>,
    /// Vertices in the order they were popped.
    order: Vec<VertexId>,
    peak_frontier: usize,
    peak_in_flight: usize,
}

impl<E: std::error::Error + 'static> FrontierState<E> {
    pub(crate) fn new(vertex_count: usize) -> Self {
        Self {
            frontier: Frontier::default(),
            visited: VisitedSet::new(vertex_count),
            in_flight: 0,
            aborted: false,
            fault: None,
            order: Vec::new(),
            peak_frontier: 0,
            peak_in_flight: 0,
        }
    }

    /// Check-mark-push of a single vertex.
    ///
    /// Returns whether the vertex was newly discovered (and therefore pushed).
    ///
    /// # Errors
    /// If `vertex` is outside the graph.
    pub(crate) fn discover(&mut self, vertex: VertexId) -> Result<bool, TraversalError<E>> {
        let newly_discovered =
            self.visited
                .try_mark(vertex)
                .ok_or(TraversalError::VertexOutOfRange {
                    vertex,
                    vertex_count: self.visited.len(),
                })?;
        if newly_discovered {
            self.frontier.push_back(vertex);
            self.peak_frontier = self.peak_frontier.max(self.frontier.len());
        }
        Ok(newly_discovered)
    }

    /// Pops the next vertex and accounts for it as in flight in the same step.
    fn pop(&mut self) -> Option<VertexId> {
        let vertex = self.frontier.pop_front()?;
        self.in_flight += 1;
        self.peak_in_flight = self.peak_in_flight.max(self.in_flight);
        self.order.push(vertex);
        Some(vertex)
    }

    fn abort(&mut self, fault: Option<TraversalError<E>>) {
        self.aborted = true;
        if self.fault.is_none() {
            self.fault = fault;
        }
    }

    pub(super) fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Moves the results out, leaving the state empty.
    fn take_outcome(&mut self) -> Result<Outcome, TraversalError<E>> {
        if let Some(fault) = self.fault.take() {
            return Err(fault);
        }
        Ok(Outcome {
            order: core::mem::take(&mut self.order),
            visited: core::mem::take(&mut self.visited.0),
            peak_frontier: self.peak_frontier,
            peak_in_flight: self.peak_in_flight,
        })
    }
}

/// Bookkeeping of a completed traversal.
pub(crate) struct Outcome {
    pub(crate) order: Vec<VertexId>,
    pub(crate) visited: Vec<bool>,
    pub(crate) peak_frontier: usize,
    pub(crate) peak_in_flight: usize,
}

/// Traversal state shared by all execution units during the parallel phase.
pub(crate) struct SharedFrontier<E: std::error::Error + 'static> {
    state: Mutex<FrontierState<E>>,
    /// Signalled when vertices are pushed, when in-flight work drains to zero
    /// and on abort.
    changed: Condvar,
}

impl<E: std::error::Error + 'static> SharedFrontier<E> {
    pub(crate) fn new(state: FrontierState<E>) -> Self {
        Self {
            state: Mutex::new(state),
            changed: Condvar::new(),
        }
    }

    /// Takes the next vertex to execute, or returns `None` once the traversal
    /// is over for this unit.
    ///
    /// An empty frontier is not enough to stop: while other units still have
    /// work in flight they may push more vertices, so the caller waits for
    /// them (the quiescence barrier) and looks again. `None` is returned only
    /// when the frontier is empty with nothing in flight, or after an abort.
    pub(crate) fn next_vertex(&self, waits: &mut usize) -> Option<InFlight<'_, E>> {
        let mut state = lock(&self.state);
        loop {
            if state.aborted {
                return None;
            }
            if let Some(vertex) = state.pop() {
                return Some(InFlight::new(self, vertex));
            }
            if state.in_flight == 0 {
                // Quiescent. Wake everyone still parked so they observe it too.
                self.changed.notify_all();
                return None;
            }
            *waits += 1;
            tracing::debug!(
                in_flight = state.in_flight,
                "frontier empty, waiting for in-flight work"
            );
            state = wait(&self.changed, state);
        }
    }

    /// Pushes the undiscovered `neighbors` of a finished vertex and releases
    /// its in-flight slot, all under one lock acquisition.
    pub(crate) fn complete(&self, neighbors: &[VertexId]) {
        let mut state = lock(&self.state);
        let before = state.frontier_len();
        if !state.aborted {
            let discovered = neighbors
                .iter()
                .try_for_each(|&neighbor| state.discover(neighbor).map(drop));
            if let Err(fault) = discovered {
                tracing::warn!(%fault, "aborting traversal");
                state.abort(Some(fault));
            }
        }
        state.in_flight -= 1;
        let pushed = state.frontier_len().saturating_sub(before);
        if state.aborted || state.in_flight == 0 || pushed > 1 {
            self.changed.notify_all();
        } else if pushed == 1 {
            self.changed.notify_one();
        }
    }

    /// Releases an in-flight slot and aborts the traversal.
    ///
    /// `fault` is `None` when the slot is released by an unwinding unit.
    pub(crate) fn fail(&self, fault: Option<TraversalError<E>>) {
        let mut state = lock(&self.state);
        state.in_flight -= 1;
        state.abort(fault);
        self.changed.notify_all();
    }

    /// Collects the results once every unit has returned.
    ///
    /// # Errors
    /// The first fault recorded during the run, if any.
    pub(crate) fn take_outcome(&self) -> Result<Outcome, TraversalError<E>> {
        lock(&self.state).take_outcome()
    }
}
