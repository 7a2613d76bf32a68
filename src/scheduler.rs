mod error;
mod report;
mod state;
mod unit;

/// Fault returned by `Scheduler::seed` and `Scheduler::run`.
pub use crate::scheduler::error::TraversalError;
pub use crate::scheduler::report::{TraversalReport, UnitStats};
use crate::{
    config::TraversalConfig,
    scheduler::{
        state::{FrontierState, SharedFrontier},
        unit::UnitContext,
    },
    source::GraphSource,
    sync::{self, Arc},
    types::VertexId,
};
use derive_more::Debug;
use std::time::Instant;

/// Concurrent frontier-traversal scheduler.
///
/// Lifecycle:
/// - `new` creates an empty frontier and visited set sized to the graph,
/// - `seed` marks start vertices as discovered and pushes them (sequential
///   phase, no synchronization involved),
/// - `run` hands the seeded state to a fixed number of execution units that
///   cooperatively pop vertices, execute their work outside any lock and push
///   newly discovered neighbors, until quiescence.
///
/// Every vertex reachable from the seeds is executed exactly once. The
/// scheduler is consumed by `run`; no state outlives one traversal.
#[must_use]
#[derive(Debug)]
pub struct Scheduler<G: GraphSource> {
    #[debug(skip)]
    graph: Arc<G>,
    state: FrontierState<G::Error>,
}

impl<G: GraphSource + 'static> Scheduler<G> {
    /// Scheduler over `graph` with nothing seeded.
    pub fn new(graph: Arc<G>) -> Self {
        let state = FrontierState::new(graph.vertex_count());
        Self { graph, state }
    }

    /// Marks `vertex` as discovered and pushes it to the frontier.
    ///
    /// Returns `false` if the vertex was already seeded. Seeding several
    /// distinct vertices traverses everything reachable from any of them.
    ///
    /// # Errors
    /// If `vertex` is outside the graph.
    pub fn seed(&mut self, vertex: VertexId) -> Result<bool, TraversalError<G::Error>> {
        let discovered = self.state.discover(vertex)?;
        tracing::debug!(vertex, discovered, "seeded frontier");
        Ok(discovered)
    }

    /// Runs the traversal on `config.units()` execution units and blocks until
    /// it terminates.
    ///
    /// A single unit runs on the calling thread and visits vertices in
    /// breadth-first order. With more units membership of the visited set is
    /// the same, only order and timing differ.
    ///
    /// Termination is declared only when the frontier is empty and no unit
    /// has work in flight. A unit that finds the frontier empty while siblings
    /// are still executing waits for them and looks again.
    ///
    /// # Errors
    /// - `TraversalError::Work` if the work of any vertex fails,
    /// - `TraversalError::VertexOutOfRange` if work reveals a neighbor outside
    ///   the graph,
    /// - `TraversalError::ThreadPool` if execution units cannot be started.
    ///
    /// The first fault aborts every unit; no partial result is returned.
    ///
    /// # Panics
    /// If the work of a vertex panics. Sibling units are stopped before the
    /// panic is propagated.
    pub fn run(self, config: &TraversalConfig) -> Result<TraversalReport, TraversalError<G::Error>> {
        let Self { graph, state } = self;
        let span = tracing::info_span!("traversal", units = config.units().get());
        let _entered = span.enter();
        tracing::info!(
            vertex_count = graph.vertex_count(),
            seeds = state.frontier_len(),
            "starting traversal"
        );

        let started = Instant::now();
        let context = Arc::new(UnitContext {
            graph,
            shared: SharedFrontier::new(state),
        });
        let units = sync::broadcast(config, {
            let context = Arc::clone(&context);
            move |unit| context.run(unit)
        })?;
        let elapsed = started.elapsed();

        let outcome = match context.shared.take_outcome() {
            Ok(outcome) => outcome,
            Err(fault) => {
                tracing::warn!(%fault, ?elapsed, "traversal aborted");
                return Err(fault);
            }
        };
        tracing::info!(visited = outcome.order.len(), ?elapsed, "traversal complete");
        Ok(TraversalReport {
            order: outcome.order,
            visited: outcome.visited,
            units,
            peak_frontier: outcome.peak_frontier,
            peak_in_flight: outcome.peak_in_flight,
            elapsed,
        })
    }
}

/// Traverses everything reachable from `graph.start_vertex()`.
///
/// # Errors
/// See `Scheduler::seed` and `Scheduler::run`.
pub fn traverse<G: GraphSource + 'static>(
    graph: Arc<G>,
    config: &TraversalConfig,
) -> Result<TraversalReport, TraversalError<G::Error>> {
    let start = graph.start_vertex();
    let mut scheduler = Scheduler::new(graph);
    scheduler.seed(start)?;
    scheduler.run(config)
}
