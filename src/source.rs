use crate::types::{VertexId, index};
use std::collections::VecDeque;

/// Read-only view of a graph whose vertices each carry a unit of work.
///
/// A source is constructed on a single thread before traversal starts and is
/// never mutated afterwards. During traversal several execution units call
/// into it at once, so every method must be safe for concurrent use.
pub trait GraphSource: Send + Sync {
    /// Fault raised by `execute_work`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of vertices; valid IDs are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Vertex the traversal starts from.
    fn start_vertex(&self) -> VertexId;

    /// Outgoing neighbors of `vertex`.
    fn neighbors(&self, vertex: VertexId) -> &[VertexId];

    /// Performs the work attached to `vertex` and returns the neighbors it
    /// reveals.
    ///
    /// May block the calling thread for an arbitrary, vertex-dependent amount
    /// of time. The scheduler calls this at most once per vertex and never
    /// while holding its internal lock.
    ///
    /// # Errors
    /// Any error is treated as fatal for the whole traversal.
    fn execute_work(&self, vertex: VertexId) -> Result<Vec<VertexId>, Self::Error>;
}

/// Sequential breadth-first order from `start`, using `neighbors` only.
///
/// This runs no work and serves as the reference ordering a single execution
/// unit must reproduce. Neighbors outside the graph are ignored.
#[must_use]
pub fn breadth_first_order<G: GraphSource + ?Sized>(graph: &G, start: VertexId) -> Vec<VertexId> {
    let vertex_count = graph.vertex_count();
    if index(start) >= vertex_count {
        return vec![];
    }
    let mut seen = vec![false; vertex_count];
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();
    seen[index(start)] = true;
    while let Some(vertex) = queue.pop_front() {
        order.push(vertex);
        for &neighbor in graph.neighbors(vertex) {
            let Some(flag) = seen.get_mut(index(neighbor)) else {
                continue;
            };
            if !*flag {
                *flag = true;
                queue.push_back(neighbor);
            }
        }
    }
    order
}
