use crate::types::VertexId;
use rayon::ThreadPoolBuildError;
use thiserror::Error;

/// Fault that aborted a traversal.
///
/// No partial result is returned alongside a fault: once any execution unit
/// fails, every other unit stops at its next loop boundary and the run as a
/// whole is considered invalid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TraversalError<E: std::error::Error + 'static> {
    /// The work attached to a vertex failed.
    #[error("work for vertex {vertex} failed")]
    Work {
        /// Vertex whose work failed.
        vertex: VertexId,
        /// Error reported by the graph source.
        #[source]
        source: E,
    },
    /// A seed or a revealed neighbor lies outside the graph.
    #[error("vertex {vertex} is out of range for a graph of {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex ID.
        vertex: VertexId,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// The worker pool could not be created.
    #[error("failed to start execution units")]
    ThreadPool(#[from] ThreadPoolBuildError),
}
