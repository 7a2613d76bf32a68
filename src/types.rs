use rustc_hash::FxBuildHasher;
use std::collections::HashSet as _HashSet;

/// Handle of a vertex in the traversed graph.
///
/// Vertex IDs form the dense range `[0, vertex_count)`, so they double as
/// indexes into per-vertex tables such as the visited flags.
pub type VertexId = u32;

/// `HashSet` type with fast hasher.
pub type HashSet<T> = _HashSet<T, FxBuildHasher>;

/// Converts a vertex ID into a table index.
#[inline]
pub(crate) fn index(vertex: VertexId) -> usize {
    vertex as usize
}
