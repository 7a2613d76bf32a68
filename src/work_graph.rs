use crate::{
    source::GraphSource,
    types::{HashSet, VertexId, index},
};
use core::{convert::Infallible, time::Duration};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use std::time::Instant;
use thiserror::Error;

/// Error returned by `WorkGraphBuilder::build`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkGraphError {
    /// A graph needs at least one vertex to have a start vertex.
    #[error("graph must contain at least one vertex")]
    Empty,
    /// Vertex IDs would not fit into `VertexId`.
    #[error("graph of {0} vertices exceeds the vertex ID range")]
    TooManyVertices(usize),
    /// The minimum work cost exceeds the maximum.
    #[error("minimum work cost {min:?} exceeds maximum {max:?}")]
    InvalidCostRange {
        /// Requested minimum cost.
        min: Duration,
        /// Requested maximum cost.
        max: Duration,
    },
}

/// Randomly generated graph whose vertices carry busy-work of random cost.
///
/// Every vertex is reachable from the start vertex: generation first links
/// the vertices into a random spanning tree rooted at the start vertex and
/// then sprinkles extra random edges on top. Costs are drawn once at build
/// time, so the graph is immutable afterwards and `execute_work` can be called
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct WorkGraph {
    adjacency: Vec<Vec<VertexId>>,
    costs: Vec<Duration>,
    start: VertexId,
}

impl WorkGraph {
    /// Builder with default parameters.
    #[must_use]
    pub fn builder() -> WorkGraphBuilder {
        WorkGraphBuilder::default()
    }

    /// Cost of the work attached to `vertex`.
    ///
    /// # Panics
    /// If `vertex` is outside the graph.
    #[must_use]
    pub fn cost(&self, vertex: VertexId) -> Duration {
        self.costs[index(vertex)]
    }

    /// Sum of all work costs, i.e. the ideal sequential running time.
    #[must_use]
    pub fn total_cost(&self) -> Duration {
        self.costs.iter().sum()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

impl GraphSource for WorkGraph {
    type Error = Infallible;

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn start_vertex(&self) -> VertexId {
        self.start
    }

    fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        &self.adjacency[index(vertex)]
    }

    /// Spins for the vertex's cost, then reveals its neighbors.
    fn execute_work(&self, vertex: VertexId) -> Result<Vec<VertexId>, Self::Error> {
        let deadline = Instant::now() + self.cost(vertex);
        while Instant::now() < deadline {
            core::hint::spin_loop();
        }
        Ok(self.neighbors(vertex).to_vec())
    }
}

/// Parameters for generating a `WorkGraph`.
#[must_use]
#[derive(Debug, Clone)]
pub struct WorkGraphBuilder {
    vertex_count: usize,
    max_extra_edges: usize,
    min_cost: Duration,
    max_cost: Duration,
    seed: Option<u64>,
}

impl Default for WorkGraphBuilder {
    fn default() -> Self {
        Self {
            vertex_count: 1000,
            max_extra_edges: 4,
            min_cost: Duration::ZERO,
            max_cost: Duration::from_millis(2),
            seed: None,
        }
    }
}

impl WorkGraphBuilder {
    /// Number of vertices.
    pub fn vertex_count(mut self, vertex_count: usize) -> Self {
        self.vertex_count = vertex_count;
        self
    }

    /// Upper bound of random edges added per vertex on top of the spanning
    /// tree.
    pub fn max_extra_edges(mut self, max_extra_edges: usize) -> Self {
        self.max_extra_edges = max_extra_edges;
        self
    }

    /// Inclusive range the work cost of each vertex is drawn from.
    pub fn cost(mut self, min: Duration, max: Duration) -> Self {
        self.min_cost = min;
        self.max_cost = max;
        self
    }

    /// Fixed seed for reproducible graphs. Without one the generator is
    /// seeded from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generates the graph.
    ///
    /// # Errors
    /// If the graph would be empty, too large for `VertexId` or the cost range
    /// is inverted.
    pub fn build(&self) -> Result<WorkGraph, WorkGraphError> {
        let &Self {
            vertex_count,
            max_extra_edges,
            min_cost,
            max_cost,
            seed,
        } = self;
        if vertex_count == 0 {
            return Err(WorkGraphError::Empty);
        }
        let last = VertexId::try_from(vertex_count - 1)
            .map_err(|_| WorkGraphError::TooManyVertices(vertex_count))?;
        if min_cost > max_cost {
            return Err(WorkGraphError::InvalidCostRange {
                min: min_cost,
                max: max_cost,
            });
        }
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        // Spanning tree over a random permutation: every vertex hangs off one
        // that precedes it, so all of them are reachable from `order[0]`.
        let mut order: Vec<VertexId> = (0..=last).collect();
        order.shuffle(&mut rng);
        let mut adjacency = vec![Vec::new(); vertex_count];
        for (position, &vertex) in order.iter().enumerate().skip(1) {
            let parent = order[rng.gen_range(0..position)];
            adjacency[index(parent)].push(vertex);
        }

        let mut targets = HashSet::default();
        for (source, neighbors) in (0..=last).zip(adjacency.iter_mut()) {
            targets.clear();
            targets.extend(neighbors.iter().copied());
            for _ in 0..rng.gen_range(0..=max_extra_edges) {
                let target = rng.gen_range(0..=last);
                if target != source && targets.insert(target) {
                    neighbors.push(target);
                }
            }
        }

        let costs = (0..vertex_count)
            .map(|_| rng.gen_range(min_cost..=max_cost))
            .collect();

        Ok(WorkGraph {
            adjacency,
            costs,
            start: order[0],
        })
    }
}
