#![allow(dead_code)]

use cft::{GraphSource, VertexId};
use core::time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("vertex {0} refused to work")]
pub struct Refused(pub VertexId);

/// Adjacency-list graph that counts how often the work of each vertex runs.
#[derive(Debug)]
pub struct ListGraph {
    adjacency: Vec<Vec<VertexId>>,
    start: VertexId,
    delays: Vec<Duration>,
    executions: Vec<AtomicUsize>,
    fail_on: Option<VertexId>,
    panic_on: Option<VertexId>,
}

impl ListGraph {
    pub fn new(adjacency: Vec<Vec<VertexId>>, start: VertexId) -> Self {
        let vertex_count = adjacency.len();
        Self {
            adjacency,
            start,
            delays: vec![Duration::ZERO; vertex_count],
            executions: (0..vertex_count).map(|_| AtomicUsize::new(0)).collect(),
            fail_on: None,
            panic_on: None,
        }
    }

    pub fn from_edges(vertex_count: usize, edges: &[(VertexId, VertexId)], start: VertexId) -> Self {
        let mut adjacency = vec![Vec::new(); vertex_count];
        for &(from, to) in edges {
            adjacency[from as usize].push(to);
        }
        Self::new(adjacency, start)
    }

    /// Random directed graph; not necessarily connected.
    pub fn random(seed: u64, vertex_count: usize, max_degree: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let last = (vertex_count - 1) as VertexId;
        let adjacency = (0..vertex_count)
            .map(|_| {
                (0..rng.gen_range(0..=max_degree))
                    .map(|_| rng.gen_range(0..=last))
                    .collect()
            })
            .collect();
        Self::new(adjacency, 0)
    }

    pub fn with_delay(mut self, vertex: VertexId, delay: Duration) -> Self {
        self.delays[vertex as usize] = delay;
        self
    }

    pub fn with_uniform_delay(mut self, delay: Duration) -> Self {
        self.delays.fill(delay);
        self
    }

    pub fn failing_on(mut self, vertex: VertexId) -> Self {
        self.fail_on = Some(vertex);
        self
    }

    pub fn panicking_on(mut self, vertex: VertexId) -> Self {
        self.panic_on = Some(vertex);
        self
    }

    pub fn executions(&self, vertex: VertexId) -> usize {
        self.executions[vertex as usize].load(Ordering::SeqCst)
    }

    pub fn total_executions(&self) -> usize {
        self.executions
            .iter()
            .map(|count| count.load(Ordering::SeqCst))
            .sum()
    }
}

impl GraphSource for ListGraph {
    type Error = Refused;

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn start_vertex(&self) -> VertexId {
        self.start
    }

    fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        &self.adjacency[vertex as usize]
    }

    fn execute_work(&self, vertex: VertexId) -> Result<Vec<VertexId>, Self::Error> {
        self.executions[vertex as usize].fetch_add(1, Ordering::SeqCst);
        let delay = self.delays[vertex as usize];
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        if self.panic_on == Some(vertex) {
            panic!("vertex {vertex} panicked");
        }
        if self.fail_on == Some(vertex) {
            return Err(Refused(vertex));
        }
        Ok(self.neighbors(vertex).to_vec())
    }
}

/// Chain `0 -> 1 -> ... -> len - 1`.
pub fn chain(len: usize) -> ListGraph {
    let adjacency = (0..len)
        .map(|vertex| {
            if vertex + 1 < len {
                vec![(vertex + 1) as VertexId]
            } else {
                vec![]
            }
        })
        .collect();
    ListGraph::new(adjacency, 0)
}

/// Unit counts exercised by most tests.
pub fn unit_counts() -> Vec<usize> {
    let available = std::thread::available_parallelism().map_or(1, usize::from);
    let mut counts = vec![1, 2, 4, available.max(2)];
    counts.sort_unstable();
    counts.dedup();
    counts
}
