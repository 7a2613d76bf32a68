//! Concurrent frontier traversal of graphs with variable-cost vertex work.
//!
//! Each vertex of the traversed graph carries an opaque unit of work whose
//! cost is unknown in advance, and a vertex's neighbors are only revealed once
//! its work has completed. This crate visits every vertex reachable from the
//! start vertex exactly once, spreading the work dynamically across a fixed
//! number of execution units:
//! - A shared FIFO frontier and visited set live behind a single lock, so that
//!   a vertex discovered by several units at once is still enqueued once.
//! - Work runs outside the lock, so expensive vertices never serialize
//!   unrelated units.
//! - An in-flight counter plus a condition variable form a quiescence
//!   barrier: a unit that sees an empty frontier waits for the work of its
//!   siblings before it concludes that the traversal is over.
//! - The first fault (a failing or panicking vertex) aborts every unit.
//!
//! Key modules:
//! - `source`: the `GraphSource` trait the scheduler consumes.
//! - `scheduler`: the `Scheduler` itself, its report and its errors.
//! - `config`: `TraversalConfig`, the number of execution units and their
//!   thread names.
//! - `work_graph`: a random `WorkGraph` generator with busy-work vertices.
//! - `types`: `VertexId` and hash collection aliases.
//!
//! Quick start:
//! 1. Implement `GraphSource` (or build a `WorkGraph`).
//! 2. Call `traverse` with a `TraversalConfig`, or use `Scheduler` directly
//!    to seed several start vertices.
//!
//! With a single execution unit the traversal runs on the calling thread in
//! breadth-first order. Any other unit count reaches the same set of
//! vertices; only order and timing differ.

/// Run-time parameters of a traversal.
pub mod config;
/// The concurrent frontier scheduler.
///
/// Owns the frontier, the visited set and the in-flight counter for the
/// duration of one traversal and drives the execution units over them.
pub mod scheduler;
/// The read-only graph interface consumed by the scheduler, plus a sequential
/// reference breadth-first order.
pub mod source;
mod sync;
/// Core types used across the crate (vertex IDs, hash collections).
pub mod types;
/// Random graph generator with busy-work vertices.
pub mod work_graph;

pub use crate::{
    config::TraversalConfig,
    scheduler::{Scheduler, TraversalError, TraversalReport, traverse},
    source::GraphSource,
    types::VertexId,
};
