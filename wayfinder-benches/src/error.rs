//! Benchmark setup error type.
//!
//! Aggregates the error types that may arise during benchmark data
//! preparation so that setup functions can propagate failures with `?`
//! instead of using `.expect()`.

use crate::source::SyntheticError;
use wayfinder_core::{QueueError, SearchError, SpatialIndexError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic input generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Filling the priority queue failed.
    #[error("priority queue operation failed: {0}")]
    Queue(#[from] QueueError),
    /// Building or querying the KD-tree failed.
    #[error("spatial index operation failed: {0}")]
    Spatial(#[from] SpatialIndexError),
    /// A warm-up search failed.
    #[error("route search failed: {0}")]
    Search(#[from] SearchError),
    /// A warm-up search did not reach its goal.
    #[error("warm-up search ended with outcome `{outcome}`")]
    Unsolved {
        /// Outcome reported by the solver.
        outcome: wayfinder_core::SolverOutcome,
    },
}
