//! Benchmark parameter types.
//!
//! Each struct names one benchmark input size so Criterion reports stay
//! readable.

use std::fmt;

/// Parameters for a priority queue benchmark run.
#[derive(Clone, Debug)]
pub struct QueueBenchParams {
    /// Number of items pushed through the queue.
    pub item_count: usize,
}

impl fmt::Display for QueueBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.item_count)
    }
}

/// Parameters for a KD-tree benchmark run.
#[derive(Clone, Debug)]
pub struct SpatialBenchParams {
    /// Number of points in the tree.
    pub point_count: usize,
}

impl fmt::Display for SpatialBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.point_count)
    }
}

/// Parameters for an A* benchmark run over a generated grid.
#[derive(Clone, Debug)]
pub struct RouteBenchParams {
    /// Vertices along each side of the grid.
    pub side: u32,
    /// Share of blocked cells, in percent.
    pub obstacle_percent: u32,
}

impl fmt::Display for RouteBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side={},blocked={}%", self.side, self.obstacle_percent)
    }
}
