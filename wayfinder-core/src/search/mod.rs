//! A* route search with a wall-clock budget.
//!
//! [`solve`] expands vertices of any [`AStarGraph`] in order of
//! `distance so far + estimated remaining distance`, using an
//! [`IndexedMinPriorityQueue`](crate::IndexedMinPriorityQueue) as the
//! frontier so improved vertices are re-prioritised in place.

mod graph;
mod report;
mod solver;

pub use self::{
    graph::{AStarGraph, WeightedEdge},
    report::{SearchReport, SolverOutcome},
    solver::solve,
};

#[cfg(test)]
mod property;
