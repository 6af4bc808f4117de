//! Graph capability consumed by the A* solver.

use std::hash::Hash;

/// A directed edge with a non-negative weight.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedEdge<V> {
    from: V,
    to: V,
    weight: f64,
}

impl<V> WeightedEdge<V> {
    /// Creates an edge from `from` to `to`.
    #[must_use]
    pub const fn new(from: V, to: V, weight: f64) -> Self {
        Self { from, to, weight }
    }

    /// Returns the source vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn from(&self) -> &V { &self.from }

    /// Returns the destination vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn to(&self) -> &V { &self.to }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }
}

/// Weighted directed graph with a goal-distance heuristic.
///
/// Edge weights must be finite and non-negative. The heuristic must never be
/// NaN or negative; for optimal routes it must also never overestimate the
/// remaining distance. An overestimating heuristic still terminates but may
/// return a longer route.
pub trait AStarGraph {
    /// Vertex identifier.
    type Vertex: Clone + Eq + Hash;

    /// Returns the outgoing edges of `vertex`.
    fn neighbors(&self, vertex: &Self::Vertex) -> Vec<WeightedEdge<Self::Vertex>>;

    /// Estimates the remaining distance from `vertex` to `goal`.
    fn estimated_distance_to_goal(&self, vertex: &Self::Vertex, goal: &Self::Vertex) -> f64;
}

impl<G: AStarGraph + ?Sized> AStarGraph for &G {
    type Vertex = G::Vertex;

    fn neighbors(&self, vertex: &Self::Vertex) -> Vec<WeightedEdge<Self::Vertex>> {
        (**self).neighbors(vertex)
    }

    fn estimated_distance_to_goal(&self, vertex: &Self::Vertex, goal: &Self::Vertex) -> f64 {
        (**self).estimated_distance_to_goal(vertex, goal)
    }
}
