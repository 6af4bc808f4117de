//! A* driver over an [`AStarGraph`].

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tracing::{debug, instrument, warn};

use super::{
    graph::AStarGraph,
    report::{SearchReport, SolverOutcome},
};
use crate::{IndexedMinPriorityQueue, error::SearchError};

/// Finds a least-weight route from `start` to `goal` within `timeout`.
///
/// Vertices are expanded in order of `distance so far + heuristic`. The clock
/// is sampled once per expanded vertex, so a slow `neighbors` call can overrun
/// the budget by at most one expansion. Running out of time or exhausting the
/// frontier is reported through [`SearchReport::outcome`], not as an error.
///
/// A zero `timeout` always yields [`SolverOutcome::Timeout`]. When
/// `start == goal` and the timeout is positive the route is `[start]` with
/// weight zero and no vertex is expanded.
///
/// # Errors
/// Returns [`SearchError::InvalidEdgeWeight`] when the graph yields a
/// negative or non-finite weight, [`SearchError::InvalidEstimate`] when the
/// heuristic yields NaN or a negative value, and
/// [`SearchError::InvariantViolation`] if the predecessor chain is broken.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayfinder_core::search::{solve, AStarGraph, SolverOutcome, WeightedEdge};
///
/// struct Line;
///
/// impl AStarGraph for Line {
///     type Vertex = u32;
///
///     fn neighbors(&self, v: &u32) -> Vec<WeightedEdge<u32>> {
///         if *v < 3 { vec![WeightedEdge::new(*v, v + 1, 1.5)] } else { Vec::new() }
///     }
///
///     fn estimated_distance_to_goal(&self, _: &u32, _: &u32) -> f64 {
///         0.0
///     }
/// }
///
/// let report = solve(&Line, 0, 3, Duration::from_secs(1))?;
/// assert_eq!(report.outcome(), SolverOutcome::Solved);
/// assert_eq!(report.solution(), &[0, 1, 2, 3]);
/// assert_eq!(report.solution_weight(), 4.5);
/// # Ok::<(), wayfinder_core::SearchError>(())
/// ```
#[instrument(
    name = "search.astar",
    err,
    skip_all,
    fields(
        timeout = ?timeout,
        explored = tracing::field::Empty,
        outcome = tracing::field::Empty,
    ),
)]
pub fn solve<G: AStarGraph>(
    graph: &G,
    start: G::Vertex,
    goal: G::Vertex,
    timeout: Duration,
) -> Result<SearchReport<G::Vertex>, SearchError> {
    let started = Instant::now();
    let mut state = SearchState::new(graph, &goal);
    state.open(start.clone())?;

    let mut explored = 0_usize;
    let mut elapsed = Duration::ZERO;
    while elapsed < timeout {
        match state.frontier.peek_min() {
            Ok(next) if *next == goal => break,
            Ok(_) => {}
            Err(_) => break,
        }
        let current = state.frontier.pop_min()?;
        explored += 1;
        state.relax(&current)?;
        elapsed = started.elapsed();
    }

    tracing::Span::current().record("explored", explored);
    let report = if elapsed >= timeout {
        warn!(
            explored,
            elapsed = ?elapsed,
            "search timed out before reaching the goal"
        );
        SearchReport::unsolved(SolverOutcome::Timeout, explored, started.elapsed())
    } else if state.frontier.is_empty() {
        debug!(explored, "frontier exhausted without reaching the goal");
        SearchReport::unsolved(SolverOutcome::Unsolvable, explored, started.elapsed())
    } else {
        let weight = state.distance(&goal)?;
        let route = state.route(&start)?;
        debug!(explored, weight, hops = route.len(), "route found");
        SearchReport::solved(route, weight, explored, started.elapsed())
    };
    tracing::Span::current().record("outcome", report.outcome().as_str());
    Ok(report)
}

/// Per-invocation bookkeeping: best known distances, predecessors and the
/// open set keyed by `distance + heuristic`.
struct SearchState<'graph, G: AStarGraph> {
    graph: &'graph G,
    goal: &'graph G::Vertex,
    dist_to: HashMap<G::Vertex, f64>,
    edge_to: HashMap<G::Vertex, G::Vertex>,
    frontier: IndexedMinPriorityQueue<G::Vertex>,
}

impl<'graph, G: AStarGraph> SearchState<'graph, G> {
    fn new(graph: &'graph G, goal: &'graph G::Vertex) -> Self {
        Self {
            graph,
            goal,
            dist_to: HashMap::new(),
            edge_to: HashMap::new(),
            frontier: IndexedMinPriorityQueue::new(),
        }
    }

    fn open(&mut self, start: G::Vertex) -> Result<(), SearchError> {
        let priority = self.estimate(&start)?;
        self.dist_to.insert(start.clone(), 0.0);
        self.frontier.add(start, priority)?;
        Ok(())
    }

    fn estimate(&self, vertex: &G::Vertex) -> Result<f64, SearchError> {
        let estimate = self.graph.estimated_distance_to_goal(vertex, self.goal);
        // NaN fails the comparison.
        if estimate >= 0.0 {
            Ok(estimate)
        } else {
            Err(SearchError::InvalidEstimate { estimate })
        }
    }

    fn distance(&self, vertex: &G::Vertex) -> Result<f64, SearchError> {
        self.dist_to
            .get(vertex)
            .copied()
            .ok_or_else(|| SearchError::InvariantViolation {
                message: "expanded vertex has no recorded distance".to_owned(),
            })
    }

    /// Records every strictly shorter path through `current` and updates the
    /// frontier accordingly.
    fn relax(&mut self, current: &G::Vertex) -> Result<(), SearchError> {
        let base = self.distance(current)?;
        for edge in self.graph.neighbors(current) {
            let weight = edge.weight();
            if !weight.is_finite() || weight < 0.0 {
                return Err(SearchError::InvalidEdgeWeight { weight });
            }
            let candidate = base + weight;
            let next = edge.to();
            if self
                .dist_to
                .get(next)
                .is_some_and(|known| candidate >= *known)
            {
                continue;
            }

            let priority = candidate + self.estimate(next)?;
            self.dist_to.insert(next.clone(), candidate);
            self.edge_to.insert(next.clone(), current.clone());
            // An inconsistent heuristic can improve a vertex that was already
            // expanded; it goes back on the frontier.
            if self.frontier.contains(next) {
                self.frontier.change_priority(next, priority)?;
            } else {
                self.frontier.add(next.clone(), priority)?;
            }
        }
        Ok(())
    }

    /// Walks predecessors back from the goal and returns the route in travel
    /// order.
    fn route(&self, start: &G::Vertex) -> Result<Vec<G::Vertex>, SearchError> {
        let mut route = vec![self.goal.clone()];
        let mut cursor = self.goal;
        while cursor != start {
            cursor = self
                .edge_to
                .get(cursor)
                .ok_or_else(|| SearchError::InvariantViolation {
                    message: "vertex on the route has no predecessor".to_owned(),
                })?;
            route.push(cursor.clone());
            if route.len() > self.edge_to.len() + 1 {
                return Err(SearchError::InvariantViolation {
                    message: "predecessor chain contains a cycle".to_owned(),
                });
            }
        }
        route.reverse();
        Ok(route)
    }
}
