//! Immutable result of a single A* invocation.

use std::{fmt, time::Duration};

/// How a search ended.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SolverOutcome {
    /// The goal was reached; the report carries the route.
    Solved,
    /// The time budget ran out before the goal was reached.
    Timeout,
    /// The frontier emptied without reaching the goal.
    Unsolvable,
}

impl SolverOutcome {
    /// Returns a stable lowercase label for logs and rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solved => "solved",
            Self::Timeout => "timeout",
            Self::Unsolvable => "unsolvable",
        }
    }
}

impl fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome, route and statistics of one search.
///
/// The route is empty and the weight zero unless the outcome is
/// [`SolverOutcome::Solved`].
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport<V> {
    outcome: SolverOutcome,
    solution: Vec<V>,
    solution_weight: f64,
    states_explored: usize,
    exploration_time: Duration,
}

impl<V> SearchReport<V> {
    pub(super) const fn solved(
        solution: Vec<V>,
        solution_weight: f64,
        states_explored: usize,
        exploration_time: Duration,
    ) -> Self {
        Self {
            outcome: SolverOutcome::Solved,
            solution,
            solution_weight,
            states_explored,
            exploration_time,
        }
    }

    pub(super) const fn unsolved(
        outcome: SolverOutcome,
        states_explored: usize,
        exploration_time: Duration,
    ) -> Self {
        Self {
            outcome,
            solution: Vec::new(),
            solution_weight: 0.0,
            states_explored,
            exploration_time,
        }
    }

    /// Returns how the search ended.
    #[must_use]
    #[rustfmt::skip]
    pub const fn outcome(&self) -> SolverOutcome { self.outcome }

    /// Returns the route from start to goal, both inclusive.
    #[must_use]
    pub fn solution(&self) -> &[V] {
        &self.solution
    }

    /// Consumes the report and returns the route.
    #[must_use]
    pub fn into_solution(self) -> Vec<V> {
        self.solution
    }

    /// Returns the summed edge weight of the route.
    #[must_use]
    #[rustfmt::skip]
    pub const fn solution_weight(&self) -> f64 { self.solution_weight }

    /// Returns how many vertices were dequeued and expanded.
    #[must_use]
    #[rustfmt::skip]
    pub const fn states_explored(&self) -> usize { self.states_explored }

    /// Returns the wall-clock time the search took.
    #[must_use]
    #[rustfmt::skip]
    pub const fn exploration_time(&self) -> Duration { self.exploration_time }
}
