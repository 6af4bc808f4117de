//! Obstacle grids that implement [`AStarGraph`].

use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use wayfinder_core::{AStarGraph, WeightedEdge};

use super::SyntheticError;

/// Grid coordinate `(column, row)`.
pub type Cell = (u32, u32);

/// Configuration for [`GridGraph::generate`].
#[derive(Clone, Debug)]
pub struct GridConfig {
    /// Vertices along each side.
    pub side: u32,
    /// Probability in `[0, 1)` that a cell is blocked.
    pub obstacle_ratio: f64,
    /// Seed for the generator.
    pub seed: u64,
}

/// Four-connected square grid with unit edge weights and randomly blocked
/// cells.
///
/// Blocked cells have no outgoing edges and are never entered. The two
/// corners returned by [`GridGraph::corners`] are always open. The heuristic
/// is the Manhattan distance, which is consistent on this graph.
#[derive(Clone, Debug)]
pub struct GridGraph {
    side: u32,
    blocked: HashSet<Cell>,
}

impl GridGraph {
    /// Generates a grid from `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError::GridTooSmall`] for fewer than two vertices
    /// per side and [`SyntheticError::InvalidFloatParameter`] when the
    /// obstacle ratio lies outside `[0, 1)`.
    pub fn generate(config: &GridConfig) -> Result<Self, SyntheticError> {
        if config.side < 2 {
            return Err(SyntheticError::GridTooSmall { side: config.side });
        }
        if !(0.0..1.0).contains(&config.obstacle_ratio) {
            return Err(SyntheticError::InvalidFloatParameter {
                parameter: "obstacle_ratio",
            });
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let last = config.side - 1;
        let mut blocked = HashSet::new();
        for row in 0..config.side {
            for column in 0..config.side {
                let corner = (column, row) == (0, 0) || (column, row) == (last, last);
                if !corner && rng.gen_bool(config.obstacle_ratio) {
                    blocked.insert((column, row));
                }
            }
        }
        Ok(Self {
            side: config.side,
            blocked,
        })
    }

    /// Returns the top-left and bottom-right corners.
    #[must_use]
    pub const fn corners(&self) -> (Cell, Cell) {
        let last = self.side - 1;
        ((0, 0), (last, last))
    }

    /// Returns the number of vertices along each side.
    #[must_use]
    #[rustfmt::skip]
    pub const fn side(&self) -> u32 { self.side }

    /// Returns the number of blocked cells.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Returns `true` when `cell` is blocked.
    #[must_use]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    fn is_open(&self, cell: Cell) -> bool {
        cell.0 < self.side && cell.1 < self.side && !self.blocked.contains(&cell)
    }
}

impl AStarGraph for GridGraph {
    type Vertex = Cell;

    fn neighbors(&self, vertex: &Cell) -> Vec<WeightedEdge<Cell>> {
        if !self.is_open(*vertex) {
            return Vec::new();
        }
        let (column, row) = *vertex;
        [
            column.checked_sub(1).map(|left| (left, row)),
            column.checked_add(1).map(|right| (right, row)),
            row.checked_sub(1).map(|up| (column, up)),
            row.checked_add(1).map(|down| (column, down)),
        ]
        .into_iter()
        .flatten()
        .filter(|next| self.is_open(*next))
        .map(|next| WeightedEdge::new(*vertex, next, 1.0))
        .collect()
    }

    fn estimated_distance_to_goal(&self, vertex: &Cell, goal: &Cell) -> f64 {
        f64::from(vertex.0.abs_diff(goal.0).saturating_add(vertex.1.abs_diff(goal.1)))
    }
}
