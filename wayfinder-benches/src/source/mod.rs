//! Synthetic benchmark inputs.
//!
//! This module provides seeded generators for queue priorities, planar point
//! clouds and obstacle grids that implement the A* graph capability.

mod errors;
mod grid;
mod points;

pub use errors::SyntheticError;
pub use grid::{Cell, GridConfig, GridGraph};
pub use points::{PointCloudConfig, generate_points, generate_priorities};
