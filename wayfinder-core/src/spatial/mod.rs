//! Nearest-point lookup over planar coordinates.
//!
//! [`KdTree`] answers "which stored point is closest to this query?" and is
//! the index the navigator uses to snap raw coordinates onto street vertices.

mod kdtree;
mod point;

pub use self::{
    kdtree::KdTree,
    point::{Point, SplitAxis},
};

#[cfg(test)]
mod property;
