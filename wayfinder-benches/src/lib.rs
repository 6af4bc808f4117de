//! Benchmark support crate for wayfinder.
//!
//! Provides seeded synthetic inputs and parameter types used by Criterion
//! benchmarks for the three routing building blocks: the indexed priority
//! queue, the KD-tree nearest-point index and the A* search.

pub mod error;
pub mod params;
pub mod source;
