//! Wayfinder core library.
//!
//! Building blocks for street-map routing: an indexed binary min-heap, a
//! two-dimensional KD-tree, a time-boxed A* search and a prefix trie, tied
//! together by [`StreetMap`] and the [`Navigator`] facade.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod queue;
pub mod search;
mod spatial;
pub mod streetmap;
mod trie;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{
        QueueError, QueueErrorCode, SearchError, SearchErrorCode, SpatialIndexError,
        SpatialIndexErrorCode, StreetMapError, StreetMapErrorCode,
    },
    queue::{
        IndexedMinPriorityQueue, MIN_CAPACITY, QueueInvariant, QueueInvariantChecker,
        QueueInvariantViolation,
    },
    search::{AStarGraph, SearchReport, SolverOutcome, WeightedEdge},
    spatial::{KdTree, Point, SplitAxis},
    streetmap::{Location, Navigator, NavigatorBuilder, StreetMap, StreetNode, VertexId},
    trie::PrefixIndex,
};
