//! Error types for the wayfinder core library.
//!
//! Every public error enum is paired with a stable, machine-readable code enum
//! so callers (and the CLI) can report failures without matching on display
//! strings.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::IndexedMinPriorityQueue`] operations.
///
/// Every check runs before the queue is mutated, so a failed call leaves the
/// queue exactly as it was.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum QueueError {
    /// The item is already present; inserting it again would corrupt the
    /// item-to-slot index.
    #[error("item is already present in the priority queue")]
    DuplicateItem,
    /// A peek or pop was attempted on an empty queue.
    #[error("priority queue is empty")]
    Empty,
    /// The item whose priority should change is not in the queue.
    #[error("item is not present in the priority queue")]
    ItemNotFound,
    /// NaN priorities have no position in the heap order.
    #[error("priority must not be NaN")]
    NanPriority,
}

define_error_codes! {
    /// Stable codes describing [`QueueError`] variants.
    enum QueueErrorCode for QueueError {
        /// The item is already present.
        DuplicateItem => DuplicateItem => "QUEUE_DUPLICATE_ITEM",
        /// The queue is empty.
        Empty => Empty => "QUEUE_EMPTY",
        /// The item is not present.
        ItemNotFound => ItemNotFound => "QUEUE_ITEM_NOT_FOUND",
        /// The supplied priority was NaN.
        NanPriority => NanPriority => "QUEUE_NAN_PRIORITY",
    }
}

/// An error produced by [`crate::KdTree`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpatialIndexError {
    /// A nearest-point query was issued against a tree with no points.
    #[error("spatial index contains no points")]
    Empty,
    /// A point or query carried a NaN or infinite coordinate.
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate {
        /// Offending x coordinate.
        x: f64,
        /// Offending y coordinate.
        y: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`SpatialIndexError`] variants.
    enum SpatialIndexErrorCode for SpatialIndexError {
        /// The index contains no points.
        Empty => Empty => "SPATIAL_INDEX_EMPTY",
        /// A coordinate was not finite.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "SPATIAL_INDEX_NON_FINITE_COORDINATE",
    }
}

/// An error produced while running [`crate::search::solve`].
///
/// Timeouts and unreachable goals are not errors; they are reported through
/// [`crate::SolverOutcome`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SearchError {
    /// The graph reported an edge whose weight is negative or not finite.
    #[error("edge weight {weight} is negative or not finite")]
    InvalidEdgeWeight {
        /// Weight reported by the graph.
        weight: f64,
    },
    /// The heuristic returned NaN or a negative estimate.
    #[error("heuristic estimate {estimate} is negative or NaN")]
    InvalidEstimate {
        /// Estimate reported by the graph.
        estimate: f64,
    },
    /// Internal search state became inconsistent.
    #[error("search invariant violated: {message}")]
    InvariantViolation {
        /// Description of the broken invariant.
        message: String,
    },
    /// The frontier queue rejected an operation.
    #[error("frontier queue failure: {0}")]
    Queue(#[from] QueueError),
}

define_error_codes! {
    /// Stable codes describing [`SearchError`] variants.
    enum SearchErrorCode for SearchError {
        /// An edge weight was negative or not finite.
        InvalidEdgeWeight => InvalidEdgeWeight { .. } => "SEARCH_INVALID_EDGE_WEIGHT",
        /// A heuristic estimate was negative or NaN.
        InvalidEstimate => InvalidEstimate { .. } => "SEARCH_INVALID_ESTIMATE",
        /// Internal search state became inconsistent.
        InvariantViolation => InvariantViolation { .. } => "SEARCH_INVARIANT_VIOLATION",
        /// The frontier queue rejected an operation.
        QueueFailure => Queue(..) => "SEARCH_QUEUE_FAILURE",
    }
}

impl SearchError {
    /// Retrieve the inner [`QueueErrorCode`] when the failure came from the
    /// frontier queue.
    #[must_use]
    pub const fn queue_code(&self) -> Option<QueueErrorCode> {
        match self {
            Self::Queue(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Error type produced by [`crate::StreetMap`] and [`crate::Navigator`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StreetMapError {
    /// A vertex with the same identifier was already added.
    #[error("vertex {id} has already been added")]
    DuplicateNode {
        /// Identifier of the duplicate vertex.
        id: u64,
    },
    /// An operation referenced a vertex that does not exist.
    #[error("vertex {id} does not exist")]
    UnknownNode {
        /// Identifier of the missing vertex.
        id: u64,
    },
    /// A vertex was added with a NaN or infinite coordinate.
    #[error("vertex {id} has a non-finite coordinate ({lon}, {lat})")]
    NonFiniteCoordinate {
        /// Identifier of the offending vertex.
        id: u64,
        /// Longitude supplied by the caller.
        lon: f64,
        /// Latitude supplied by the caller.
        lat: f64,
    },
    /// The configured search timeout was zero.
    #[error("search timeout must be greater than zero")]
    InvalidTimeout,
    /// A spatial lookup failed.
    #[error("spatial lookup failed: {0}")]
    Spatial(#[from] SpatialIndexError),
    /// A route search failed.
    #[error("route search failed: {0}")]
    Search(#[from] SearchError),
}

define_error_codes! {
    /// Stable codes describing [`StreetMapError`] variants.
    enum StreetMapErrorCode for StreetMapError {
        /// A vertex with the same identifier was already added.
        DuplicateNode => DuplicateNode { .. } => "STREET_MAP_DUPLICATE_NODE",
        /// An operation referenced a vertex that does not exist.
        UnknownNode => UnknownNode { .. } => "STREET_MAP_UNKNOWN_NODE",
        /// A vertex was added with a non-finite coordinate.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "STREET_MAP_NON_FINITE_COORDINATE",
        /// The configured search timeout was zero.
        InvalidTimeout => InvalidTimeout => "STREET_MAP_INVALID_TIMEOUT",
        /// A spatial lookup failed.
        SpatialFailure => Spatial(..) => "STREET_MAP_SPATIAL_FAILURE",
        /// A route search failed.
        SearchFailure => Search(..) => "STREET_MAP_SEARCH_FAILURE",
    }
}

impl StreetMapError {
    /// Retrieve the inner [`SpatialIndexErrorCode`] when the failure came from
    /// the spatial index.
    #[must_use]
    pub const fn spatial_code(&self) -> Option<SpatialIndexErrorCode> {
        match self {
            Self::Spatial(error) => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`SearchErrorCode`] when the failure came from the
    /// route search.
    #[must_use]
    pub const fn search_code(&self) -> Option<SearchErrorCode> {
        match self {
            Self::Search(error) => Some(error.code()),
            _ => None,
        }
    }
}
