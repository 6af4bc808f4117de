//! Street network model and the navigation facade built on it.
//!
//! [`StreetMap`] stores geographic vertices joined by ways and exposes them to
//! the A* search. [`Navigator`] adds coordinate snapping through a
//! [`KdTree`](crate::KdTree) and name lookup through a
//! [`PrefixIndex`](crate::PrefixIndex).

mod geo;
mod map;
mod navigator;

pub use self::{
    geo::{EARTH_RADIUS_METRES, clean_name, great_circle_distance},
    map::{StreetMap, StreetNode, VertexId},
    navigator::{DEFAULT_TIMEOUT, Location, Navigator, NavigatorBuilder},
};
