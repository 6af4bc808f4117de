//! Street graph with geographic vertices and great-circle edge weights.

use std::collections::HashMap;

use tracing::trace;

use super::geo::great_circle_distance;
use crate::{
    error::StreetMapError,
    search::{AStarGraph, WeightedEdge},
};

/// Identifier of a street vertex.
pub type VertexId = u64;

/// A vertex of the street graph.
#[derive(Clone, Debug, PartialEq)]
pub struct StreetNode {
    id: VertexId,
    lon: f64,
    lat: f64,
    name: Option<String>,
    edges: Vec<(VertexId, f64)>,
}

impl StreetNode {
    /// Returns the vertex identifier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> VertexId { self.id }

    /// Returns the longitude in degrees.
    #[must_use]
    #[rustfmt::skip]
    pub const fn lon(&self) -> f64 { self.lon }

    /// Returns the latitude in degrees.
    #[must_use]
    #[rustfmt::skip]
    pub const fn lat(&self) -> f64 { self.lat }

    /// Returns `(lon, lat)`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn position(&self) -> (f64, f64) { (self.lon, self.lat) }

    /// Returns the display name, if one was set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the number of outgoing edges.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// Undirected street network stored as paired directed edges.
///
/// Vertices keep their insertion order. Each way contributes an edge in both
/// directions between consecutive vertices, weighted by the great-circle
/// distance in metres.
///
/// # Examples
/// ```
/// use wayfinder_core::StreetMap;
///
/// let mut map = StreetMap::new();
/// map.add_node(1, -122.2585, 37.8719)?;
/// map.add_node(2, -122.2590, 37.8725)?;
/// map.add_way(&[1, 2])?;
/// assert_eq!(map.degree(1), Some(1));
/// assert_eq!(map.degree(2), Some(1));
/// # Ok::<(), wayfinder_core::StreetMapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct StreetMap {
    nodes: Vec<StreetNode>,
    slots: HashMap<VertexId, usize>,
}

impl StreetMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Returns whether the map has no vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Adds a vertex at `(lon, lat)`.
    ///
    /// # Errors
    /// Returns [`StreetMapError::DuplicateNode`] when `id` already exists and
    /// [`StreetMapError::NonFiniteCoordinate`] when either coordinate is NaN
    /// or infinite.
    pub fn add_node(&mut self, id: VertexId, lon: f64, lat: f64) -> Result<(), StreetMapError> {
        if self.slots.contains_key(&id) {
            return Err(StreetMapError::DuplicateNode { id });
        }
        if !lon.is_finite() || !lat.is_finite() {
            return Err(StreetMapError::NonFiniteCoordinate { id, lon, lat });
        }
        self.slots.insert(id, self.nodes.len());
        self.nodes.push(StreetNode {
            id,
            lon,
            lat,
            name: None,
            edges: Vec::new(),
        });
        Ok(())
    }

    /// Sets or replaces the display name of a vertex.
    ///
    /// # Errors
    /// Returns [`StreetMapError::UnknownNode`] when `id` does not exist.
    pub fn set_name(&mut self, id: VertexId, name: impl Into<String>) -> Result<(), StreetMapError> {
        let node = self.node_mut(id)?;
        node.name = Some(name.into());
        Ok(())
    }

    /// Connects consecutive vertices of `ids` in both directions.
    ///
    /// Every id is validated before any edge is added, so a failed call leaves
    /// the map unchanged. Ways with fewer than two vertices add nothing.
    ///
    /// # Errors
    /// Returns [`StreetMapError::UnknownNode`] for the first id that does not
    /// exist.
    pub fn add_way(&mut self, ids: &[VertexId]) -> Result<(), StreetMapError> {
        let slots = ids
            .iter()
            .map(|&id| self.slot(id))
            .collect::<Result<Vec<_>, _>>()?;

        for pair in slots.windows(2) {
            let &[a, b] = pair else { continue };
            let (Some(from), Some(to)) = (self.nodes.get(a), self.nodes.get(b)) else {
                continue;
            };
            let weight = great_circle_distance(from.position(), to.position());
            let (from_id, to_id) = (from.id, to.id);
            if let Some(node) = self.nodes.get_mut(a) {
                node.edges.push((to_id, weight));
            }
            if let Some(node) = self.nodes.get_mut(b) {
                node.edges.push((from_id, weight));
            }
        }
        trace!(vertices = ids.len(), "way added");
        Ok(())
    }

    /// Returns the vertex with identifier `id`.
    #[must_use]
    pub fn node(&self, id: VertexId) -> Option<&StreetNode> {
        self.slots.get(&id).and_then(|&slot| self.nodes.get(slot))
    }

    /// Returns the number of outgoing edges of `id`, or `None` when the vertex
    /// does not exist.
    #[must_use]
    pub fn degree(&self, id: VertexId) -> Option<usize> {
        self.node(id).map(StreetNode::degree)
    }

    /// Iterates over vertex identifiers in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    /// Iterates over vertices in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &StreetNode> + '_ {
        self.nodes.iter()
    }

    fn slot(&self, id: VertexId) -> Result<usize, StreetMapError> {
        self.slots
            .get(&id)
            .copied()
            .ok_or(StreetMapError::UnknownNode { id })
    }

    fn node_mut(&mut self, id: VertexId) -> Result<&mut StreetNode, StreetMapError> {
        let slot = self.slot(id)?;
        self.nodes
            .get_mut(slot)
            .ok_or(StreetMapError::UnknownNode { id })
    }
}

impl AStarGraph for StreetMap {
    type Vertex = VertexId;

    fn neighbors(&self, vertex: &VertexId) -> Vec<WeightedEdge<VertexId>> {
        self.node(*vertex)
            .map(|node| {
                node.edges
                    .iter()
                    .map(|&(to, weight)| WeightedEdge::new(*vertex, to, weight))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Great-circle distance to `goal`; never overestimates because every
    /// edge weight is itself a great-circle distance.
    fn estimated_distance_to_goal(&self, vertex: &VertexId, goal: &VertexId) -> f64 {
        match (self.node(*vertex), self.node(*goal)) {
            (Some(from), Some(to)) => great_circle_distance(from.position(), to.position()),
            _ => 0.0,
        }
    }
}
