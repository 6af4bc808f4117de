//! Coordinate snapping, name lookup and routing over a [`StreetMap`].

use std::{collections::HashMap, time::Duration};

use tracing::{debug, instrument};

use super::{
    geo::clean_name,
    map::{StreetMap, VertexId},
};
use crate::{
    error::{SpatialIndexError, StreetMapError},
    search::{SearchReport, solve},
    spatial::{KdTree, Point},
    trie::PrefixIndex,
};

/// Search budget used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A named vertex returned by [`Navigator::locations`].
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    id: VertexId,
    lon: f64,
    lat: f64,
    name: String,
}

impl Location {
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

    /// Returns the name exactly as stored on the vertex.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Configures and constructs [`Navigator`] instances.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayfinder_core::{NavigatorBuilder, StreetMap};
///
/// let navigator = NavigatorBuilder::new()
///     .with_timeout(Duration::from_secs(2))
///     .build(StreetMap::new())
///     .expect("builder configuration is valid");
/// assert_eq!(navigator.timeout(), Duration::from_secs(2));
/// ```
#[derive(Clone, Debug)]
pub struct NavigatorBuilder {
    timeout: Duration,
}

impl Default for NavigatorBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NavigatorBuilder {
    /// Creates a builder with the default ten second search budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the search budget applied to every route.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured search budget.
    #[must_use]
    #[rustfmt::skip]
    pub const fn timeout(&self) -> Duration { self.timeout }

    /// Validates the configuration and indexes `map`.
    ///
    /// Only vertices with at least one edge take part in coordinate snapping.
    /// Every named vertex is indexed for name lookup.
    ///
    /// # Errors
    /// Returns [`StreetMapError::InvalidTimeout`] for a zero timeout.
    #[instrument(name = "navigator.build", err, skip_all, fields(vertices = map.len()))]
    pub fn build(self, map: StreetMap) -> Result<Navigator, StreetMapError> {
        if self.timeout.is_zero() {
            return Err(StreetMapError::InvalidTimeout);
        }

        let mut spatial = KdTree::new();
        let mut owners = HashMap::new();
        let mut names = PrefixIndex::new();
        let mut display_names: HashMap<String, String> = HashMap::new();
        let mut locations: HashMap<String, Vec<Location>> = HashMap::new();

        for node in map.nodes() {
            if node.degree() > 0 {
                let point = Point::new(node.lon(), node.lat());
                spatial.insert(point)?;
                owners.entry(point_key(point)).or_insert(node.id());
            }

            let Some(name) = node.name() else { continue };
            let cleaned = clean_name(name);
            if cleaned.is_empty() {
                continue;
            }
            names.add(&cleaned);
            display_names
                .entry(cleaned.clone())
                .or_insert_with(|| name.to_owned());
            locations.entry(cleaned).or_default().push(Location {
                id: node.id(),
                lon: node.lon(),
                lat: node.lat(),
                name: name.to_owned(),
            });
        }

        debug!(
            routable = spatial.len(),
            names = names.len(),
            "navigator indexes built"
        );
        Ok(Navigator {
            map,
            timeout: self.timeout,
            spatial,
            owners,
            names,
            display_names,
            locations,
        })
    }
}

/// Routing facade over a [`StreetMap`].
///
/// Built by [`NavigatorBuilder`]. Holds the map together with a KD-tree of
/// routable vertex positions and name indexes.
#[derive(Debug)]
pub struct Navigator {
    map: StreetMap,
    timeout: Duration,
    spatial: KdTree,
    owners: HashMap<(u64, u64), VertexId>,
    names: PrefixIndex,
    display_names: HashMap<String, String>,
    locations: HashMap<String, Vec<Location>>,
}

impl Navigator {
    /// Returns the underlying map.
    #[must_use]
    #[rustfmt::skip]
    pub const fn map(&self) -> &StreetMap { &self.map }

    /// Returns the search budget applied to every route.
    #[must_use]
    #[rustfmt::skip]
    pub const fn timeout(&self) -> Duration { self.timeout }

    /// Returns how many distinct positions take part in coordinate snapping.
    #[must_use]
    pub const fn routable_positions(&self) -> usize {
        self.spatial.len()
    }

    /// Returns the routable vertex closest to `(lon, lat)`.
    ///
    /// Distance is planar in degrees. When several vertices share the closest
    /// position, the one whose node was added to the map first is returned;
    /// vertices added later at the same position never replace it. Ties are
    /// therefore stable across rebuilds of the same map but depend on node
    /// insertion order, not on vertex id.
    ///
    /// # Errors
    /// Returns [`StreetMapError::Spatial`] when no vertex has an edge or the
    /// query is not finite.
    pub fn closest(&self, lon: f64, lat: f64) -> Result<VertexId, StreetMapError> {
        let nearest = self.spatial.nearest(Point::new(lon, lat))?;
        let id = self
            .owners
            .get(&point_key(nearest))
            .copied()
            .ok_or(SpatialIndexError::Empty)?;
        Ok(id)
    }

    /// Returns the display names of locations whose cleaned name starts with
    /// the cleaned `prefix`, ordered by cleaned name.
    ///
    /// Distinct display names that clean to the same string are reported
    /// once, using the name of the earliest added node that carries one.
    /// Later nodes never replace it, so the reported spelling depends on node
    /// insertion order rather than on the order names were assigned. Use
    /// [`Navigator::locations`] to see every spelling.
    #[must_use]
    pub fn locations_by_prefix(&self, prefix: &str) -> Vec<String> {
        self.names
            .keys_with_prefix(&clean_name(prefix))
            .into_iter()
            .filter_map(|cleaned| self.display_names.get(&cleaned).cloned())
            .collect()
    }

    /// Returns every location whose cleaned name equals the cleaned `name`,
    /// in map insertion order.
    #[must_use]
    pub fn locations(&self, name: &str) -> Vec<Location> {
        self.locations
            .get(&clean_name(name))
            .cloned()
            .unwrap_or_default()
    }

    /// Snaps both positions to their closest routable vertices and searches
    /// for a route between them.
    ///
    /// # Errors
    /// Returns [`StreetMapError::Spatial`] when either position cannot be
    /// snapped and [`StreetMapError::Search`] when the search rejects the
    /// graph.
    #[instrument(name = "navigator.route", err, skip(self))]
    pub fn route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Result<SearchReport<VertexId>, StreetMapError> {
        let start = self.closest(from.0, from.1)?;
        let goal = self.closest(to.0, to.1)?;
        debug!(start, goal, "positions snapped to vertices");
        Ok(solve(&self.map, start, goal, self.timeout)?)
    }
}

/// Hashable identity of a point; negative zero is folded into zero so it
/// matches the KD-tree's notion of equality.
fn point_key(point: Point) -> (u64, u64) {
    ((point.x() + 0.0).to_bits(), (point.y() + 0.0).to_bits())
}
