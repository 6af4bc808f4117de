//! Two-dimensional KD-tree with pruned nearest-neighbour search.

use tracing::{debug, instrument};

use super::point::{Point, SplitAxis};
use crate::error::SpatialIndexError;

#[derive(Debug)]
struct Node {
    point: Point,
    axis: SplitAxis,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    const fn new(point: Point, axis: SplitAxis) -> Self {
        Self {
            point,
            axis,
            left: None,
            right: None,
        }
    }

    /// Returns whether `point` belongs in the left subtree of this node.
    fn goes_left(&self, point: &Point) -> bool {
        point.coordinate(self.axis) < self.point.coordinate(self.axis)
    }
}

/// Binary space-partitioning tree over planar points.
///
/// The root splits on x and the axis alternates with depth. Points strictly
/// below a node's coordinate on its axis live in the left subtree; all others,
/// ties included, live in the right subtree. Exact duplicates are stored once.
///
/// # Examples
/// ```
/// use wayfinder_core::{KdTree, Point};
///
/// let tree = KdTree::from_points([
///     Point::new(2.0, 3.0),
///     Point::new(4.0, 2.0),
///     Point::new(4.0, 5.0),
///     Point::new(3.0, 3.0),
///     Point::new(1.0, 5.0),
///     Point::new(4.0, 4.0),
/// ])?;
/// assert_eq!(tree.nearest(Point::new(0.0, 7.0))?, Point::new(1.0, 5.0));
/// # Ok::<(), wayfinder_core::SpatialIndexError>(())
/// ```
#[derive(Debug, Default)]
pub struct KdTree {
    root: Option<Box<Node>>,
    len: usize,
}

impl KdTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a tree by inserting `points` in iteration order.
    ///
    /// # Errors
    /// Returns [`SpatialIndexError::NonFiniteCoordinate`] for the first point
    /// carrying a NaN or infinite coordinate.
    #[instrument(name = "kdtree.build", err, skip(points), fields(points = tracing::field::Empty))]
    pub fn from_points<I>(points: I) -> Result<Self, SpatialIndexError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tree = Self::new();
        for point in points {
            tree.insert(point)?;
        }
        tracing::Span::current().record("points", tree.len);
        debug!(len = tree.len, depth = tree.depth(), "kd-tree built");
        Ok(tree)
    }

    /// Returns the number of distinct points stored.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.len }

    /// Returns whether the tree holds no points.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// Inserts `point`, returning `false` when an equal point is already
    /// stored.
    ///
    /// # Errors
    /// Returns [`SpatialIndexError::NonFiniteCoordinate`] when either
    /// coordinate is NaN or infinite; the tree is left unchanged.
    pub fn insert(&mut self, point: Point) -> Result<bool, SpatialIndexError> {
        ensure_finite(&point)?;

        let mut axis = SplitAxis::X;
        let mut link = &mut self.root;
        while let Some(node) = link {
            if node.point == point {
                return Ok(false);
            }
            axis = node.axis.next();
            link = if node.goes_left(&point) {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(Node::new(point, axis)));
        self.len += 1;
        Ok(true)
    }

    /// Returns the stored point closest to `query` by Euclidean distance.
    ///
    /// The good side of every split is searched first; the other side is
    /// visited only when the splitting line lies closer than the best
    /// candidate so far. On equal distances the first candidate reached keeps
    /// its place.
    ///
    /// # Errors
    /// Returns [`SpatialIndexError::Empty`] when the tree has no points and
    /// [`SpatialIndexError::NonFiniteCoordinate`] for a non-finite query.
    pub fn nearest(&self, query: Point) -> Result<Point, SpatialIndexError> {
        ensure_finite(&query)?;
        let root = self.root.as_deref().ok_or(SpatialIndexError::Empty)?;

        let mut best = root.point;
        let mut best_distance = f64::INFINITY;
        // Each entry carries the squared distance from the query to the
        // splitting line that must beat `best_distance` before the subtree is
        // worth visiting. Good children carry negative infinity.
        let mut stack: Vec<(&Node, f64)> = vec![(root, f64::NEG_INFINITY)];
        while let Some((node, bound)) = stack.pop() {
            if bound >= best_distance {
                continue;
            }
            let distance = node.point.distance_squared(&query);
            if distance < best_distance {
                best = node.point;
                best_distance = distance;
            }

            let (good, bad) = if node.goes_left(&query) {
                (node.left.as_deref(), node.right.as_deref())
            } else {
                (node.right.as_deref(), node.left.as_deref())
            };
            if let Some(bad) = bad {
                let offset = query.coordinate(node.axis) - node.point.coordinate(node.axis);
                stack.push((bad, offset * offset));
            }
            if let Some(good) = good {
                stack.push((good, f64::NEG_INFINITY));
            }
        }
        Ok(best)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            let children = [node.left.as_deref(), node.right.as_deref()];
            stack.extend(children.into_iter().flatten().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Returns every stored point in pre-order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            points.push(node.point);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        points
    }
}

impl Drop for KdTree {
    // Unlinks nodes iteratively so a degenerate tree built from sorted input
    // does not recurse once per level while dropping.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

fn ensure_finite(point: &Point) -> Result<(), SpatialIndexError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(SpatialIndexError::NonFiniteCoordinate {
            x: point.x(),
            y: point.y(),
        })
    }
}
