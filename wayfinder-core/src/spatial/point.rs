//! Planar points and the axes a KD-tree splits on.

use std::fmt;

/// A point in the plane.
///
/// The street map stores vertices as `Point::new(lon, lat)`, treating degrees
/// as planar coordinates for the nearest-vertex lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x(&self) -> f64 { self.x }

    /// Returns the y coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y(&self) -> f64 { self.y }

    /// Returns whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the squared Euclidean distance to `other`.
    ///
    /// # Examples
    /// ```
    /// use wayfinder_core::Point;
    ///
    /// let origin = Point::new(0.0, 0.0);
    /// assert_eq!(origin.distance_squared(&Point::new(3.0, 4.0)), 25.0);
    /// ```
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Returns the Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Returns the coordinate selected by `axis`.
    #[must_use]
    pub const fn coordinate(&self, axis: SplitAxis) -> f64 {
        match axis {
            SplitAxis::X => self.x,
            SplitAxis::Y => self.y,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis a KD-tree node partitions its subtrees on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SplitAxis {
    /// Partition on the x coordinate.
    X,
    /// Partition on the y coordinate.
    Y,
}

impl SplitAxis {
    /// Returns the axis used one level further down the tree.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}
