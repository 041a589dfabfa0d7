//! Planar geometry shared by the road graph and the quadtree.
//!
//! Coordinates are treated as a flat plane: `x` is the longitude and `y` the latitude, and
//! distances are plain Euclidean distances in degrees. Over the small area covered by a
//! tiled city map this is close enough to make the A* heuristic and the edge weights agree.

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate on the map. `x` is the longitude, `y` the latitude.
///
/// Equality is exact. Points inside the engine are never `NaN`, which makes `Point` usable
/// as a map key.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// the longitude
    pub x: f64,
    /// the latitude
    pub y: f64,
}

impl Point {
    /// Creates a new Point from a longitude and a latitude.
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// The straight-line distance to `other`.
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use tile_router::Point;
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(3.0, 4.0);
    ///
    /// assert_eq!(a.distance(b), 5.0);
    /// ```
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` if neither coordinate is `NaN` or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // adding 0.0 folds -0.0 into 0.0, so equal points hash equally
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Point {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned geographic rectangle given by its upper-left and lower-right corners.
///
/// Since latitude grows northwards, `upper_left.y > lower_right.y` for any non-empty Extent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent {
    /// the north-west corner
    pub upper_left: Point,
    /// the south-east corner
    pub lower_right: Point,
}

impl Extent {
    /// Creates a new Extent from its corners.
    pub const fn new(upper_left: Point, lower_right: Point) -> Extent {
        Extent {
            upper_left,
            lower_right,
        }
    }

    /// Creates a new Extent from the four bounding coordinates.
    pub const fn from_bounds(ullon: f64, ullat: f64, lrlon: f64, lrlat: f64) -> Extent {
        Extent::new(Point::new(ullon, ullat), Point::new(lrlon, lrlat))
    }

    /// The longitudinal span.
    pub fn width(&self) -> f64 {
        self.lower_right.x - self.upper_left.x
    }

    /// The latitudinal span.
    pub fn height(&self) -> f64 {
        self.upper_left.y - self.lower_right.y
    }

    /// `true` if the Extent has a positive area and finite corners.
    pub fn is_valid(&self) -> bool {
        self.upper_left.is_finite()
            && self.lower_right.is_finite()
            && self.width() > 0.0
            && self.height() > 0.0
    }

    /// Tests if `point` lies within the Extent.
    ///
    /// The left and top edges are part of the Extent, the right and bottom edges are not.
    /// Neighboring Extents therefore never both contain the same point.
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use tile_router::{Extent, Point};
    /// let extent = Extent::from_bounds(0.0, 1.0, 1.0, 0.0);
    ///
    /// assert!(extent.contains(Point::new(0.0, 1.0)));
    /// assert!(!extent.contains(Point::new(1.0, 0.5)));
    /// assert!(!extent.contains(Point::new(0.5, 0.0)));
    /// ```
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.upper_left.x
            && point.x < self.lower_right.x
            && point.y <= self.upper_left.y
            && point.y > self.lower_right.y
    }

    /// `true` if the two Extents share any area.
    pub fn intersects(&self, other: &Extent) -> bool {
        self.upper_left.x < other.lower_right.x
            && other.upper_left.x < self.lower_right.x
            && self.lower_right.y < other.upper_left.y
            && other.lower_right.y < self.upper_left.y
    }

    /// `true` if `other` lies completely within this Extent, edges included.
    pub fn covers(&self, other: &Extent) -> bool {
        self.upper_left.x <= other.upper_left.x
            && self.upper_left.y >= other.upper_left.y
            && self.lower_right.x >= other.lower_right.x
            && self.lower_right.y <= other.lower_right.y
    }

    /// The four quadrants of this Extent in the order upper-left, upper-right, lower-left,
    /// lower-right.
    pub fn quadrants(&self) -> [Extent; 4] {
        let ul = self.upper_left;
        let lr = self.lower_right;
        let mid = Point::new(ul.x + self.width() / 2.0, ul.y - self.height() / 2.0);
        [
            Extent::new(ul, mid),
            Extent::from_bounds(mid.x, ul.y, lr.x, mid.y),
            Extent::from_bounds(ul.x, mid.y, mid.x, lr.y),
            Extent::new(mid, lr),
        ]
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "[{} .. {}]", self.upper_left, self.lower_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants_partition_the_extent() {
        let extent = Extent::from_bounds(-2.0, 2.0, 2.0, -2.0);
        let [one, two, three, four] = extent.quadrants();

        assert_eq!(one, Extent::from_bounds(-2.0, 2.0, 0.0, 0.0));
        assert_eq!(two, Extent::from_bounds(0.0, 2.0, 2.0, 0.0));
        assert_eq!(three, Extent::from_bounds(-2.0, 0.0, 0.0, -2.0));
        assert_eq!(four, Extent::from_bounds(0.0, 0.0, 2.0, -2.0));
    }

    #[test]
    fn center_belongs_to_exactly_one_quadrant() {
        let extent = Extent::from_bounds(-2.0, 2.0, 2.0, -2.0);
        let center = Point::new(0.0, 0.0);
        let owners: Vec<usize> = extent
            .quadrants()
            .iter()
            .enumerate()
            .filter(|(_, q)| q.contains(center))
            .map(|(i, _)| i)
            .collect();

        // the center is on the closed top-left corner of the lower-right quadrant only
        assert_eq!(owners, vec![3]);
    }

    #[test]
    fn negative_zero_hashes_like_zero() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |p: Point| {
            let mut hasher = DefaultHasher::new();
            p.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(Point::new(-0.0, 1.0), Point::new(0.0, 1.0));
        assert_eq!(hash(Point::new(-0.0, 1.0)), hash(Point::new(0.0, 1.0)));
    }

    #[test]
    fn intersection_and_cover() {
        let a = Extent::from_bounds(0.0, 2.0, 2.0, 0.0);
        let b = Extent::from_bounds(1.0, 3.0, 3.0, 1.0);
        let c = Extent::from_bounds(2.0, 2.0, 3.0, 0.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.covers(&Extent::from_bounds(0.5, 1.5, 1.5, 0.5)));
        assert!(!a.covers(&b));
    }
}
