use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D point in scene units. The y axis points up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Linear interpolation between two points.
    pub fn lerp(&self, other: &Point2D, t: f64) -> Point2D {
        Point2D {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        self.lerp(other, 0.5)
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2D) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Point2D {
    type Output = Point2D;
    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;
    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point2D {
    type Output = Point2D;
    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size2D {
    pub width: f64,
    pub height: f64,
}

impl Size2D {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// True when both dimensions are zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Compute the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0.0 {
            return 0.0;
        }
        self.width / self.height
    }
}

impl Default for Size2D {
    fn default() -> Self {
        Self::zero()
    }
}

/// A cardinal or diagonal direction, as a unit step in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// The (unnormalised) direction vector; diagonals have both components set to ±1.
    pub fn vector(self) -> Point2D {
        match self {
            Direction::Up => Point2D::new(0.0, 1.0),
            Direction::Down => Point2D::new(0.0, -1.0),
            Direction::Left => Point2D::new(-1.0, 0.0),
            Direction::Right => Point2D::new(1.0, 0.0),
            Direction::UpLeft => Point2D::new(-1.0, 1.0),
            Direction::UpRight => Point2D::new(1.0, 1.0),
            Direction::DownLeft => Point2D::new(-1.0, -1.0),
            Direction::DownRight => Point2D::new(1.0, -1.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of the given size centred on `center`.
    pub fn from_center(center: Point2D, size: Size2D) -> Self {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        Self {
            min_x: center.x - half_w,
            min_y: center.y - half_h,
            max_x: center.x + half_w,
            max_y: center.y + half_h,
        }
    }

    /// Zero-size bounds at a point.
    pub fn point(at: Point2D) -> Self {
        Self::from_center(at, Size2D::zero())
    }

    /// Smallest bounds containing every point. `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        points
            .into_iter()
            .map(Bounds::point)
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn size(&self) -> Size2D {
        Size2D::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn translate(&self, offset: Point2D) -> Bounds {
        Bounds {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Grow the bounds by `buff` on every side.
    pub fn expand(&self, buff: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - buff,
            min_y: self.min_y - buff,
            max_x: self.max_x + buff,
            max_y: self.max_y + buff,
        }
    }

    /// The point of the box boundary in the given direction: edge midpoints
    /// for cardinal directions, corners for diagonals.
    pub fn edge(&self, direction: Direction) -> Point2D {
        let c = self.center();
        let v = direction.vector();
        Point2D::new(
            c.x + v.x * self.width() / 2.0,
            c.y + v.y * self.height() / 2.0,
        )
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_lerp() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 20.0);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.x - 5.0).abs() < 0.001);
        assert!((mid.y - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_point_ops() {
        let p = Point2D::new(1.0, 2.0) + Point2D::new(0.5, -1.0);
        assert_eq!(p, Point2D::new(1.5, 1.0));
        assert_eq!(p * 2.0, Point2D::new(3.0, 2.0));
        assert_eq!(-p, Point2D::new(-1.5, -1.0));
    }

    #[test]
    fn test_size_aspect_ratio() {
        let s = Size2D::new(16.0, 9.0);
        assert!((s.aspect_ratio() - 16.0 / 9.0).abs() < 0.01);
        assert_eq!(Size2D::new(1.0, 0.0).aspect_ratio(), 0.0);
    }

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::from_center(Point2D::new(1.0, 1.0), Size2D::new(4.0, 2.0));
        assert_eq!(b.edge(Direction::Right), Point2D::new(3.0, 1.0));
        assert_eq!(b.edge(Direction::Up), Point2D::new(1.0, 2.0));
        assert_eq!(b.edge(Direction::DownLeft), Point2D::new(-1.0, 0.0));
    }

    #[test]
    fn test_bounds_from_points() {
        assert!(Bounds::from_points(Vec::new()).is_none());
        let b = Bounds::from_points(vec![Point2D::new(-1.0, 2.0), Point2D::new(3.0, -2.0)])
            .unwrap();
        assert_eq!(b.size(), Size2D::new(4.0, 4.0));
        assert_eq!(b.center(), Point2D::new(1.0, 0.0));
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (-100.0f64..100.0, -100.0f64..100.0, 0.0f64..50.0, 0.0f64..50.0).prop_map(
            |(x, y, w, h)| Bounds::from_center(Point2D::new(x, y), Size2D::new(w, h)),
        )
    }

    proptest! {
        #[test]
        fn union_contains_both(a in bounds_strategy(), b in bounds_strategy()) {
            let u = a.union(&b);
            prop_assert!(u.contains(a.center()));
            prop_assert!(u.contains(b.center()));
            prop_assert!(u.width() >= a.width() && u.width() >= b.width());
        }

        #[test]
        fn union_is_commutative(a in bounds_strategy(), b in bounds_strategy()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
        }
    }
}
