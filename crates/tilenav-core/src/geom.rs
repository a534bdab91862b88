//! Integer points and half-open rectangles.
//!
//! The same [`Point`] type carries tile coordinates and world coordinates;
//! a [`TileShift`](crate::TileShift) converts between the two.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Integer 2D coordinates, X to the right and Y downward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point moved by `(dx, dy)`.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Ord for Point {
    /// Row-major order, the order tiles are stored in.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.shift(rhs.x, rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.shift(-rhs.x, -rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, k: i32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

/// Per-axis division, rounding toward zero like `i32` division.
impl Div<i32> for Point {
    type Output = Self;

    #[inline]
    fn div(self, k: i32) -> Self {
        Self::new(self.x / k, self.y / k)
    }
}

/// Rectangle of tiles with inclusive `min` and exclusive `max`.
///
/// Every empty range equals every other empty range.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Rectangle spanned by two corners, given in any order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// `size.x` by `size.y` tiles with top-left corner `min`.
    #[inline]
    pub fn with_size(min: Point, size: Point) -> Self {
        Self::new(min.x, min.y, min.x + size.x, min.y + size.y)
    }

    #[inline]
    pub fn size(self) -> Point {
        self.max - self.min
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Number of tiles covered.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let size = self.size();
        size.x as usize * size.y as usize
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Every point of the range in row-major order.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
            len: self.len(),
        }
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }
        self.min == other.min && self.max == other.max
    }
}

impl Eq for Range {}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Row-major iterator returned by [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
    len: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.len {
            return None;
        }
        let w = self.range.size().x as usize;
        let p = self
            .range
            .min
            .shift((self.next % w) as i32, (self.next / w) as i32);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a * 3, Point::new(3, 6));
        assert_eq!(Point::new(-7, 7) / 2, Point::new(-3, 3));
    }

    #[test]
    fn row_major_order() {
        assert!(Point::new(5, 0) < Point::new(0, 1));
        assert!(Point::new(0, 1) < Point::new(1, 1));
    }

    #[test]
    fn half_open_containment() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!((r.min, r.max), (Point::ZERO, Point::new(3, 2)));
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, -1)));
        let sized = Range::with_size(Point::new(4, 5), Point::new(2, 3));
        assert_eq!(sized, Range::new(4, 5, 6, 8));
    }

    #[test]
    fn iterates_row_by_row() {
        let r = Range::new(1, 1, 3, 3);
        let pts: Vec<_> = r.iter().collect();
        let expected = [(1, 1), (2, 1), (1, 2), (2, 2)].map(|(x, y)| Point::new(x, y));
        assert_eq!(pts, expected);
        assert_eq!(r.iter().len(), 4);
        assert_eq!(Range::default().iter().count(), 0);
    }

    #[test]
    fn empty_ranges_are_equal() {
        let flat = Range::new(5, 5, 9, 5);
        assert!(flat.is_empty());
        assert_eq!(flat, Range::default());
        assert_ne!(Range::default(), Range::new(0, 0, 1, 1));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn range_round_trip() {
        let r = Range::new(1, 2, 10, 20);
        let json = serde_json::to_string(&r).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
