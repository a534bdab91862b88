use tilenav_core::Point;

use crate::context::{Cost, SearchNode};
use crate::distance::euclidean;
use crate::traits::Goal;

/// Goal that succeeds on one target tile and otherwise remembers the
/// finalised tile closest to it.
///
/// Closeness is the Euclidean heuristic, so the fallback endpoint is the
/// tile nearest the target as the crow flies, not the cheapest to reach.
#[derive(Debug, Clone)]
pub struct NearestPoint {
    target: Point,
    nearest: Option<Point>,
    nearest_dist: Cost,
}

impl NearestPoint {
    pub fn new(target: Point) -> Self {
        Self {
            target,
            nearest: None,
            nearest_dist: Cost::MAX,
        }
    }

    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    /// Closest tile seen so far; equals [`target`](Self::target) after a
    /// successful search.
    #[inline]
    pub fn nearest(&self) -> Option<Point> {
        self.nearest
    }

    /// Forget the closest tile.
    pub fn clear(&mut self) {
        self.nearest = None;
        self.nearest_dist = Cost::MAX;
    }
}

impl Goal for NearestPoint {
    fn is_goal(&mut self, node: &SearchNode) -> bool {
        if node.pos == self.target {
            self.nearest = Some(node.pos);
            self.nearest_dist = 0;
            return true;
        }
        let remaining = node.remaining();
        if remaining < self.nearest_dist {
            self.nearest = Some(node.pos);
            self.nearest_dist = remaining;
        }
        false
    }

    #[inline]
    fn estimate(&self, tile: Point) -> Cost {
        euclidean(tile, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, y: i32, goal: &NearestPoint, dist: Cost) -> SearchNode {
        let pos = Point::new(x, y);
        SearchNode {
            pos,
            dist,
            est: dist + goal.estimate(pos),
        }
    }

    #[test]
    fn tracks_strictly_closer_tiles() {
        let mut g = NearestPoint::new(Point::new(5, 0));
        assert_eq!(g.nearest(), None);
        assert!(!g.is_goal(&node(0, 0, &g, 0)));
        assert_eq!(g.nearest(), Some(Point::new(0, 0)));
        assert!(!g.is_goal(&node(2, 0, &g, 280)));
        // Same remaining distance: the first one seen stays.
        assert!(!g.is_goal(&node(3, 2, &g, 500)));
        assert!(!g.is_goal(&node(3, -2, &g, 500)));
        assert_eq!(g.nearest(), Some(Point::new(3, 2)));
        // Farther tiles don't replace it.
        assert!(!g.is_goal(&node(1, 0, &g, 140)));
        assert_eq!(g.nearest(), Some(Point::new(3, 2)));
    }

    #[test]
    fn target_fires_and_clear_resets() {
        let mut g = NearestPoint::new(Point::new(1, 1));
        assert!(g.is_goal(&node(1, 1, &g, 900)));
        assert_eq!(g.nearest(), Some(g.target()));
        g.clear();
        assert_eq!(g.nearest(), None);
    }
}
