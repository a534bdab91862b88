//! Reusable search state: the explored-tile arena and the open set.
//!
//! A [`SearchContext`] keeps one wave propagation alive between route
//! requests. Its explored grid is never cleared on reuse; instead every
//! entry carries the generation it was written in, and [`assign`] bumps the
//! context's generation so that all older entries read as unexplored.
//!
//! [`assign`]: SearchContext::assign

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;

use tilenav_core::Point;

use crate::area::NonblockingArea;
use crate::blocking::BlockingMap;
use crate::distance::euclidean;
use crate::traits::Goal;

/// Path cost in 140-per-tile units.
pub type Cost = u32;

/// Generation value no live context ever uses.
const UNSTAMPED: u16 = u16::MAX;

/// Exploration record for one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExploredTile {
    pub(crate) generation: u16,
    /// Step from the previous tile toward this one, 64 = one tile.
    pub(crate) dx: i8,
    pub(crate) dy: i8,
    pub(crate) dist: Cost,
    /// Finalised: popped from the open set.
    pub(crate) visited: bool,
}

impl ExploredTile {
    /// Back-pointer delta in 1/64 tile units.
    #[inline]
    pub fn delta(&self) -> Point {
        Point::new(i32::from(self.dx), i32::from(self.dy))
    }

    #[inline]
    pub fn dist(&self) -> Cost {
        self.dist
    }
}

impl Default for ExploredTile {
    fn default() -> Self {
        Self {
            generation: UNSTAMPED,
            dx: 0,
            dy: 0,
            dist: 0,
            visited: false,
        }
    }
}

/// An entry in the open set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub pos: Point,
    /// Cost from the seed.
    pub dist: Cost,
    /// `dist` plus the heuristic remainder.
    pub est: Cost,
}

impl SearchNode {
    /// Heuristic remainder to the goal.
    #[inline]
    pub fn remaining(&self) -> Cost {
        self.est.saturating_sub(self.dist)
    }
}

impl Ord for SearchNode {
    /// "Greater" means popped first from the max-heap: lowest `est`, then
    /// highest `dist` (closest to the goal), then lowest row-major position.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .est
            .cmp(&self.est)
            .then(self.dist.cmp(&other.dist))
            .then(other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Stable identity of a context assignment, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub(crate) u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// A reusable wave propagation seeded at one tile over one blocking map.
pub struct SearchContext {
    id: ContextId,
    map: Rc<BlockingMap>,
    map_version: u64,
    game_time: u32,
    seed: Point,
    area: NonblockingArea,
    reverse: bool,
    generation: u16,
    width: i32,
    height: i32,
    pub(crate) tiles: Vec<ExploredTile>,
    pub(crate) open: BinaryHeap<SearchNode>,
}

impl SearchContext {
    /// Create a context and [`assign`](Self::assign) it.
    pub fn new(
        id: ContextId,
        map: Rc<BlockingMap>,
        seed: Point,
        area: NonblockingArea,
        reverse: bool,
    ) -> Self {
        let mut ctx = Self {
            id,
            map_version: map.version(),
            game_time: map.key().game_time,
            width: map.width(),
            height: map.height(),
            map,
            seed,
            area,
            reverse,
            generation: 0,
            tiles: Vec::new(),
            open: BinaryHeap::new(),
        };
        ctx.assign(id, Rc::clone(&ctx.map), seed, area, reverse);
        ctx
    }

    /// Reset the context for a new search.
    ///
    /// Costs O(1) unless the map size changed or the generation counter
    /// wraps, in which case the explored grid is reallocated or cleared.
    pub fn assign(
        &mut self,
        id: ContextId,
        map: Rc<BlockingMap>,
        seed: Point,
        area: NonblockingArea,
        reverse: bool,
    ) {
        self.id = id;
        self.map_version = map.version();
        self.game_time = map.key().game_time;
        self.width = map.width();
        self.height = map.height();
        self.map = map;
        self.seed = seed;
        self.area = area;
        self.reverse = reverse;
        self.open.clear();

        self.generation = self.generation.wrapping_add(1);
        if self.generation == UNSTAMPED {
            // Every generation value may now be present in the grid.
            self.tiles.clear();
            self.generation = 0;
        }
        let len = self.width.max(0) as usize * self.height.max(0) as usize;
        self.tiles.resize(len, ExploredTile::default());
    }

    /// Whether this context was assigned with exactly these parameters.
    ///
    /// The map is compared by version and tick, never by address.
    pub fn matches(
        &self,
        map: &BlockingMap,
        seed: Point,
        area: NonblockingArea,
        reverse: bool,
    ) -> bool {
        self.game_time == map.key().game_time
            && self.map_version == map.version()
            && self.seed == seed
            && self.area == area
            && self.reverse == reverse
    }

    /// Whether `tile` was finalised during the current generation.
    #[inline]
    pub fn is_visited(&self, tile: Point) -> bool {
        self.explored(tile).is_some_and(|t| t.visited)
    }

    /// The tile's record, if it was written during the current generation.
    #[inline]
    pub fn explored(&self, tile: Point) -> Option<&ExploredTile> {
        let t = &self.tiles[self.idx(tile)?];
        (t.generation == self.generation).then_some(t)
    }

    /// The finalised tile closest to `target` by straight-line distance,
    /// first in row-major order on ties.
    pub fn nearest_visited(&self, target: Point) -> Option<Point> {
        let w = self.width.max(1) as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.generation == self.generation && t.visited)
            .map(|(i, _)| Point::new((i % w) as i32, (i / w) as i32))
            .min_by_key(|&p| euclidean(p, target))
    }

    /// Recompute every open node's estimate for a new goal and restore the
    /// heap order.
    pub(crate) fn reestimate<G: Goal>(&mut self, goal: &G) {
        let mut nodes = std::mem::take(&mut self.open).into_vec();
        for node in &mut nodes {
            node.est = node.dist + goal.estimate(node.pos);
        }
        self.open = BinaryHeap::from(nodes);
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    #[inline]
    pub fn id(&self) -> ContextId {
        self.id
    }

    #[inline]
    pub fn blocking_map(&self) -> &Rc<BlockingMap> {
        &self.map
    }

    /// The tile the wave started from.
    #[inline]
    pub fn seed(&self) -> Point {
        self.seed
    }

    #[inline]
    pub fn area(&self) -> NonblockingArea {
        self.area
    }

    /// Whether this context searches from the destination toward origins.
    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    #[inline]
    pub fn generation(&self) -> u16 {
        self.generation
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of nodes waiting in the open set.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    #[cfg(test)]
    pub(crate) fn set_generation(&mut self, generation: u16) {
        self.generation = generation;
    }
}

impl fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext")
            .field("id", &self.id)
            .field("map_version", &self.map_version)
            .field("game_time", &self.game_time)
            .field("seed", &self.seed)
            .field("reverse", &self.reverse)
            .field("generation", &self.generation)
            .field("open", &self.open.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::BlockingKey;
    use crate::blocking::BlockingMapCache;
    use crate::test_support::{AsciiTerrain, ground};

    fn map(cache: &mut BlockingMapCache, t: &AsciiTerrain, time: u32) -> Rc<BlockingMap> {
        cache.get_or_build(t, BlockingKey::new(time, ground())).unwrap()
    }

    fn at_origin(m: &Rc<BlockingMap>, reverse: bool) -> SearchContext {
        SearchContext::new(
            ContextId(1),
            Rc::clone(m),
            Point::ZERO,
            NonblockingArea::NONE,
            reverse,
        )
    }

    fn node(x: i32, dist: Cost, est: Cost) -> SearchNode {
        SearchNode {
            pos: Point::new(x, 0),
            dist,
            est,
        }
    }

    fn stamp(ctx: &mut SearchContext, p: Point) {
        let generation = ctx.generation;
        let i = ctx.idx(p).unwrap();
        ctx.tiles[i] = ExploredTile {
            generation,
            dx: 64,
            dy: 0,
            dist: 140,
            visited: true,
        };
    }

    #[test]
    fn node_order_prefers_low_estimate_then_closer_to_goal() {
        let mut heap = BinaryHeap::new();
        heap.push(node(0, 100, 500));
        heap.push(node(1, 300, 500));
        heap.push(node(2, 0, 400));
        heap.push(node(3, 300, 500));
        let mut order = Vec::new();
        while let Some(n) = heap.pop() {
            order.push(n.pos.x);
        }
        assert_eq!(order, vec![2, 1, 3, 0]);
    }

    #[test]
    fn assign_bumps_generation_and_hides_old_tiles() {
        let t = AsciiTerrain::open(4, 4);
        let mut cache = BlockingMapCache::new();
        let m = map(&mut cache, &t, 1);
        let mut ctx = at_origin(&m, true);
        let g = ctx.generation();
        stamp(&mut ctx, Point::new(2, 2));
        assert!(ctx.is_visited(Point::new(2, 2)));

        ctx.assign(ContextId(2), m, Point::ZERO, NonblockingArea::NONE, true);
        assert_eq!(ctx.generation(), g + 1);
        assert!(!ctx.is_visited(Point::new(2, 2)));
        assert!(ctx.explored(Point::new(2, 2)).is_none());
        // The stale record is still physically present.
        let i = ctx.idx(Point::new(2, 2)).unwrap();
        assert_eq!(ctx.tiles[i].generation, g);
    }

    #[test]
    fn generation_wrap_hard_clears() {
        let t = AsciiTerrain::open(3, 3);
        let mut cache = BlockingMapCache::new();
        let m = map(&mut cache, &t, 1);
        let mut ctx = at_origin(&m, true);
        ctx.set_generation(UNSTAMPED - 1);
        stamp(&mut ctx, Point::new(1, 1));
        ctx.assign(ContextId(2), m, Point::ZERO, NonblockingArea::NONE, true);
        assert_eq!(ctx.generation(), 0);
        assert!(ctx.tiles.iter().all(|t| *t == ExploredTile::default()));
        assert!(!ctx.is_visited(Point::new(1, 1)));
    }

    #[test]
    fn assign_clears_open_set_and_resizes() {
        let small = AsciiTerrain::open(3, 3);
        let big = AsciiTerrain::open(5, 4);
        let mut cache = BlockingMapCache::new();
        let m = map(&mut cache, &small, 1);
        let mut ctx = at_origin(&m, true);
        ctx.open.push(node(0, 0, 0));
        let m2 = map(&mut cache, &big, 2);
        ctx.assign(ContextId(2), m2, Point::ZERO, NonblockingArea::NONE, true);
        assert_eq!(ctx.open_len(), 0);
        assert_eq!(ctx.tiles.len(), 20);
        assert_eq!((ctx.width(), ctx.height()), (5, 4));
    }

    #[test]
    fn matches_requires_every_parameter() {
        let t = AsciiTerrain::open(4, 4);
        let mut cache = BlockingMapCache::new();
        let m = map(&mut cache, &t, 1);
        let seed = Point::new(3, 3);
        let area = NonblockingArea::from_bounds(seed, Point::new(1, 1));
        let ctx = SearchContext::new(ContextId(1), Rc::clone(&m), seed, area, true);
        assert!(ctx.matches(&m, seed, area, true));
        assert!(!ctx.matches(&m, seed, area, false));
        assert!(!ctx.matches(&m, Point::new(2, 3), area, true));
        assert!(!ctx.matches(&m, seed, NonblockingArea::NONE, true));

        // Same class, next tick: a new map version.
        let next = map(&mut cache, &t, 2);
        assert!(!ctx.matches(&next, seed, area, true));
    }

    #[test]
    fn nearest_visited_scans_current_generation() {
        let t = AsciiTerrain::open(5, 5);
        let mut cache = BlockingMapCache::new();
        let m = map(&mut cache, &t, 1);
        let mut ctx = at_origin(&m, false);
        let corner = Point::new(4, 4);
        assert_eq!(ctx.nearest_visited(corner), None);

        stamp(&mut ctx, Point::ZERO);
        stamp(&mut ctx, Point::new(3, 2));
        stamp(&mut ctx, Point::new(2, 3));
        // Equal distance: the row-major first wins.
        assert_eq!(ctx.nearest_visited(corner), Some(Point::new(3, 2)));
        assert_eq!(ctx.nearest_visited(Point::new(0, 1)), Some(Point::ZERO));

        ctx.assign(ContextId(2), m, Point::ZERO, NonblockingArea::NONE, false);
        assert_eq!(ctx.nearest_visited(corner), None);
    }

    #[test]
    fn out_of_range_tiles_are_never_visited() {
        let t = AsciiTerrain::open(2, 2);
        let mut cache = BlockingMapCache::new();
        let ctx = at_origin(&map(&mut cache, &t, 1), true);
        assert!(!ctx.is_visited(Point::new(-1, 0)));
        assert!(!ctx.is_visited(Point::new(2, 0)));
    }
}
