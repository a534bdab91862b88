//! The route orchestrator.
//!
//! Requests are answered with a *reverse* search: the wave is seeded at the
//! destination and grows until it reaches the origin. Because the wave does
//! not depend on the origin, every later request toward the same
//! destination (same agent class, same tick) can reuse it: either the origin
//! was already finalised and the path is read straight off the grid, or the
//! wave is re-aimed at the new origin and continued.
//!
//! When the destination cannot be reached from the origin, a forward search
//! from the origin finds the reachable tile nearest to the destination.

use std::rc::Rc;

use tilenav_core::{Point, TileShift};

use crate::PathError;
use crate::agent::{AgentClass, BlockingKey};
use crate::area::NonblockingArea;
use crate::blocking::{BlockingMap, BlockingMapCache};
use crate::cache::{Acquired, ContextCache};
use crate::config::PathConfig;
use crate::context::{ContextId, SearchContext};
use crate::explore::{explore, seed};
use crate::goal::NearestPoint;
use crate::layer::TileCostLayer;
use crate::trace::trace;
use crate::traits::Terrain;

/// A request to move an agent between two world positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// World position of the agent.
    pub origin: Point,
    /// World position to reach.
    pub destination: Point,
    pub class: AgentClass,
    /// Tiles that never block, usually the target structure's footprint.
    pub ignore: NonblockingArea,
}

impl RouteRequest {
    pub fn new(origin: Point, destination: Point, class: AgentClass) -> Self {
        Self {
            origin,
            destination,
            class,
            ignore: NonblockingArea::NONE,
        }
    }

    /// Set the nonblocking area (builder).
    pub fn with_ignore(mut self, area: NonblockingArea) -> Self {
        self.ignore = area;
        self
    }
}

/// How well a route answers its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteStatus {
    /// The route ends exactly at the requested destination.
    Ok,
    /// The destination is unreachable; the route ends at the reachable tile
    /// closest to it.
    Nearest,
    /// No route could be produced.
    Failed,
}

/// Waypoints in world coordinates, origin first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    pub waypoints: Vec<Point>,
    pub status: RouteStatus,
    /// Where the agent ends up: the requested destination on
    /// [`RouteStatus::Ok`], the last waypoint otherwise.
    pub destination: Point,
}

impl RouteResult {
    /// An empty route that leaves the agent at `origin`.
    pub fn failed(origin: Point) -> Self {
        Self {
            waypoints: Vec::new(),
            status: RouteStatus::Failed,
            destination: origin,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.waypoints.last().copied()
    }
}

/// Which path through the orchestrator answered a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// A cached reverse wave had already finalised the origin.
    Solved,
    /// A cached reverse wave was re-aimed at the origin and continued.
    Resumed,
    /// A new reverse wave was seeded at the destination.
    Fresh,
    /// The reverse wave could not reach the origin; a forward search found
    /// the best reachable endpoint.
    Fallback,
}

/// A route together with how it was computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    pub result: RouteResult,
    /// The context the waypoints were traced from.
    pub context: ContextId,
    pub resolution: Resolution,
    /// Open-set size of that context after the request.
    pub open_len: usize,
    /// Nodes popped while answering this request.
    pub tiles_explored: usize,
}

/// Cache counters since the [`PathFinder`] was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStats {
    /// Contexts (re)assigned for a new search.
    pub contexts_built: u64,
    /// Requests answered by continuing or reading a cached context.
    pub contexts_reused: u64,
    /// Assignments that overwrote the least recently used context.
    pub contexts_evicted: u64,
    pub maps_built: u64,
}

impl PathStats {
    fn record(&mut self, how: Acquired) {
        self.contexts_built += 1;
        if how == Acquired::Evicted {
            self.contexts_evicted += 1;
        }
    }
}

struct Routed {
    resolution: Resolution,
    reached: bool,
    waypoints: Vec<Point>,
    context: ContextId,
    open_len: usize,
    tiles_explored: usize,
}

/// Path-finding service owning the blocking-map cache and the search
/// contexts.
///
/// ```
/// use tilenav_core::{Point, TileShift};
/// use tilenav_paths::{
///     AgentClass, MoveType, PathFinder, Propulsion, RouteRequest, RouteStatus, Terrain,
/// };
///
/// struct Field;
///
/// impl Terrain for Field {
///     fn size(&self) -> Point {
///         Point::new(8, 8)
///     }
///     fn is_base_blocking(&self, tile: Point, _: Propulsion, _: u8, _: MoveType) -> bool {
///         tile.x == 4 && tile.y < 7
///     }
///     fn is_human_player(&self, _: u8) -> bool {
///         true
///     }
/// }
///
/// let shift = TileShift::DEFAULT;
/// let class = AgentClass::new(Propulsion::Wheeled, 0, MoveType::Move);
/// let request = RouteRequest::new(
///     shift.tile_center(Point::new(1, 1)),
///     shift.tile_center(Point::new(6, 1)),
///     class,
/// );
/// let mut finder = PathFinder::default();
/// let route = finder.route(&Field, 0, &request);
/// assert_eq!(route.status, RouteStatus::Ok);
/// assert_eq!(route.last(), Some(request.destination));
/// ```
#[derive(Debug)]
pub struct PathFinder {
    config: PathConfig,
    maps: BlockingMapCache,
    contexts: ContextCache,
    stats: PathStats,
    next_id: u64,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(PathConfig::default())
    }
}

impl PathFinder {
    pub fn new(config: PathConfig) -> Self {
        Self {
            config,
            maps: BlockingMapCache::new(),
            contexts: ContextCache::new(config.effective_capacity()),
            stats: PathStats::default(),
            next_id: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    pub fn stats(&self) -> PathStats {
        PathStats {
            maps_built: self.maps.built(),
            ..self.stats
        }
    }

    /// Number of search contexts currently cached.
    #[inline]
    pub fn live_contexts(&self) -> usize {
        self.contexts.len()
    }

    /// Drop every cached map and context.
    pub fn clear(&mut self) {
        self.maps.clear();
        self.contexts.clear();
    }

    /// Route `request` during tick `game_time`, turning errors into a
    /// [`RouteStatus::Failed`] result.
    pub fn route<T: Terrain>(
        &mut self,
        terrain: &T,
        game_time: u32,
        request: &RouteRequest,
    ) -> RouteResult {
        match self.try_route(terrain, game_time, request) {
            Ok(outcome) => outcome.result,
            Err(err) => {
                log::warn!(
                    "route {} -> {} failed: {err}",
                    request.origin,
                    request.destination
                );
                RouteResult::failed(request.origin)
            }
        }
    }

    /// Route `request` during tick `game_time`.
    ///
    /// Maps built for an earlier tick are discarded, and with them every
    /// context explored over them.
    pub fn try_route<T: Terrain>(
        &mut self,
        terrain: &T,
        game_time: u32,
        request: &RouteRequest,
    ) -> Result<RouteOutcome, PathError> {
        let shift = self.config.tile_shift;
        let map = self
            .maps
            .get_or_build(terrain, BlockingKey::new(game_time, request.class))?;

        let origin = shift.to_tile(request.origin);
        let dest = shift.to_tile(request.destination);
        if !map.bounds().contains(origin) {
            return Err(PathError::OffMap {
                pos: request.origin,
            });
        }
        if !map.bounds().contains(dest) {
            return Err(PathError::OffMap {
                pos: request.destination,
            });
        }
        if map.is_blocked(origin) {
            log::debug!("origin tile {origin} is blocked");
        }

        let area = request.ignore;
        let reverse = if !area.is_nonblocking(dest) && map.is_blocked(dest) {
            log::debug!("destination tile {dest} is blocked, searching from {origin}");
            None
        } else {
            self.search_reverse(&map, origin, dest, area)?
        };
        let routed = match reverse {
            Some(routed) => routed,
            None => self.search_forward(&map, origin, dest, area)?,
        };

        let mut waypoints = routed.waypoints;
        let status = if routed.reached {
            if let Some(last) = waypoints.last_mut() {
                *last = request.destination;
            }
            RouteStatus::Ok
        } else {
            RouteStatus::Nearest
        };
        let destination = waypoints.last().copied().unwrap_or(request.origin);
        if status == RouteStatus::Nearest {
            log::debug!("no path {origin} -> {dest}, stopping at {destination}");
        }

        Ok(RouteOutcome {
            result: RouteResult {
                waypoints,
                status,
                destination,
            },
            context: routed.context,
            resolution: routed.resolution,
            open_len: routed.open_len,
            tiles_explored: routed.tiles_explored,
        })
    }

    fn next_context_id(&mut self) -> ContextId {
        self.next_id += 1;
        ContextId(self.next_id)
    }

    /// Answer from a wave seeded at `dest`. `None` when the wave cannot
    /// reach `origin`.
    fn search_reverse(
        &mut self,
        map: &Rc<BlockingMap>,
        origin: Point,
        dest: Point,
        area: NonblockingArea,
    ) -> Result<Option<Routed>, PathError> {
        let shift = self.config.tile_shift;
        let layer = TileCostLayer::new(map, area);
        let mut goal = NearestPoint::new(origin);

        if let Some(ctx) = self.contexts.touch(map, dest, area, true) {
            let (resolution, tiles_explored) = if ctx.is_visited(origin) {
                (Resolution::Solved, 0)
            } else if ctx.open_len() == 0 {
                log::debug!("{} already collapsed without reaching {origin}", ctx.id());
                return Ok(None);
            } else {
                ctx.reestimate(&goal);
                let report = explore(ctx, &mut goal, &layer);
                if !report.success {
                    log::debug!("{} collapsed without reaching {origin}", ctx.id());
                    return Ok(None);
                }
                (Resolution::Resumed, report.tiles_explored)
            };
            self.stats.contexts_reused += 1;
            let waypoints = trace(ctx, shift, origin, dest)?;
            return Ok(Some(Routed {
                resolution,
                reached: true,
                waypoints,
                context: ctx.id(),
                open_len: ctx.open_len(),
                tiles_explored,
            }));
        }

        let id = self.next_context_id();
        let (ctx, how) = self.contexts.acquire(id, map, dest, area, true);
        self.stats.record(how);
        log::debug!("{id} seeded at {dest} ({how:?})");
        seed(ctx, &goal, &layer);
        let report = explore(ctx, &mut goal, &layer);
        if !report.success {
            log::debug!("{id} collapsed without reaching {origin}");
            return Ok(None);
        }
        let waypoints = trace(ctx, shift, origin, dest)?;
        Ok(Some(Routed {
            resolution: Resolution::Fresh,
            reached: true,
            waypoints,
            context: id,
            open_len: ctx.open_len(),
            tiles_explored: report.tiles_explored,
        }))
    }

    /// Answer from a wave seeded at `origin`, ending at the tile nearest to
    /// `dest` that the wave could reach.
    fn search_forward(
        &mut self,
        map: &Rc<BlockingMap>,
        origin: Point,
        dest: Point,
        area: NonblockingArea,
    ) -> Result<Routed, PathError> {
        let shift = self.config.tile_shift;
        let layer = TileCostLayer::new(map, area);
        let mut goal = NearestPoint::new(dest);

        if let Some(ctx) = self.contexts.touch(map, origin, area, false) {
            let (reached, tiles_explored) = if ctx.is_visited(dest) {
                (true, 0)
            } else if ctx.open_len() == 0 {
                (false, 0)
            } else {
                ctx.reestimate(&goal);
                let report = explore(ctx, &mut goal, &layer);
                (report.success, report.tiles_explored)
            };
            self.stats.contexts_reused += 1;
            log::debug!("{} reused from {origin} toward {dest}", ctx.id());
            return forward_route(ctx, shift, origin, dest, reached, tiles_explored);
        }

        let id = self.next_context_id();
        let (ctx, how) = self.contexts.acquire(id, map, origin, area, false);
        self.stats.record(how);
        log::debug!("{id} seeded at {origin} toward {dest} ({how:?})");
        seed(ctx, &goal, &layer);
        let report = explore(ctx, &mut goal, &layer);
        forward_route(
            ctx,
            shift,
            origin,
            dest,
            report.success,
            report.tiles_explored,
        )
    }
}

/// Trace a forward wave back from `dest`, or from the finalised tile closest
/// to it when the wave never got there, and return the waypoints origin
/// first.
fn forward_route(
    ctx: &SearchContext,
    shift: TileShift,
    origin: Point,
    dest: Point,
    reached: bool,
    tiles_explored: usize,
) -> Result<Routed, PathError> {
    let end = if reached {
        dest
    } else {
        ctx.nearest_visited(dest).unwrap_or(origin)
    };
    let mut waypoints = trace(ctx, shift, end, origin)?;
    waypoints.reverse();
    Ok(Routed {
        resolution: Resolution::Fallback,
        reached,
        waypoints,
        context: ctx.id(),
        open_len: ctx.open_len(),
        tiles_explored,
    })
}
