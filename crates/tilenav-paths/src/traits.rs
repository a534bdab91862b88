use tilenav_core::Point;

use crate::agent::{MoveType, Propulsion};
use crate::context::{Cost, SearchNode};

/// The map a [`PathFinder`](crate::PathFinder) routes over.
///
/// This is the only way the engine learns about the world: map size,
/// base walkability per agent class, threat data, and which owners are
/// human players.
pub trait Terrain {
    /// Map size in tiles.
    fn size(&self) -> Point;

    /// Whether `tile` is impassable for the given agent class.
    fn is_base_blocking(
        &self,
        tile: Point,
        propulsion: Propulsion,
        owner: u8,
        move_type: MoveType,
    ) -> bool;

    /// Whether `owner` considers `tile` threatened. Threatened tiles are
    /// passable but cost more to cross.
    fn is_threatened(&self, _tile: Point, _owner: u8) -> bool {
        false
    }

    /// Whether `owner` is controlled by a human. Human-controlled agents
    /// ignore threat data.
    fn is_human_player(&self, owner: u8) -> bool;
}

/// Goal test and heuristic driving one exploration.
pub trait Goal {
    /// Called for every tile as it is finalised. Return `true` to stop.
    fn is_goal(&mut self, node: &SearchNode) -> bool;

    /// Heuristic estimate of the remaining cost from `tile`.
    fn estimate(&self, tile: Point) -> Cost;
}

/// Per-tile blocking and cost lookup used by the wave propagation.
pub trait CostLayer {
    /// Multiplier applied to the cost of entering `tile`.
    fn cost(&self, tile: Point) -> Cost;

    /// Whether `tile` cannot be entered. Off-map tiles are blocking.
    fn is_blocked(&self, tile: Point) -> bool;

    /// Whether `tile` is exempt from blocking for this search.
    fn is_nonblocking(&self, tile: Point) -> bool;
}
