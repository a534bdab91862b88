//! Route finding for agents on a tile map.
//!
//! The engine answers "how does this agent get from here to there" for many
//! agents per simulation tick, with results that are bit-for-bit identical
//! on every host:
//!
//! - **Blocking maps** ([`BlockingMapCache`]) rasterise walkability once per
//!   tick and agent class; equivalent classes share a map.
//! - **Search contexts** ([`SearchContext`]) hold an explored-tile grid that
//!   resets in O(1) through generation stamps.
//! - **Wave propagation** ([`explore`]) is an integer A* over 8-connected
//!   tiles with funnel interpolation between adjacent approach directions.
//! - **Tracing** ([`trace`]) turns back-pointers into world waypoints that
//!   keep clear of blocking corners.
//! - **Orchestration** ([`PathFinder`]) seeds searches at the destination
//!   and keeps the most recently used contexts so that agents heading to the
//!   same place share exploration work.
//!
//! # Trait seams
//!
//! | Trait | Implemented by |
//! |---|---|
//! | [`Terrain`] | the embedding simulation |
//! | [`Goal`] | [`NearestPoint`] |
//! | [`CostLayer`] | [`TileCostLayer`] |

mod agent;
mod area;
mod bitmap;
mod blocking;
mod cache;
mod config;
mod context;
mod distance;
mod error;
mod explore;
mod goal;
mod layer;
mod neighbors;
mod route;
mod trace;
mod traits;

#[cfg(test)]
mod test_support;

pub use agent::{AgentClass, BlockingKey, Domain, MoveType, Propulsion};
pub use area::NonblockingArea;
pub use bitmap::Bitmap;
pub use blocking::{BlockingMap, BlockingMapCache};
pub use config::PathConfig;
pub use context::{ContextId, Cost, ExploredTile, SearchContext, SearchNode};
pub use distance::{DANGER_FACTOR, DIAGONAL_COST, ORTHOGONAL_COST, chebyshev, euclidean, octile};
pub use error::PathError;
pub use explore::{ExplorationReport, explore, relax, seed};
pub use goal::NearestPoint;
pub use layer::TileCostLayer;
pub use route::{
    PathFinder, PathStats, Resolution, RouteOutcome, RouteRequest, RouteResult, RouteStatus,
};
pub use trace::trace;
pub use traits::{CostLayer, Goal, Terrain};
