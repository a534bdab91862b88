//! Turning an explored grid back into world-space waypoints.

use std::rc::Rc;

use tilenav_core::{Point, TileShift};

use crate::PathError;
use crate::context::SearchContext;
use crate::layer::TileCostLayer;
use crate::traits::CostLayer;

/// Follow back-pointers from tile `from` until tile `to` is reached or the
/// walk stops moving.
///
/// The walk starts at the centre of `from`. Every step moves against the
/// current tile's back-pointer; when the new point overhangs the half of its
/// tile next to a blocking neighbour, that coordinate is pulled back to the
/// tile centre so the path keeps clear of the obstacle.
pub fn trace(
    ctx: &SearchContext,
    shift: TileShift,
    from: Point,
    to: Point,
) -> Result<Vec<Point>, PathError> {
    let map = Rc::clone(ctx.blocking_map());
    let layer = TileCostLayer::new(&map, ctx.area());
    let limit = ctx.width() as usize * ctx.height() as usize;
    let scale = shift.units();
    let half = shift.half();

    let mut path = Vec::new();
    let mut p = shift.tile_center(from);
    loop {
        let tile = shift.to_tile(p);
        if ctx.idx(tile).is_none() {
            return Err(PathError::OffMap { pos: p });
        }
        if path.len() >= limit {
            return Err(PathError::TraceLoop { steps: path.len() });
        }
        path.push(p);

        let explored = ctx.explored(tile).ok_or(PathError::StaleTile { tile })?;
        let mut next = p - explored.delta() * scale / 64;
        let next_tile = shift.to_tile(next);
        let corner = shift.to_world(next_tile);
        let x_side = if next.x - corner.x > half { 1 } else { -1 };
        let y_side = if next.y - corner.y > half { 1 } else { -1 };
        if layer.is_blocked(next_tile.shift(x_side, 0)) {
            next.x = corner.x + half;
        }
        if layer.is_blocked(next_tile.shift(0, y_side)) {
            next.y = corner.y + half;
        }

        if tile == to || next == p {
            break;
        }
        p = next;
    }
    Ok(path)
}
