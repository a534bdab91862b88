//! Wave propagation: an A* variant over 8-connected tiles.
//!
//! The wave expands from a context's seed in order of estimated total cost.
//! Each tile remembers the direction it was reached from; when a tile is
//! reached from two adjacent sources whose directions differ by one step,
//! the true shortest approach lies between them and the distance and
//! direction are interpolated instead of snapping to tile centres.

use tilenav_core::Point;

use crate::context::{Cost, ExploredTile, SearchContext, SearchNode};
use crate::distance::{DIAGONAL_COST, GRADIENT_Y, ORTHOGONAL_COST, octile};
use crate::neighbors::{DIR_OFFSETS, flanks, is_diagonal};
use crate::traits::{CostLayer, Goal};

/// One tile in back-pointer units.
const TILE_DELTA: i32 = 64;

/// Summary of one [`explore`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplorationReport {
    /// The goal fired before the open set ran out.
    pub success: bool,
    /// Nodes popped, including stale duplicates.
    pub tiles_explored: usize,
    /// Distance of the last node popped.
    pub cost: Cost,
}

/// Offer `pos`, reached from the adjacent `prev_pos` at `prev_dist`, to the
/// context.
///
/// Returns `true` if the tile's record improved and the node was queued.
pub fn relax<G: Goal, L: CostLayer>(
    ctx: &mut SearchContext,
    goal: &G,
    layer: &L,
    pos: Point,
    prev_dist: Cost,
    prev_pos: Point,
) -> bool {
    let Some(idx) = ctx.idx(pos) else {
        return false;
    };

    let factor = layer.cost(pos);
    let mut dist = prev_dist + octile(prev_pos, pos) * factor;
    let mut delta = (pos - prev_pos) * TILE_DELTA;
    let diagonal = delta.x != 0 && delta.y != 0;

    let generation = ctx.generation();
    let tile = &mut ctx.tiles[idx];
    if tile.generation == generation {
        if tile.visited {
            return false;
        }
        // Funnel between the two sources:
        // +---+---+
        // |   | P |
        // +---+---+
        // | A | B |
        // +---+---+
        // A reaches P diagonally, B orthogonally.
        let mut delta_a = delta;
        let mut delta_b = tile.delta();
        let between = delta_a - delta_b;
        if between.x.abs() + between.y.abs() == TILE_DELTA {
            let f = i64::from(factor);
            let (step_new, step_old) = if diagonal {
                (DIAGONAL_COST, ORTHOGONAL_COST)
            } else {
                (ORTHOGONAL_COST, DIAGONAL_COST)
            };
            let mut dist_a = i64::from(dist) - i64::from(step_new) * f;
            let mut dist_b = i64::from(tile.dist) - i64::from(step_old) * f;
            if !diagonal {
                std::mem::swap(&mut dist_a, &mut dist_b);
                std::mem::swap(&mut delta_a, &mut delta_b);
            }
            let gradient_x = (dist_b - dist_a) / f;
            // Beyond 98 the gradient would exceed its perpendicular part.
            if gradient_x > 0 && gradient_x <= 98 {
                let gradient_y = i64::from(GRADIENT_Y[gradient_x as usize]);
                let dist_p = gradient_y * f + dist_b;
                dist = dist_p as Cost;
                let (gx, gy) = (gradient_x as i32, gradient_y as i32);
                delta = (delta_a * gx + delta_b * (gy - gx)) / gy;
            }
        }
        if tile.dist <= dist {
            return false;
        }
    }

    *tile = ExploredTile {
        generation,
        dx: delta.x as i8,
        dy: delta.y as i8,
        dist,
        visited: false,
    };
    ctx.open.push(SearchNode {
        pos,
        dist,
        est: dist + goal.estimate(pos),
    });
    true
}

/// Queue the context's seed tile at distance zero.
pub fn seed<G: Goal, L: CostLayer>(ctx: &mut SearchContext, goal: &G, layer: &L) -> bool {
    let seed = ctx.seed();
    relax(ctx, goal, layer, seed, 0, seed)
}

/// Propagate the wave until `goal` fires or the open set is empty.
///
/// A diagonal step is skipped when both orthogonal tiles flanking it block,
/// unless the current tile or the diagonal target is in the nonblocking
/// area.
pub fn explore<G: Goal, L: CostLayer>(
    ctx: &mut SearchContext,
    goal: &mut G,
    layer: &L,
) -> ExplorationReport {
    let mut report = ExplorationReport::default();
    while let Some(node) = ctx.open.pop() {
        report.tiles_explored += 1;
        report.cost = node.dist;

        let Some(idx) = ctx.idx(node.pos) else {
            continue;
        };
        let generation = ctx.generation();
        let tile = &mut ctx.tiles[idx];
        if tile.generation != generation || tile.visited {
            continue;
        }
        tile.visited = true;

        if goal.is_goal(&node) {
            report.success = true;
            break;
        }

        let mut blocking = [false; 8];
        let mut exempt = [false; 8];
        for (dir, offset) in DIR_OFFSETS.iter().enumerate() {
            let p = node.pos + *offset;
            blocking[dir] = layer.is_blocked(p);
            exempt[dir] = layer.is_nonblocking(p);
        }
        let exempt_center = layer.is_nonblocking(node.pos);

        for dir in 0..DIR_OFFSETS.len() {
            if blocking[dir] {
                continue;
            }
            if is_diagonal(dir) && !exempt_center && !exempt[dir] {
                let (ccw, cw) = flanks(dir);
                if blocking[ccw] && blocking[cw] {
                    continue;
                }
            }
            let next = node.pos + DIR_OFFSETS[dir];
            relax(ctx, &*goal, layer, next, node.dist, node.pos);
        }
    }
    report
}
