//! Integer cost model.
//!
//! Orthogonal steps cost 140 and diagonal steps 198 (198/140 ≈ √2). Every
//! cost is an exact integer so that separate hosts running the same
//! simulation derive identical paths.

use tilenav_core::Point;

use crate::context::Cost;

/// Cost of a horizontal or vertical step.
pub const ORTHOGONAL_COST: Cost = 140;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: Cost = 198;
/// Cost multiplier on threatened tiles.
pub const DANGER_FACTOR: Cost = 5;

/// `GRADIENT_Y[g]` = round(√(140² − g²)), the perpendicular distance
/// component when the distance gradient along one axis is `g`.
pub(crate) const GRADIENT_Y: [u8; 99] = [
    140, 140, 140, 140, 140, 140, 140, 140, 140, 140, 140, 140, 139, 139, 139, 139, 139, 139, 139,
    139, 139, 138, 138, 138, 138, 138, 138, 137, 137, 137, 137, 137, 136, 136, 136, 136, 135, 135,
    135, 134, 134, 134, 134, 133, 133, 133, 132, 132, 132, 131, 131, 130, 130, 130, 129, 129, 128,
    128, 127, 127, 126, 126, 126, 125, 125, 124, 123, 123, 122, 122, 121, 121, 120, 119, 119, 118,
    118, 117, 116, 116, 115, 114, 113, 113, 112, 111, 110, 110, 109, 108, 107, 106, 106, 105, 104,
    103, 102, 101, 100,
];

/// Octile distance: diagonal steps first, then straight ones. Exact step
/// cost between adjacent tiles.
#[inline]
pub fn octile(a: Point, b: Point) -> Cost {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    dx.min(dy) * (DIAGONAL_COST - ORTHOGONAL_COST) + dx.max(dy) * ORTHOGONAL_COST
}

/// Euclidean distance in cost units, rounded down.
#[inline]
pub fn euclidean(a: Point, b: Point) -> Cost {
    let dx = u64::from(a.x.abs_diff(b.x)) * u64::from(ORTHOGONAL_COST);
    let dy = u64::from(a.y.abs_diff(b.y)) * u64::from(ORTHOGONAL_COST);
    (dx * dx + dy * dy).isqrt() as Cost
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
