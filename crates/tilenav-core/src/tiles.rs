//! World ↔ tile coordinate mapping.
//!
//! A tile is `2^shift` world units wide. Converting a world coordinate to a
//! tile is an arithmetic right shift, so negative world coordinates land on
//! negative (off-map) tiles rather than on tile 0.

use crate::geom::Point;

/// Power-of-two tile size, stored as the shift amount.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileShift(u8);

impl TileShift {
    /// 128 world units per tile.
    pub const DEFAULT: Self = Self(7);

    /// Create a tile shift. Shifts above 24 are clamped.
    #[inline]
    pub const fn new(shift: u8) -> Self {
        Self(if shift > 24 { 24 } else { shift })
    }

    /// The shift amount.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// World units per tile.
    #[inline]
    pub const fn units(self) -> i32 {
        1 << self.0
    }

    /// Half a tile in world units.
    #[inline]
    pub const fn half(self) -> i32 {
        self.units() / 2
    }

    #[inline]
    pub const fn to_tile_coord(self, world: i32) -> i32 {
        world >> self.0
    }

    #[inline]
    pub const fn to_world_coord(self, tile: i32) -> i32 {
        tile << self.0
    }

    /// Tile containing the world point.
    #[inline]
    pub const fn to_tile(self, world: Point) -> Point {
        Point::new(self.to_tile_coord(world.x), self.to_tile_coord(world.y))
    }

    /// World position of the tile's top-left corner.
    #[inline]
    pub const fn to_world(self, tile: Point) -> Point {
        Point::new(self.to_world_coord(tile.x), self.to_world_coord(tile.y))
    }

    /// World position of the tile's centre.
    #[inline]
    pub const fn tile_center(self, tile: Point) -> Point {
        let corner = self.to_world(tile);
        corner.shift(self.half(), self.half())
    }
}

impl Default for TileShift {
    fn default() -> Self {
        Self::DEFAULT
    }
}
