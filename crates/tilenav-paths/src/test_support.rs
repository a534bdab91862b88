//! Terrain fixtures for unit tests.

use tilenav_core::{Point, TileShift};

use crate::agent::{AgentClass, MoveType, Propulsion};
use crate::traits::Terrain;

/// Terrain parsed from ASCII art, one row per line.
///
/// `#` blocks every propulsion except lift, `~` is threatened, anything else
/// is open ground. Owner 0 is the only human player.
pub(crate) struct AsciiTerrain {
    width: i32,
    height: i32,
    cells: Vec<u8>,
}

impl AsciiTerrain {
    pub(crate) fn parse(art: &str) -> Self {
        let rows: Vec<&[u8]> = art
            .lines()
            .map(str::as_bytes)
            .filter(|r| !r.is_empty())
            .collect();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(rows.iter().all(|r| r.len() == width), "ragged test map");
        Self {
            width: width as i32,
            height: rows.len() as i32,
            cells: rows.concat(),
        }
    }

    /// An open map of the given size.
    pub(crate) fn open(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![b'.'; (width * height) as usize],
        }
    }

    pub(crate) fn set(&mut self, p: Point, c: u8) {
        let i = (p.y * self.width + p.x) as usize;
        self.cells[i] = c;
    }

    fn at(&self, p: Point) -> u8 {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return b'#';
        }
        self.cells[(p.y * self.width + p.x) as usize]
    }

    /// Whether `p` blocks ground units.
    pub(crate) fn is_wall(&self, p: Point) -> bool {
        self.at(p) == b'#'
    }
}

impl Terrain for AsciiTerrain {
    fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    fn is_base_blocking(
        &self,
        tile: Point,
        propulsion: Propulsion,
        _owner: u8,
        _move_type: MoveType,
    ) -> bool {
        propulsion != Propulsion::Lift && self.is_wall(tile)
    }

    fn is_threatened(&self, tile: Point, _owner: u8) -> bool {
        self.at(tile) == b'~'
    }

    fn is_human_player(&self, owner: u8) -> bool {
        owner == 0
    }
}

/// A computer-controlled wheeled agent doing a plain move.
pub(crate) fn ground() -> AgentClass {
    AgentClass::new(Propulsion::Wheeled, 1, MoveType::Move)
}

/// World-space centre of `tile` at the default tile size.
pub(crate) fn world(tile: Point) -> Point {
    TileShift::DEFAULT.tile_center(tile)
}

/// Tile containing `world` at the default tile size.
pub(crate) fn tile(world: Point) -> Point {
    TileShift::DEFAULT.to_tile(world)
}
