use tilenav_core::Point;

use crate::area::NonblockingArea;
use crate::blocking::BlockingMap;
use crate::context::Cost;
use crate::distance::DANGER_FACTOR;
use crate::traits::CostLayer;

/// Cost layer reading straight from a blocking map, with the context's
/// nonblocking area punched out.
#[derive(Debug, Clone, Copy)]
pub struct TileCostLayer<'a> {
    map: &'a BlockingMap,
    area: NonblockingArea,
}

impl<'a> TileCostLayer<'a> {
    #[inline]
    pub fn new(map: &'a BlockingMap, area: NonblockingArea) -> Self {
        Self { map, area }
    }
}

impl CostLayer for TileCostLayer<'_> {
    #[inline]
    fn cost(&self, tile: Point) -> Cost {
        if self.map.is_dangerous(tile) {
            DANGER_FACTOR
        } else {
            1
        }
    }

    #[inline]
    fn is_blocked(&self, tile: Point) -> bool {
        !self.area.is_nonblocking(tile) && self.map.is_blocked(tile)
    }

    #[inline]
    fn is_nonblocking(&self, tile: Point) -> bool {
        self.area.is_nonblocking(tile)
    }
}
