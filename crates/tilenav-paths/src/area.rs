use tilenav_core::{Point, Range};

/// Tiles a search must never treat as blocking, typically the footprint of
/// the structure an agent is heading to or leaving.
///
/// The default area is empty and exempts nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NonblockingArea(Range);

impl NonblockingArea {
    /// The empty area.
    pub const NONE: Self = Self(Range {
        min: Point::ZERO,
        max: Point::ZERO,
    });

    /// Area covering a structure footprint of `size` tiles at `tile`.
    #[inline]
    pub fn from_bounds(tile: Point, size: Point) -> Self {
        Self(Range::with_size(tile, size))
    }

    #[inline]
    pub fn is_nonblocking(&self, tile: Point) -> bool {
        self.0.contains(tile)
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.0
    }
}

impl From<Range> for NonblockingArea {
    fn from(r: Range) -> Self {
        Self(r)
    }
}
