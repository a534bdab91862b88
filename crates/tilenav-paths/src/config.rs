use tilenav_core::TileShift;

/// Tuning knobs for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// Maximum number of live search contexts. Zero is treated as one.
    pub context_capacity: usize,
    /// World units per tile, as a power of two.
    pub tile_shift: TileShift,
}

impl PathConfig {
    /// Number of cached contexts kept when nothing else is configured.
    pub const DEFAULT_CONTEXT_CAPACITY: usize = 30;

    /// Set the context capacity (builder).
    #[inline]
    pub const fn with_context_capacity(mut self, capacity: usize) -> Self {
        self.context_capacity = capacity;
        self
    }

    /// Set the tile shift (builder).
    #[inline]
    pub const fn with_tile_shift(mut self, shift: TileShift) -> Self {
        self.tile_shift = shift;
        self
    }

    /// Capacity actually used by the context cache.
    #[inline]
    pub(crate) fn effective_capacity(&self) -> usize {
        self.context_capacity.max(1)
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            context_capacity: Self::DEFAULT_CONTEXT_CAPACITY,
            tile_shift: TileShift::DEFAULT,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: PathConfig = serde_json::from_str(r#"{"context_capacity": 4}"#).unwrap();
        assert_eq!(cfg.context_capacity, 4);
        assert_eq!(cfg.tile_shift, TileShift::DEFAULT);
    }
}
