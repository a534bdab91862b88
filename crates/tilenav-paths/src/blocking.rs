//! Per-tick blocking maps and their cache.
//!
//! Walkability only changes between simulation ticks, so a map rasterised
//! once per (tick, agent class) serves every request in that tick. The
//! cache throws all maps away the first time it sees a new tick.

use std::rc::Rc;

use tilenav_core::{Point, Range};

use crate::PathError;
use crate::agent::{BlockingKey, MoveType};
use crate::bitmap::Bitmap;
use crate::traits::Terrain;

/// Immutable snapshot of which tiles block (or endanger) one agent class
/// during one tick.
#[derive(Debug)]
pub struct BlockingMap {
    key: BlockingKey,
    version: u64,
    width: i32,
    height: i32,
    blocking: Bitmap,
    /// Empty unless threat data applies to this class.
    danger: Bitmap,
}

impl BlockingMap {
    /// Rasterise `terrain` for `key`.
    ///
    /// `version` must be unique among all maps a context could ever compare
    /// against; [`BlockingMapCache`] hands out a monotonically increasing one.
    pub fn build<T: Terrain>(
        terrain: &T,
        key: BlockingKey,
        version: u64,
    ) -> Result<Self, PathError> {
        let size = terrain.size();
        if size.x <= 0 || size.y <= 0 {
            return Err(PathError::EmptyMap {
                width: size.x,
                height: size.y,
            });
        }
        let bounds = Range::new(0, 0, size.x, size.y);
        let class = key.class;

        let mut blocking = Bitmap::new(bounds.len());
        for (i, p) in bounds.iter().enumerate() {
            let b = terrain.is_base_blocking(p, class.propulsion, class.owner, class.move_type);
            blocking.set(i, b);
        }

        let mut danger = Bitmap::default();
        if !terrain.is_human_player(class.owner) && class.move_type == MoveType::Move {
            danger = Bitmap::new(bounds.len());
            for (i, p) in bounds.iter().enumerate() {
                danger.set(i, terrain.is_threatened(p, class.owner));
            }
        }

        Ok(Self {
            key,
            version,
            width: size.x,
            height: size.y,
            blocking,
            danger,
        })
    }

    #[inline]
    pub fn key(&self) -> BlockingKey {
        self.key
    }

    /// Identity of this map, unique within its cache.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Whether `p` is blocking. Off-map tiles are blocking.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.idx(p).is_none_or(|i| self.blocking.get(i))
    }

    /// Whether `p` is threatened. Always `false` when no threat data was
    /// rasterised for this class.
    #[inline]
    pub fn is_dangerous(&self, p: Point) -> bool {
        !self.danger.is_empty() && self.idx(p).is_some_and(|i| self.danger.get(i))
    }

    /// Checksums of the blocking and danger bitmaps, for comparing maps
    /// built on different hosts.
    pub fn checksum(&self) -> (u32, u32) {
        (self.blocking.checksum(), self.danger.checksum())
    }
}

/// Cache of blocking maps for the current tick.
#[derive(Debug, Default)]
pub struct BlockingMapCache {
    game_time: Option<u32>,
    maps: Vec<Rc<BlockingMap>>,
    next_version: u64,
    built: u64,
}

impl BlockingMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the map for `key`, building it if no equivalent map exists for
    /// this tick.
    pub fn get_or_build<T: Terrain>(
        &mut self,
        terrain: &T,
        key: BlockingKey,
    ) -> Result<Rc<BlockingMap>, PathError> {
        if self.game_time != Some(key.game_time) {
            if !self.maps.is_empty() {
                log::debug!(
                    "new tick {}, dropping {} blocking maps",
                    key.game_time,
                    self.maps.len()
                );
            }
            self.game_time = Some(key.game_time);
            self.maps.clear();
        }

        if let Some(map) = self.maps.iter().find(|m| m.key().is_equivalent(&key)) {
            log::trace!("blocking map {:?} = cached #{}", key, map.version());
            return Ok(Rc::clone(map));
        }

        self.next_version += 1;
        let map = Rc::new(BlockingMap::build(terrain, key, self.next_version)?);
        self.built += 1;
        let (blocking, danger) = map.checksum();
        log::trace!(
            "blocking map {:?} = #{} {:08X} {:08X}",
            key,
            map.version(),
            blocking,
            danger
        );
        self.maps.push(Rc::clone(&map));
        Ok(map)
    }

    /// Drop every cached map regardless of tick.
    pub fn clear(&mut self) {
        self.maps.clear();
        self.game_time = None;
    }

    /// Number of maps cached for the current tick.
    #[inline]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Total number of maps built since creation.
    #[inline]
    pub fn built(&self) -> u64 {
        self.built
    }
}
