use std::fmt;

use tilenav_core::Point;

/// Errors that turn a route request into a [`RouteStatus::Failed`](crate::RouteStatus::Failed).
///
/// None of these are fatal: the caller simply leaves the agent where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The terrain reported a map with no tiles.
    EmptyMap { width: i32, height: i32 },
    /// A world point (or the tile it maps to) lies outside the map.
    OffMap { pos: Point },
    /// The tracer took more steps than there are tiles on the map.
    TraceLoop { steps: usize },
    /// The tracer reached a tile that was not explored in the current
    /// generation of its context.
    StaleTile { tile: Point },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap { width, height } => {
                write!(f, "blocking map has no tiles ({width}x{height})")
            }
            Self::OffMap { pos } => write!(f, "coordinates {pos} are not on the map"),
            Self::TraceLoop { steps } => {
                write!(f, "path tracing did not terminate after {steps} steps")
            }
            Self::StaleTile { tile } => {
                write!(f, "tile {tile} was not explored by the current search")
            }
        }
    }
}

impl std::error::Error for PathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_coordinates() {
        let e = PathError::OffMap {
            pos: Point::new(-3, 7),
        };
        assert_eq!(e.to_string(), "coordinates (-3, 7) are not on the map");
        let e = PathError::EmptyMap {
            width: 0,
            height: 4,
        };
        assert!(e.to_string().contains("0x4"));
    }
}
