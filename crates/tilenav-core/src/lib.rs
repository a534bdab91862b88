//! Geometry shared by the tilenav crates.
//!
//! This crate provides the integer [`Point`] and half-open [`Range`] types
//! used for tile coordinates, and [`TileShift`], the power-of-two mapping
//! between world units and tiles.

pub mod geom;
pub mod tiles;

pub use geom::{Point, Range};
pub use tiles::TileShift;
