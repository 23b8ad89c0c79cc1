//! **floorway-geom** — floor-plan geometry primitives.
//!
//! Positions live in a single consistent 2-D coordinate space (typically
//! floor-image pixels). Any scaling between display and image coordinates
//! happens before values reach this crate.

pub mod point;
pub mod turn;

pub use point::{Point, polyline_length};
pub use turn::{Turn, turn};
