//! Floor-map loading.
//!
//! Reads the JSON documents produced by the floor-plan tooling and turns them
//! into a validated [`MapGraph`]:
//!
//! - a map document with `nodes` (name to position) and `edges` (straight
//!   pairs or polyline objects), see [`MapDocument`];
//! - optionally, a polyline overlay saved by the corridor editor, see
//!   [`MapSource::with_polylines`].
//!
//! Positions may be written as `x`/`y` or `x_img`/`y_img`. This is resolved
//! once here; nothing downstream sees the raw schema.

mod document;
mod error;
mod source;

pub use document::{MapDocument, PolylineEdge, RawEdge, RawPosition};
pub use error::LoadError;
pub use source::{MapSource, load_path, load_str};

pub use floorway_paths::MapGraph;
