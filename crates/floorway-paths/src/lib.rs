//! Walking routes over a single building floor.
//!
//! A floor is a [`MapGraph`] of named waypoints joined by corridors whose
//! shape is either a straight segment or an authored polyline. Routes are
//! found with A* ([`Router::find_path`], or the one-shot [`find_path`]) and
//! turned into directions with [`build_itinerary`] / [`Path::itinerary`].
//!
//! Corridors can be blocked for a single query through an [`Exclusions`] set.
//! The graph itself is never modified after [`MapGraphBuilder::build`], so one
//! loaded map can serve any number of queries, including from several threads
//! at once.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | corridor costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible heuristic |
//!
//! Both [`MapGraph`] (nothing excluded) and [`FilteredGraph`] implement all
//! three.

mod astar;
mod error;
mod exclusion;
mod graph;
mod itinerary;
mod path;
mod router;
mod traits;

pub use astar::find_path;
pub use error::{Degeneracy, MapError};
pub use exclusion::{CorridorKey, Exclusions, FilteredGraph};
pub use graph::{Corridor, CorridorId, MapGraph, MapGraphBuilder, NodeId, Waypoint};
pub use itinerary::{Instruction, build_itinerary, numbered};
pub use path::Path;
pub use router::{Router, RouterConfig};
pub use traits::{AstarPather, Pather, WeightedPather};

pub use floorway_geom::{Point, Turn};
