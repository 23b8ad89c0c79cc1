use floorway_geom::Point;

use crate::graph::{CorridorId, MapGraph, NodeId};
use crate::itinerary::{Instruction, build_itinerary};

/// A route found by the search.
///
/// Starts at the query start, ends at the query goal, never visits a waypoint
/// twice. `corridors[i]` joins `nodes[i]` and `nodes[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    nodes: Vec<NodeId>,
    corridors: Vec<CorridorId>,
    cost: f64,
}

impl Path {
    pub(crate) fn new(nodes: Vec<NodeId>, corridors: Vec<CorridorId>, cost: f64) -> Self {
        debug_assert_eq!(nodes.len(), corridors.len() + 1);
        Self {
            nodes,
            corridors,
            cost,
        }
    }

    pub(crate) fn single(node: NodeId) -> Self {
        Self::new(vec![node], Vec::new(), 0.0)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn corridors(&self) -> &[CorridorId] {
        &self.corridors
    }

    /// Total walking cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of waypoints. Never zero: a route holds at least its start.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn goal(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Waypoint names in walking order.
    pub fn names<'g>(&'g self, graph: &'g MapGraph) -> impl Iterator<Item = &'g str> + 'g {
        self.nodes.iter().map(|&n| graph.name(n))
    }

    /// Waypoint positions in walking order.
    pub fn positions(&self, graph: &MapGraph) -> Vec<Point> {
        self.nodes.iter().map(|&n| graph.position(n)).collect()
    }

    /// Full walking geometry: every corridor shape in walking direction,
    /// joined end to end. A point shared by two consecutive corridors is
    /// emitted once.
    pub fn polyline(&self, graph: &MapGraph) -> Vec<Point> {
        if self.corridors.is_empty() {
            return vec![graph.position(self.start())];
        }
        let mut out: Vec<Point> = Vec::new();
        for (&from, &c) in self.nodes.iter().zip(&self.corridors) {
            let shape = graph.corridor_shape_from(c, from);
            let skip = usize::from(out.last().is_some_and(|last| Some(last) == shape.first()));
            out.extend(shape.into_iter().skip(skip));
        }
        out
    }

    /// Turn-by-turn directions computed from waypoint positions.
    pub fn itinerary(&self, graph: &MapGraph) -> Vec<Instruction> {
        build_itinerary(&self.positions(graph), graph.name(self.goal()))
    }
}
