use crate::graph::{CorridorId, NodeId};

/// Minimal search interface: node count and neighbor enumeration.
pub trait Pather {
    /// Number of nodes. Valid ids are `0..len()`.
    fn len(&self) -> usize;

    /// Append `(neighbor, corridor)` pairs of `node` into `buf`, in a stable
    /// order. The caller clears `buf` before calling.
    fn neighbors(&self, node: NodeId, buf: &mut Vec<(NodeId, CorridorId)>);
}

/// Pather with weighted (non-negative cost) corridors.
pub trait WeightedPather: Pather {
    /// Cost of walking `corridor`, the same in both directions.
    fn cost(&self, corridor: CorridorId) -> f64;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Estimated cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: NodeId, to: NodeId) -> f64;
}
