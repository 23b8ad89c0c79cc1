//! Query-scoped corridor exclusion.
//!
//! Blocking a corridor never touches the [`MapGraph`]: an [`Exclusions`] set
//! is passed alongside each query, usually through a [`FilteredGraph`] view.

use std::collections::BTreeSet;

use crate::error::MapError;
use crate::graph::{CorridorId, MapGraph, NodeId};
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Direction-insensitive corridor identity: the endpoint pair, smaller first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorridorKey(NodeId, NodeId);

impl CorridorKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.0, self.1)
    }
}

/// A set of corridors to treat as absent for one query.
///
/// Pairs without a corridor may be inserted; they simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    keys: BTreeSet<CorridorKey>,
}

impl Exclusions {
    /// Empty set: nothing blocked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `(a, b)` name pairs against `graph`.
    pub fn resolve<'n, I>(graph: &MapGraph, pairs: I) -> Result<Self, MapError>
    where
        I: IntoIterator<Item = (&'n str, &'n str)>,
    {
        let mut ex = Self::new();
        for (a, b) in pairs {
            ex.insert(graph.require(a)?, graph.require(b)?);
        }
        Ok(ex)
    }

    /// Every corridor touching `node`.
    pub fn incident(graph: &MapGraph, node: NodeId) -> Self {
        let keys = graph
            .adjacent(node)
            .iter()
            .map(|&(n, _)| CorridorKey::new(node, n))
            .collect();
        Self { keys }
    }

    /// Block the corridor between `a` and `b`. Returns `false` if it was
    /// already blocked.
    pub fn insert(&mut self, a: NodeId, b: NodeId) -> bool {
        self.keys.insert(CorridorKey::new(a, b))
    }

    /// Unblock the corridor between `a` and `b`.
    pub fn remove(&mut self, a: NodeId, b: NodeId) -> bool {
        self.keys.remove(&CorridorKey::new(a, b))
    }

    #[inline]
    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        !self.keys.is_empty() && self.keys.contains(&CorridorKey::new(a, b))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = CorridorKey> + '_ {
        self.keys.iter().copied()
    }
}

impl FromIterator<(NodeId, NodeId)> for Exclusions {
    fn from_iter<T: IntoIterator<Item = (NodeId, NodeId)>>(iter: T) -> Self {
        Self {
            keys: iter
                .into_iter()
                .map(|(a, b)| CorridorKey::new(a, b))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredGraph
// ---------------------------------------------------------------------------

/// Read-only view of a graph with some corridors hidden.
///
/// Cheap to build per request; borrows both the graph and the exclusions.
#[derive(Debug, Clone, Copy)]
pub struct FilteredGraph<'a> {
    graph: &'a MapGraph,
    exclusions: &'a Exclusions,
}

impl<'a> FilteredGraph<'a> {
    pub fn new(graph: &'a MapGraph, exclusions: &'a Exclusions) -> Self {
        Self { graph, exclusions }
    }

    pub fn graph(&self) -> &'a MapGraph {
        self.graph
    }

    pub fn exclusions(&self) -> &'a Exclusions {
        self.exclusions
    }
}

impl Pather for FilteredGraph<'_> {
    fn len(&self) -> usize {
        self.graph.len()
    }

    fn neighbors(&self, node: NodeId, buf: &mut Vec<(NodeId, CorridorId)>) {
        buf.extend(self.graph.neighbors(node, self.exclusions));
    }
}

impl WeightedPather for FilteredGraph<'_> {
    fn cost(&self, corridor: CorridorId) -> f64 {
        self.graph.corridor_weight(corridor)
    }
}

impl AstarPather for FilteredGraph<'_> {
    fn estimate(&self, from: NodeId, to: NodeId) -> f64 {
        self.graph.estimate(from, to)
    }
}

impl Pather for MapGraph {
    fn len(&self) -> usize {
        MapGraph::len(self)
    }

    fn neighbors(&self, node: NodeId, buf: &mut Vec<(NodeId, CorridorId)>) {
        buf.extend_from_slice(self.adjacent(node));
    }
}

impl WeightedPather for MapGraph {
    fn cost(&self, corridor: CorridorId) -> f64 {
        self.corridor_weight(corridor)
    }
}

impl AstarPather for MapGraph {
    /// Straight-line distance. Corridor weights are never below their chord,
    /// so this never overestimates.
    fn estimate(&self, from: NodeId, to: NodeId) -> f64 {
        self.position(from).dist(self.position(to))
    }
}
