use std::cmp::Ordering;

use crate::graph::{CorridorId, NodeId};

/// Search settings. The default searches without limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    /// Maximum number of node expansions before giving up. A search that
    /// hits the limit reports no path rather than a partial one.
    pub step_limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Internal node for the A* priority-queue search
// ---------------------------------------------------------------------------

pub(crate) const NONE: u32 = u32::MAX;

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) parent: u32,
    pub(crate) via: u32,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: NONE,
            via: NONE,
            generation: 0,
            closed: false,
        }
    }
}

impl Node {
    pub(crate) fn parent(&self) -> Option<(NodeId, CorridorId)> {
        (self.parent != NONE).then(|| (NodeId(self.parent), CorridorId(self.via)))
    }
}

/// Frontier entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest `f` first and, among equal `f`, the smallest node id (the
/// lexicographically first waypoint name).
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: u32,
    pub(crate) f: f64,
    /// `g` at push time, used to detect stale entries.
    pub(crate) g: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Reusable A* search state.
///
/// A `Router` owns its node table and scratch buffers so repeated queries
/// allocate nothing after warm-up. It holds no graph data: the graph and the
/// exclusions are passed to every query, and one query leaves nothing behind
/// that could affect the next. Give each thread its own `Router`; the graph
/// can be shared.
#[derive(Default)]
pub struct Router {
    pub(crate) config: RouterConfig,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<(NodeId, CorridorId)>,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            generation: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    pub fn config(&self) -> RouterConfig {
        self.config
    }

    pub fn set_config(&mut self, config: RouterConfig) {
        self.config = config;
    }

    /// Start a new search over `len` nodes: grow the table if needed and
    /// bump the generation so every node reads as unvisited.
    pub(crate) fn begin(&mut self, len: usize) -> u32 {
        if self.nodes.len() < len {
            self.nodes.resize(len, Node::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale generations could collide, so reset them.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }

    /// Node `i` for the current generation, reset if last touched earlier.
    #[inline]
    pub(crate) fn node_mut(&mut self, i: usize, cur_gen: u32) -> &mut Node {
        let n = &mut self.nodes[i];
        if n.generation != cur_gen {
            *n = Node {
                generation: cur_gen,
                ..Node::default()
            };
        }
        n
    }
}
