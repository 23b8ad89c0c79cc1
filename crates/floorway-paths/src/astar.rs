use std::collections::BinaryHeap;

use crate::Router;
use crate::error::MapError;
use crate::exclusion::Exclusions;
use crate::graph::{MapGraph, NodeId};
use crate::path::Path;
use crate::router::{NodeRef, RouterConfig};
use crate::traits::AstarPather;

impl Router {
    /// Compute the cheapest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if `to` is
    /// unreachable through `pather`, or the configured step limit ran out.
    /// Ids outside `0..pather.len()` are also reported as `None`; use
    /// [`find_path`] to search by name with proper errors.
    ///
    /// Among paths of equal cost the result is fixed: the frontier breaks
    /// `f` ties by the smaller node id.
    pub fn find_path<P: AstarPather>(&mut self, pather: &P, from: NodeId, to: NodeId) -> Option<Path> {
        let len = pather.len();
        if from.index() >= len || to.index() >= len {
            log::debug!("astar: node out of range ({} / {} of {len})", from.index(), to.index());
            return None;
        }
        if from == to {
            return Some(Path::single(from));
        }

        let cur_gen = self.begin(len);

        // Initialise the start node.
        self.node_mut(from.index(), cur_gen).g = 0.0;

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: from.0,
            f: pather.estimate(from, to),
            g: 0.0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut steps = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx as usize;

            // Skip stale entries: superseded by a cheaper push, or already
            // expanded.
            {
                let n = &self.nodes[ci];
                if n.closed || current.g > n.g {
                    continue;
                }
            }

            if ci == to.index() {
                break 'search true;
            }

            if let Some(limit) = self.config.step_limit {
                if steps >= limit {
                    log::warn!("astar: step limit {limit} reached before goal");
                    break 'search false;
                }
            }
            steps += 1;

            self.nodes[ci].closed = true;
            let current_g = self.nodes[ci].g;
            let current_id = NodeId(current.idx);
            log::trace!("astar: expand {ci} g={current_g}");

            nbuf.clear();
            pather.neighbors(current_id, &mut nbuf);

            for &(nid, cid) in nbuf.iter() {
                let tentative_g = current_g + pather.cost(cid);

                let n = self.node_mut(nid.index(), cur_gen);
                if n.closed || tentative_g >= n.g {
                    continue;
                }

                n.g = tentative_g;
                n.parent = current_id.0;
                n.via = cid.0;

                open.push(NodeRef {
                    idx: nid.0,
                    f: tentative_g + pather.estimate(nid, to),
                    g: tentative_g,
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            log::debug!("astar: no path after {steps} expansions");
            return None;
        }

        // Reconstruct path.
        let cost = self.nodes[to.index()].g;
        let mut nodes = vec![to];
        let mut corridors = Vec::new();
        let mut ci = to.index();
        while let Some((parent, via)) = self.nodes[ci].parent() {
            nodes.push(parent);
            corridors.push(via);
            ci = parent.index();
        }
        nodes.reverse();
        corridors.reverse();
        log::debug!(
            "astar: found path of {} waypoints, cost {cost}, after {steps} expansions",
            nodes.len()
        );
        Some(Path::new(nodes, corridors, cost))
    }
}

/// One-shot search by waypoint name with a fresh [`Router`].
///
/// Unknown names are an error; an unreachable goal is `Ok(None)`.
pub fn find_path(
    graph: &MapGraph,
    start: &str,
    goal: &str,
    exclusions: &Exclusions,
) -> Result<Option<Path>, MapError> {
    let from = graph.require(start)?;
    let to = graph.require(goal)?;
    let mut router = Router::new(RouterConfig::default());
    Ok(router.find_path(&graph.view(exclusions), from, to))
}
