//! The floor graph: waypoints, corridors and their validation.

use std::collections::HashMap;

use floorway_geom::{Point, polyline_length};

use crate::error::{Degeneracy, MapError};
use crate::exclusion::{CorridorKey, Exclusions};

/// Dense index of a waypoint inside one [`MapGraph`].
///
/// Ids are handed out in lexicographic order of waypoint names, so ordering
/// ids is the same as ordering names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense index of a corridor inside one [`MapGraph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorridorId(pub(crate) u32);

impl CorridorId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named, positioned location.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    name: String,
    pos: Point,
}

impl Waypoint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pos(&self) -> Point {
        self.pos
    }
}

/// An undirected connection between two waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    a: NodeId,
    b: NodeId,
    shape: Option<Vec<Point>>,
    weight: f64,
}

impl Corridor {
    /// The two endpoints, in the order the corridor was authored.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// Direction-insensitive identity of this corridor.
    pub fn key(&self) -> CorridorKey {
        CorridorKey::new(self.a, self.b)
    }

    /// The endpoint opposite `n`, or `None` if `n` is not an endpoint.
    pub fn other(&self, n: NodeId) -> Option<NodeId> {
        if n == self.a {
            Some(self.b)
        } else if n == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// The authored polyline, if this is not a straight corridor.
    pub fn shape(&self) -> Option<&[Point]> {
        self.shape.as_deref()
    }

    /// Walking cost. Independent of traversal direction.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

// ---------------------------------------------------------------------------
// MapGraph
// ---------------------------------------------------------------------------

/// A validated, immutable floor graph.
///
/// Built with [`MapGraphBuilder`]; a graph that exists has passed every
/// load-time check, so queries never meet dangling references.
#[derive(Debug, Clone)]
pub struct MapGraph {
    // Sorted by name; index == NodeId.
    waypoints: Vec<Waypoint>,
    corridors: Vec<Corridor>,
    // Per node, sorted by neighbor id.
    adjacency: Vec<Vec<(NodeId, CorridorId)>>,
    by_key: HashMap<CorridorKey, CorridorId>,
}

impl MapGraph {
    /// Start describing a new graph.
    pub fn builder() -> MapGraphBuilder {
        MapGraphBuilder::new()
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of corridors.
    pub fn corridor_count(&self) -> usize {
        self.corridors.len()
    }

    /// Look up a waypoint by name.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.waypoints
            .binary_search_by(|w| w.name.as_str().cmp(name))
            .ok()
            .map(|i| NodeId(i as u32))
    }

    /// Like [`node`](Self::node), but unknown names are an error.
    pub fn require(&self, name: &str) -> Result<NodeId, MapError> {
        self.node(name)
            .ok_or_else(|| MapError::UnknownWaypoint(name.to_string()))
    }

    pub fn waypoint(&self, id: NodeId) -> &Waypoint {
        &self.waypoints[id.index()]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.waypoints[id.index()].name
    }

    /// Waypoint coordinates, for heuristics and geometry.
    #[inline]
    pub fn position(&self, id: NodeId) -> Point {
        self.waypoints[id.index()].pos
    }

    /// All waypoints with their ids, in name order.
    pub fn waypoints(&self) -> impl Iterator<Item = (NodeId, &Waypoint)> + '_ {
        self.waypoints
            .iter()
            .enumerate()
            .map(|(i, w)| (NodeId(i as u32), w))
    }

    /// All corridors with their ids, in load order.
    pub fn corridors(&self) -> impl Iterator<Item = (CorridorId, &Corridor)> + '_ {
        self.corridors
            .iter()
            .enumerate()
            .map(|(i, c)| (CorridorId(i as u32), c))
    }

    pub fn corridor(&self, id: CorridorId) -> &Corridor {
        &self.corridors[id.index()]
    }

    /// The corridor joining `a` and `b` in either direction.
    pub fn corridor_between(&self, a: NodeId, b: NodeId) -> Option<CorridorId> {
        self.by_key.get(&CorridorKey::new(a, b)).copied()
    }

    /// Sum of segment lengths along the corridor shape.
    #[inline]
    pub fn corridor_weight(&self, id: CorridorId) -> f64 {
        self.corridors[id.index()].weight
    }

    /// Corridors incident to `node` that are not excluded, sorted by neighbor.
    pub fn neighbors<'a>(
        &'a self,
        node: NodeId,
        exclusions: &'a Exclusions,
    ) -> impl Iterator<Item = (NodeId, CorridorId)> + 'a {
        self.adjacency[node.index()]
            .iter()
            .copied()
            .filter(move |&(n, _)| !exclusions.contains(node, n))
    }

    /// Unfiltered adjacency of `node`.
    pub(crate) fn adjacent(&self, node: NodeId) -> &[(NodeId, CorridorId)] {
        &self.adjacency[node.index()]
    }

    /// Corridor geometry as walked starting from `from`.
    ///
    /// A straight corridor yields its two endpoint positions. An authored
    /// shape is reversed when walked from its second endpoint. Costs never
    /// depend on this direction.
    pub fn corridor_shape_from(&self, id: CorridorId, from: NodeId) -> Vec<Point> {
        let c = &self.corridors[id.index()];
        let mut pts = match &c.shape {
            Some(shape) => shape.clone(),
            None => vec![self.position(c.a), self.position(c.b)],
        };
        if from == c.b {
            pts.reverse();
        }
        pts
    }

    /// Per-query view that hides the corridors in `exclusions`.
    pub fn view<'a>(&'a self, exclusions: &'a Exclusions) -> crate::FilteredGraph<'a> {
        crate::FilteredGraph::new(self, exclusions)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct PendingCorridor {
    a: String,
    b: String,
    shape: Option<Vec<Point>>,
}

/// Collects waypoints and corridors by name, then validates them all at once.
#[derive(Debug, Clone, Default)]
pub struct MapGraphBuilder {
    waypoints: Vec<(String, Point)>,
    corridors: Vec<PendingCorridor>,
}

impl MapGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a waypoint.
    pub fn waypoint(&mut self, name: impl Into<String>, pos: Point) -> &mut Self {
        self.waypoints.push((name.into(), pos));
        self
    }

    /// Add a straight corridor between two waypoints.
    pub fn corridor(&mut self, a: impl Into<String>, b: impl Into<String>) -> &mut Self {
        self.corridors.push(PendingCorridor {
            a: a.into(),
            b: b.into(),
            shape: None,
        });
        self
    }

    /// Add a corridor following `shape`, ordered from `a` to `b`.
    pub fn polyline_corridor(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        shape: Vec<Point>,
    ) -> &mut Self {
        self.corridors.push(PendingCorridor {
            a: a.into(),
            b: b.into(),
            shape: Some(shape),
        });
        self
    }

    /// Validate everything and produce the graph.
    ///
    /// The first problem found aborts the build; no partially valid graph is
    /// ever returned.
    pub fn build(&self) -> Result<MapGraph, MapError> {
        let mut sorted = self.waypoints.clone();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        for pair in sorted.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(MapError::DuplicateWaypoint(pair[0].0.clone()));
            }
        }
        let waypoints: Vec<Waypoint> = sorted
            .into_iter()
            .map(|(name, pos)| {
                if pos.is_finite() {
                    Ok(Waypoint { name, pos })
                } else {
                    Err(MapError::InvalidPosition(name))
                }
            })
            .collect::<Result<_, _>>()?;

        let mut graph = MapGraph {
            adjacency: vec![Vec::new(); waypoints.len()],
            waypoints,
            corridors: Vec::with_capacity(self.corridors.len()),
            by_key: HashMap::with_capacity(self.corridors.len()),
        };

        for pc in &self.corridors {
            let a = graph.require(&pc.a)?;
            let b = graph.require(&pc.b)?;
            let degenerate = |reason| MapError::DegenerateCorridor {
                a: pc.a.clone(),
                b: pc.b.clone(),
                reason,
            };
            if a == b {
                return Err(degenerate(Degeneracy::SameEndpoints));
            }

            let chord = graph.position(a).dist(graph.position(b));
            let weight = match &pc.shape {
                None => chord,
                Some(shape) if shape.len() < 2 => {
                    return Err(degenerate(Degeneracy::ShortShape(shape.len())));
                }
                Some(shape) => {
                    if !shape.iter().all(|p| p.is_finite()) {
                        return Err(MapError::InvalidShape {
                            a: pc.a.clone(),
                            b: pc.b.clone(),
                        });
                    }
                    // Authored shapes may not touch the endpoints exactly;
                    // never let the cost drop below the straight-line distance.
                    polyline_length(shape).max(chord)
                }
            };
            if !weight.is_finite() {
                return Err(MapError::InvalidShape {
                    a: pc.a.clone(),
                    b: pc.b.clone(),
                });
            }

            let key = CorridorKey::new(a, b);
            if graph.by_key.contains_key(&key) {
                return Err(MapError::DuplicateCorridor {
                    a: pc.a.clone(),
                    b: pc.b.clone(),
                });
            }

            let id = CorridorId(graph.corridors.len() as u32);
            graph.corridors.push(Corridor {
                a,
                b,
                shape: pc.shape.clone(),
                weight,
            });
            graph.by_key.insert(key, id);
            graph.adjacency[a.index()].push((b, id));
            graph.adjacency[b.index()].push((a, id));
        }

        for adj in graph.adjacency.iter_mut() {
            adj.sort_unstable();
        }

        log::debug!(
            "built floor graph: {} waypoints, {} corridors",
            graph.waypoints.len(),
            graph.corridors.len()
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn square() -> MapGraph {
        MapGraph::builder()
            .waypoint("A", Point::new(0.0, 0.0))
            .waypoint("B", Point::new(10.0, 0.0))
            .waypoint("C", Point::new(10.0, 10.0))
            .waypoint("D", Point::new(0.0, 10.0))
            .corridor("A", "B")
            .corridor("C", "B")
            .corridor("C", "D")
            .polyline_corridor(
                "D",
                "A",
                vec![
                    Point::new(0.0, 10.0),
                    Point::new(-5.0, 5.0),
                    Point::new(0.0, 0.0),
                ],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn ids_follow_name_order() {
        let g = MapGraph::builder()
            .waypoint("lobby", Point::new(0.0, 0.0))
            .waypoint("atrium", Point::new(1.0, 0.0))
            .waypoint("cafe", Point::new(2.0, 0.0))
            .build()
            .unwrap();
        let names: Vec<&str> = g.waypoints().map(|(_, w)| w.name()).collect();
        assert_eq!(names, ["atrium", "cafe", "lobby"]);
        assert!(g.node("atrium").unwrap() < g.node("lobby").unwrap());
        assert_eq!(g.node("nowhere"), None);
    }

    #[test]
    fn neighbors_ignore_stored_direction() {
        let g = square();
        let b = g.node("B").unwrap();
        let none = Exclusions::new();
        let names: Vec<&str> = g.neighbors(b, &none).map(|(n, _)| g.name(n)).collect();
        // A-B stored as A->B, C-B stored as C->B.
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn neighbors_respect_exclusions() {
        let g = square();
        let a = g.node("A").unwrap();
        let b = g.node("B").unwrap();
        let mut ex = Exclusions::new();
        ex.insert(b, a);
        let names: Vec<&str> = g.neighbors(a, &ex).map(|(n, _)| g.name(n)).collect();
        assert_eq!(names, ["D"]);
        // The graph itself still has the corridor.
        assert!(g.corridor_between(a, b).is_some());
    }

    #[test]
    fn straight_weight_is_distance() {
        let g = square();
        let a = g.node("A").unwrap();
        let b = g.node("B").unwrap();
        let id = g.corridor_between(b, a).unwrap();
        assert_eq!(g.corridor_weight(id), 10.0);
    }

    #[test]
    fn polyline_weight_is_length() {
        let g = square();
        let a = g.node("A").unwrap();
        let d = g.node("D").unwrap();
        let id = g.corridor_between(a, d).unwrap();
        let expected = 2.0 * 50f64.sqrt();
        assert!((g.corridor_weight(id) - expected).abs() < 1e-12);
        assert!(g.corridor(id).shape().is_some());
    }

    #[test]
    fn shape_from_reverses_for_second_endpoint() {
        let g = square();
        let a = g.node("A").unwrap();
        let d = g.node("D").unwrap();
        let id = g.corridor_between(a, d).unwrap();
        let from_d = g.corridor_shape_from(id, d);
        let from_a = g.corridor_shape_from(id, a);
        assert_eq!(from_d.first(), Some(&Point::new(0.0, 10.0)));
        assert_eq!(from_a.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(from_a.len(), 3);

        let b = g.node("B").unwrap();
        let ab = g.corridor_between(a, b).unwrap();
        assert_eq!(
            g.corridor_shape_from(ab, b),
            vec![Point::new(10.0, 0.0), Point::new(0.0, 0.0)]
        );
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let err = MapGraph::builder()
            .waypoint("A", Point::new(0.0, 0.0))
            .corridor("A", "Ghost")
            .build()
            .unwrap_err();
        assert_eq!(err, MapError::UnknownWaypoint("Ghost".into()));
    }

    #[test]
    fn self_loop_rejected() {
        let err = MapGraph::builder()
            .waypoint("A", Point::new(0.0, 0.0))
            .corridor("A", "A")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            MapError::DegenerateCorridor {
                reason: Degeneracy::SameEndpoints,
                ..
            }
        ));
    }

    #[test]
    fn short_shape_rejected() {
        let err = MapGraph::builder()
            .waypoint("A", Point::new(0.0, 0.0))
            .waypoint("B", Point::new(1.0, 0.0))
            .polyline_corridor("A", "B", vec![Point::new(0.0, 0.0)])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            MapError::DegenerateCorridor {
                reason: Degeneracy::ShortShape(1),
                ..
            }
        ));
    }

    #[test]
    fn non_finite_data_rejected() {
        let err = MapGraph::builder()
            .waypoint("A", Point::new(f64::NAN, 0.0))
            .build()
            .unwrap_err();
        assert_eq!(err, MapError::InvalidPosition("A".into()));

        let err = MapGraph::builder()
            .waypoint("A", Point::new(0.0, 0.0))
            .waypoint("B", Point::new(1.0, 0.0))
            .polyline_corridor(
                "A",
                "B",
                vec![Point::new(0.0, 0.0), Point::new(f64::INFINITY, 0.0)],
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidShape { .. }));
    }

    #[test]
    fn duplicates_rejected() {
        let err = MapGraph::builder()
            .waypoint("A", Point::new(0.0, 0.0))
            .waypoint("A", Point::new(1.0, 0.0))
            .build()
            .unwrap_err();
        assert_eq!(err, MapError::DuplicateWaypoint("A".into()));

        let err = MapGraph::builder()
            .waypoint("A", Point::new(0.0, 0.0))
            .waypoint("B", Point::new(1.0, 0.0))
            .corridor("A", "B")
            .corridor("B", "A")
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::DuplicateCorridor { .. }));
    }

    #[test]
    fn weight_never_below_chord() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let pa = Point::new(rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
            let pb = Point::new(rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
            let n = rng.random_range(2..6usize);
            // Shapes are arbitrary clicks, not necessarily anchored at the
            // endpoints.
            let shape: Vec<Point> = (0..n)
                .map(|_| Point::new(rng.random_range(0.0..800.0), rng.random_range(0.0..600.0)))
                .collect();
            let straight = rng.random_bool(0.3);

            let mut b = MapGraph::builder();
            b.waypoint("a", pa).waypoint("b", pb);
            if straight {
                b.corridor("a", "b");
            } else {
                b.polyline_corridor("a", "b", shape);
            }
            let g = b.build().unwrap();
            let (id, c) = g.corridors().next().unwrap();
            let (a, bb) = c.endpoints();
            assert!(g.corridor_weight(id) >= g.position(a).dist(g.position(bb)));
        }
    }
}
