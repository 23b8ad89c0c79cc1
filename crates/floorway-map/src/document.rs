//! Raw JSON shapes, exactly as written on disk.

use floorway_geom::Point;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// A whole map file.
///
/// ```json
/// {
///   "nodes": { "Entrance": { "x": 12, "y": 40 }, "Lab": { "x_img": 300, "y_img": 40 } },
///   "edges": [ ["Entrance", "Lab"],
///              { "nodes": ["Lab", "Stairs"], "shape": [[300, 40], [310, 90], [280, 120]] } ]
/// }
/// ```
///
/// Each waypoint name may appear once in `nodes`, and each unordered pair
/// once in `edges`: listing both `["A", "B"]` and `["B", "A"]` fails the load
/// with `DuplicateCorridor`. To give an existing corridor a new shape, use a
/// polyline overlay (see `MapSource::with_polylines`) instead of a second
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    /// Waypoints in file order. Repeated names are kept so that validation
    /// can reject them.
    #[serde(with = "waypoint_entries")]
    pub nodes: Vec<(String, RawPosition)>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

/// `nodes` is a JSON object on disk, read entry by entry.
mod waypoint_entries {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    use super::RawPosition;

    pub fn serialize<S: Serializer>(
        entries: &[(String, RawPosition)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(entries.iter().map(|(name, pos)| (name, pos)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, RawPosition)>, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }

    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, RawPosition)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping waypoint names to positions")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }
}

/// A waypoint position in either accepted schema. Unknown fields are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_img: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_img: Option<f64>,
}

impl RawPosition {
    /// Canonical position: `x`/`y` when both are present, otherwise
    /// `x_img`/`y_img`.
    pub fn resolve(&self, name: &str) -> Result<Point, LoadError> {
        match (self.x, self.y, self.x_img, self.y_img) {
            (Some(x), Some(y), _, _) => Ok(Point::new(x, y)),
            (_, _, Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(LoadError::MissingCoordinates(name.to_string())),
        }
    }
}

/// One corridor entry of the `edges` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEdge {
    /// `["A", "B"]`: a straight corridor.
    Pair([String; 2]),
    /// `{"nodes": ["A", "B"], "shape": [[x, y], ...]}`.
    Polyline(PolylineEdge),
}

impl RawEdge {
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            Self::Pair([a, b]) => (a.as_str(), b.as_str()),
            Self::Polyline(p) => (p.nodes[0].as_str(), p.nodes[1].as_str()),
        }
    }

    /// Unordered identity by name.
    pub(crate) fn key(&self) -> (String, String) {
        let (a, b) = self.endpoints();
        pair_key(a, b)
    }
}

pub(crate) fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// A polyline corridor as authored in the corridor editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineEdge {
    pub nodes: [String; 2],
    pub shape: Vec<[f64; 2]>,
}

impl PolylineEdge {
    pub fn points(&self) -> Vec<Point> {
        self.shape.iter().copied().map(Point::from).collect()
    }

    pub(crate) fn key(&self) -> (String, String) {
        pair_key(&self.nodes[0], &self.nodes[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_prefers_plain_fields() {
        let p: RawPosition =
            serde_json::from_str(r#"{"x": 1, "y": 2, "x_img": 10, "y_img": 20}"#).unwrap();
        assert_eq!(p.resolve("n").unwrap(), Point::new(1.0, 2.0));
    }

    #[test]
    fn position_falls_back_to_image_fields() {
        let p: RawPosition =
            serde_json::from_str(r#"{"x_img": 10.5, "y_img": 20, "label": "ignored"}"#).unwrap();
        assert_eq!(p.resolve("n").unwrap(), Point::new(10.5, 20.0));
    }

    #[test]
    fn half_a_schema_is_missing() {
        let p: RawPosition = serde_json::from_str(r#"{"x": 1, "y_img": 20}"#).unwrap();
        assert!(matches!(
            p.resolve("Hall"),
            Err(LoadError::MissingCoordinates(name)) if name == "Hall"
        ));
    }

    #[test]
    fn edges_in_both_forms() {
        let edges: Vec<RawEdge> = serde_json::from_str(
            r#"[["A", "B"], {"nodes": ["B", "C"], "shape": [[0, 0], [5, 5]]}]"#,
        )
        .unwrap();
        assert_eq!(edges[0], RawEdge::Pair(["A".into(), "B".into()]));
        assert_eq!(edges[1].endpoints(), ("B", "C"));
        let RawEdge::Polyline(p) = &edges[1] else {
            panic!("expected polyline");
        };
        assert_eq!(p.points(), [Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
    }

    #[test]
    fn nodes_keep_file_order_and_repeats() {
        let doc: MapDocument = serde_json::from_str(
            r#"{"nodes": {"Hall": {"x": 0, "y": 0}, "Atrium": {"x": 1, "y": 1}, "Hall": {"x": 9, "y": 9}}}"#,
        )
        .unwrap();
        let names: Vec<&str> = doc.nodes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["Hall", "Atrium", "Hall"]);
        assert_eq!(doc.nodes[2].1.x, Some(9.0));
        assert!(doc.edges.is_empty());
    }

    #[test]
    fn nodes_serialize_as_object() {
        let doc = MapDocument {
            nodes: vec![(
                "Lab".into(),
                RawPosition {
                    x: Some(3.0),
                    y: Some(4.0),
                    ..RawPosition::default()
                },
            )],
            edges: vec![RawEdge::Pair(["Lab".into(), "Lab".into()])],
        };
        let v = serde_json::to_value(&doc).unwrap();
        assert_eq!(v["nodes"]["Lab"], serde_json::json!({"x": 3.0, "y": 4.0}));
        let back: MapDocument = serde_json::from_value(v).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn key_ignores_direction() {
        let a = RawEdge::Pair(["B".into(), "A".into()]);
        let b = RawEdge::Pair(["A".into(), "B".into()]);
        assert_eq!(a.key(), b.key());
    }
}
