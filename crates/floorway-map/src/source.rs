use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use floorway_paths::MapGraph;

use crate::document::{MapDocument, PolylineEdge, RawEdge};
use crate::error::LoadError;

/// A parsed map document plus any polyline overlay, ready to validate.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    document: MapDocument,
    overlay: Vec<PolylineEdge>,
}

impl MapSource {
    pub fn new(document: MapDocument) -> Self {
        Self {
            document,
            overlay: Vec::new(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::from_json(&read(path.as_ref())?)
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    /// Add polyline corridors from the editor's JSON array.
    ///
    /// Each entry replaces the document corridor joining the same pair (in
    /// either order) or adds a new one. When the overlay lists a pair twice,
    /// the later entry wins.
    pub fn with_polylines(mut self, overlay: Vec<PolylineEdge>) -> Self {
        self.overlay.extend(overlay);
        self
    }

    pub fn with_polylines_json(self, text: &str) -> Result<Self, LoadError> {
        Ok(self.with_polylines(serde_json::from_str(text)?))
    }

    pub fn with_polylines_path(self, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = read(path.as_ref())?;
        self.with_polylines_json(&text)
    }

    /// Corridor entries after applying the overlay, in a stable order:
    /// document order first, then overlay-only corridors in overlay order.
    pub fn merged_edges(&self) -> Vec<RawEdge> {
        let mut latest: HashMap<(String, String), &PolylineEdge> = HashMap::new();
        for pe in &self.overlay {
            let key = pe.key();
            if latest.insert(key, pe).is_some() {
                log::warn!(
                    "polyline overlay lists corridor {}-{} more than once; keeping the last",
                    pe.nodes[0],
                    pe.nodes[1]
                );
            }
        }

        let mut out = Vec::with_capacity(self.document.edges.len() + latest.len());
        for edge in &self.document.edges {
            match latest.remove(&edge.key()) {
                Some(pe) => {
                    log::debug!("polyline overlay replaces corridor {}-{}", pe.nodes[0], pe.nodes[1]);
                    out.push(RawEdge::Polyline(pe.clone()));
                }
                None => out.push(edge.clone()),
            }
        }
        for pe in &self.overlay {
            let key = pe.key();
            if latest.get(&key).is_some_and(|kept| std::ptr::eq(*kept, pe)) {
                latest.remove(&key);
                out.push(RawEdge::Polyline(pe.clone()));
            }
        }
        out
    }

    /// Normalize positions, apply the overlay, and validate the result.
    pub fn build(&self) -> Result<MapGraph, LoadError> {
        let mut builder = MapGraph::builder();
        for (name, raw) in &self.document.nodes {
            builder.waypoint(name.clone(), raw.resolve(name)?);
        }

        let edges = self.merged_edges();
        let mut polylines = 0usize;
        for edge in &edges {
            match edge {
                RawEdge::Pair([a, b]) => {
                    builder.corridor(a.clone(), b.clone());
                }
                RawEdge::Polyline(pe) => {
                    polylines += 1;
                    builder.polyline_corridor(pe.nodes[0].clone(), pe.nodes[1].clone(), pe.points());
                }
            }
        }

        let graph = builder.build()?;
        log::info!(
            "loaded floor map: {} waypoints, {} corridors ({polylines} polyline)",
            graph.len(),
            graph.corridor_count()
        );
        Ok(graph)
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and validate a map document.
pub fn load_str(text: &str) -> Result<MapGraph, LoadError> {
    MapSource::from_json(text)?.build()
}

/// Read, parse and validate a map file, with an optional polyline overlay
/// file.
pub fn load_path(
    map: impl AsRef<Path>,
    polylines: Option<&Path>,
) -> Result<MapGraph, LoadError> {
    let mut source = MapSource::from_path(map)?;
    if let Some(p) = polylines {
        source = source.with_polylines_path(p)?;
    }
    source.build()
}
