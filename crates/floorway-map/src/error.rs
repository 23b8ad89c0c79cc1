use std::fmt;
use std::io;
use std::path::PathBuf;

use floorway_paths::MapError;

/// Errors that can occur while loading a floor map.
#[derive(Debug)]
pub enum LoadError {
    /// A file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The text is not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// A waypoint has neither `x`/`y` nor `x_img`/`y_img`.
    MissingCoordinates(String),
    /// The data parsed but does not form a valid graph.
    Map(MapError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Json(e) => write!(f, "invalid map JSON: {e}"),
            Self::MissingCoordinates(name) => write!(
                f,
                "waypoint \u{201c}{name}\u{201d} has no x/y or x_img/y_img coordinates"
            ),
            Self::Map(e) => write!(f, "invalid map: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::Map(e) => Some(e),
            Self::MissingCoordinates(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<MapError> for LoadError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}
