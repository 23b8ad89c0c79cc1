use std::fmt;

/// Why a corridor was rejected as degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Both endpoints name the same waypoint.
    SameEndpoints,
    /// An explicit shape with fewer than two points (holds the count).
    ShortShape(usize),
}

/// Errors raised while building a [`MapGraph`](crate::MapGraph) or resolving
/// names against one.
///
/// Unreachable destinations are not errors: searches report them as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// A corridor, query or exclusion names a waypoint that does not exist.
    UnknownWaypoint(String),
    /// Two waypoints share a name.
    DuplicateWaypoint(String),
    /// A waypoint position is NaN or infinite.
    InvalidPosition(String),
    /// A corridor cannot be walked.
    DegenerateCorridor {
        a: String,
        b: String,
        reason: Degeneracy,
    },
    /// A corridor shape holds a non-finite point, or its length overflows.
    InvalidShape { a: String, b: String },
    /// A second corridor joins an already connected pair.
    DuplicateCorridor { a: String, b: String },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWaypoint(name) => write!(f, "unknown waypoint \u{201c}{name}\u{201d}"),
            Self::DuplicateWaypoint(name) => {
                write!(f, "waypoint \u{201c}{name}\u{201d} is defined more than once")
            }
            Self::InvalidPosition(name) => {
                write!(f, "waypoint \u{201c}{name}\u{201d} has a non-finite position")
            }
            Self::DegenerateCorridor { a, b, reason } => match reason {
                Degeneracy::SameEndpoints => {
                    write!(f, "degenerate corridor {a}-{b}: both endpoints are the same")
                }
                Degeneracy::ShortShape(n) => write!(
                    f,
                    "degenerate corridor {a}-{b}: shape has {n} point(s), need at least 2"
                ),
            },
            Self::InvalidShape { a, b } => {
                write!(f, "corridor {a}-{b} has a non-finite shape or length")
            }
            Self::DuplicateCorridor { a, b } => {
                write!(f, "corridor {a}-{b} is defined more than once")
            }
        }
    }
}

impl std::error::Error for MapError {}
