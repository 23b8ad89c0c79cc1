//! Turn classification from three consecutive positions.

use std::fmt;

use crate::point::Point;

/// Direction change at the middle of three consecutive positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Left,
    Right,
    Straight,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Straight => "straight",
        })
    }
}

/// Classify the turn made at `p2` when walking `p1 -> p2 -> p3`.
///
/// Uses the sign of the cross product of the incoming vector (`p2 - p1`) and
/// the outgoing vector (`p3 - p2`): positive is [`Turn::Left`], negative is
/// [`Turn::Right`] and exactly zero is [`Turn::Straight`].
///
/// The zero test is exact. Nearly collinear points whose cross product is a
/// tiny non-zero value still report a turn; callers wanting a tolerance must
/// apply it themselves.
///
/// Left/right are named for a y-up frame. In image coordinates (y down) the
/// visual sense is mirrored.
pub fn turn(p1: Point, p2: Point, p3: Point) -> Turn {
    let c = (p2 - p1).cross(p3 - p2);
    if c > 0.0 {
        Turn::Left
    } else if c < 0.0 {
        Turn::Right
    } else {
        Turn::Straight
    }
}
