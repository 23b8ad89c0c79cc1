//! Turn-by-turn directions.

use std::fmt;

use floorway_geom::{Point, Turn, turn};

/// One human-readable direction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instruction {
    /// Turn (or keep going) at an intermediate waypoint.
    Turn(Turn),
    /// The final step, naming the goal.
    Arrive(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turn(Turn::Left) => f.write_str("Turn left"),
            Self::Turn(Turn::Right) => f.write_str("Turn right"),
            Self::Turn(Turn::Straight) => f.write_str("Continue straight"),
            Self::Arrive(goal) => write!(f, "Arrive at {goal}"),
        }
    }
}

/// Directions for walking through `points` to `goal`.
///
/// One turn per consecutive triple (so `len - 2` turns for three or more
/// points, none otherwise) followed by exactly one [`Instruction::Arrive`].
pub fn build_itinerary(points: &[Point], goal: impl Into<String>) -> Vec<Instruction> {
    let mut out: Vec<Instruction> = points
        .windows(3)
        .map(|w| Instruction::Turn(turn(w[0], w[1], w[2])))
        .collect();
    out.push(Instruction::Arrive(goal.into()));
    out
}

/// Number instructions for display, starting at 1.
pub fn numbered(steps: &[Instruction]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect()
}
