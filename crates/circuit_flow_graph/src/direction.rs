// SPDX-License-Identifier: MIT OR Apache-2.0
//! The six axis-aligned port directions.
//!
//! Directions are written `+x`, `-x`, `+y`, `-y`, `+z`, `-z` in level data.
//! `+y`/`-y` are vertical; the remaining four form the horizontal rotation
//! cycle [`HORIZONTAL_CYCLE`], traversed one step per clockwise quarter turn
//! (viewed from above).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A face of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Direction {
    /// Positive X
    PosX,
    /// Negative X
    NegX,
    /// Positive Y (up)
    PosY,
    /// Negative Y (down)
    NegY,
    /// Positive Z
    PosZ,
    /// Negative Z
    NegZ,
}

/// Horizontal directions in clockwise order, one entry per quarter turn.
pub const HORIZONTAL_CYCLE: [Direction; 4] = [
    Direction::PosX,
    Direction::PosZ,
    Direction::NegX,
    Direction::NegZ,
];

impl Direction {
    /// All six directions
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// The direction facing the other way along the same axis
    pub fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    /// Whether this direction is unaffected by rotation about the vertical axis
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::PosY | Self::NegY)
    }

    /// Grid offset of the neighboring cell in this direction
    pub fn unit_vector(self) -> [i32; 3] {
        match self {
            Self::PosX => [1, 0, 0],
            Self::NegX => [-1, 0, 0],
            Self::PosY => [0, 1, 0],
            Self::NegY => [0, -1, 0],
            Self::PosZ => [0, 0, 1],
            Self::NegZ => [0, 0, -1],
        }
    }

    /// Rotate by `steps` clockwise quarter turns about the vertical axis
    pub fn rotated(self, steps: u8) -> Self {
        let Some(index) = HORIZONTAL_CYCLE.iter().position(|d| *d == self) else {
            // Vertical directions are fixed points.
            return self;
        };
        HORIZONTAL_CYCLE[(index + usize::from(steps)) % HORIZONTAL_CYCLE.len()]
    }

    /// Textual form used in level data (`+x`, `-y`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PosX => "+x",
            Self::NegX => "-x",
            Self::PosY => "+y",
            Self::NegY => "-y",
            Self::PosZ => "+z",
            Self::NegZ => "-z",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a direction from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown direction: {0:?} (expected one of +x, -x, +y, -y, +z, -z)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

impl TryFrom<String> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Direction> for &'static str {
    fn from(direction: Direction) -> Self {
        direction.as_str()
    }
}
