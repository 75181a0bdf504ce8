// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port sets and the rotation transform.

use crate::direction::Direction;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of quarter turns applied about the vertical axis, always in `0..=3`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rotation(u8);

impl Rotation {
    /// Unrotated
    pub const ZERO: Rotation = Rotation(0);

    /// Number of distinct rotations
    pub const STEPS: u8 = 4;

    /// Create a rotation, wrapping `steps` into `0..=3`
    pub fn new(steps: u8) -> Self {
        Self(steps % Self::STEPS)
    }

    /// Quarter turns as a number in `0..=3`
    pub fn steps(self) -> u8 {
        self.0
    }

    /// One further clockwise quarter turn
    pub fn next(self) -> Self {
        Self::new(self.0 + 1)
    }

    /// Rotation angle in radians (for renderers)
    pub fn radians(self) -> f32 {
        f32::from(self.0) * std::f32::consts::FRAC_PI_2
    }
}

/// Rotation value outside `0..=3` in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rotation must be between 0 and 3, got {0}")]
pub struct InvalidRotation(pub u8);

impl TryFrom<u8> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < Self::STEPS {
            Ok(Self(value))
        } else {
            Err(InvalidRotation(value))
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered set of port directions on a piece.
///
/// Iteration follows insertion order. Rotating a set remaps every
/// direction in place, so the rotated set iterates in the order of the
/// original entries. Neighbor enumeration (and therefore BFS tie-breaking)
/// relies on this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortSet(IndexSet<Direction>);

impl PortSet {
    /// Create an empty port set
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    /// Add a port; returns `false` if it was already present
    pub fn insert(&mut self, direction: Direction) -> bool {
        self.0.insert(direction)
    }

    /// Check whether a port faces `direction`
    pub fn contains(&self, direction: Direction) -> bool {
        self.0.contains(&direction)
    }

    /// Iterate ports in order
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.iter().copied()
    }

    /// Number of ports
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no ports
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The set after `rotation` clockwise quarter turns
    pub fn rotated(&self, rotation: Rotation) -> PortSet {
        self.iter().map(|d| d.rotated(rotation.steps())).collect()
    }
}

impl FromIterator<Direction> for PortSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Direction; N]> for PortSet {
    fn from(directions: [Direction; N]) -> Self {
        directions.into_iter().collect()
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{d}")?;
        }
        f.write_str("}")
    }
}

/// Effective ports of a piece with the given base ports and rotation
pub fn effective_ports(base: &PortSet, rotation: Rotation) -> PortSet {
    base.rotated(rotation)
}
