// SPDX-License-Identifier: MIT OR Apache-2.0
//! Puzzle pieces: authored definitions and live nodes.

use crate::direction::Direction;
use crate::port::{PortSet, Rotation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node within a level, assigned from 1 in definition order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer cell coordinates `(x, y, z)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos(pub i32, pub i32, pub i32);

impl GridPos {
    /// The adjacent cell in `direction`
    pub fn step(self, direction: Direction) -> GridPos {
        let [dx, dy, dz] = direction.unit_vector();
        GridPos(self.0 + dx, self.1 + dy, self.2 + dz)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

/// What a piece does in the circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// Where the current starts
    Source,
    /// Rotatable conductor
    Wire,
    /// Where the current must arrive
    Target,
}

impl NodeRole {
    /// Whether the player may rotate pieces with this role
    pub fn is_rotatable(self) -> bool {
        matches!(self, Self::Wire)
    }

    /// Lowercase name as used in level data
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Wire => "wire",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authored piece: `(grid, role, ports, rotation)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDef {
    /// Cell occupied by the piece
    pub grid: GridPos,
    /// Role in the circuit
    pub role: NodeRole,
    /// Ports of the unrotated piece
    pub ports: PortSet,
    /// Initial rotation
    #[serde(default)]
    pub rotation: Rotation,
}

impl NodeDef {
    /// Create a definition
    pub fn new(
        grid: GridPos,
        role: NodeRole,
        ports: impl Into<PortSet>,
        rotation: u8,
    ) -> Self {
        Self {
            grid,
            role,
            ports: ports.into(),
            rotation: Rotation::new(rotation),
        }
    }
}

/// A live piece in the active level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier
    pub id: NodeId,
    /// Cell occupied by the piece
    pub grid: GridPos,
    /// Role in the circuit
    pub role: NodeRole,
    /// Ports of the unrotated piece
    pub base_ports: PortSet,
    /// Current rotation
    rotation: Rotation,
}

impl Node {
    /// Instantiate a definition with the given id
    pub fn from_def(id: NodeId, def: &NodeDef) -> Self {
        Self {
            id,
            grid: def.grid,
            role: def.role,
            base_ports: def.ports.clone(),
            rotation: def.rotation,
        }
    }

    /// Current rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Ports after applying the current rotation
    pub fn effective_ports(&self) -> PortSet {
        self.base_ports.rotated(self.rotation)
    }

    /// Whether the piece exposes a port facing `direction`
    pub fn has_port(&self, direction: Direction) -> bool {
        self.effective_ports().contains(direction)
    }

    /// Turn a wire one quarter clockwise.
    ///
    /// Returns `false` and leaves the node untouched for sources and targets.
    pub fn rotate_once(&mut self) -> bool {
        if !self.role.is_rotatable() {
            return false;
        }
        self.rotation = self.rotation.next();
        true
    }

    /// World-space center of the piece for cells `spacing` units apart
    pub fn world_position(&self, spacing: f32) -> [f32; 3] {
        [
            self.grid.0 as f32 * spacing,
            self.grid.1 as f32 * spacing,
            self.grid.2 as f32 * spacing,
        ]
    }
}
