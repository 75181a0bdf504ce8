// SPDX-License-Identifier: MIT OR Apache-2.0
//! The live circuit of a level and its adjacency.

use crate::catalog::LevelDef;
use crate::connection::Connection;
use crate::node::{GridPos, Node, NodeDef, NodeId, NodeRole};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Nodes of one level with their current rotations.
///
/// Nodes are stored by id in definition order and indexed by cell, so
/// neighbor lookups are O(1) per port.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Level number this circuit was generated from
    pub level: u32,
    /// Level name
    pub name: String,
    /// Nodes by id
    nodes: IndexMap<NodeId, Node>,
    /// Occupant of each cell
    cells: HashMap<GridPos, NodeId>,
}

impl Circuit {
    /// Create an empty circuit
    pub fn new(level: u32, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
            nodes: IndexMap::new(),
            cells: HashMap::new(),
        }
    }

    /// Generate the circuit for an authored level, with authored rotations
    pub fn from_level(level: u32, def: &LevelDef) -> Self {
        debug_assert!(
            def.validate().is_ok(),
            "level {level} is malformed: {:?}",
            def.validate()
        );

        let mut circuit = Self::new(level, def.name.clone());
        for node in &def.nodes {
            circuit.add_node(node);
        }
        circuit
    }

    /// Add a node, assigning the next id.
    ///
    /// If the cell is already occupied the first occupant keeps the cell
    /// for adjacency purposes.
    pub fn add_node(&mut self, def: &NodeDef) -> NodeId {
        let id = NodeId(self.nodes.len() as u32 + 1);
        if let Some(existing) = self.cells.get(&def.grid) {
            tracing::warn!(
                "Node {id} shares cell {} with node {existing}; ignoring it for adjacency",
                def.grid
            );
        } else {
            self.cells.insert(def.grid, id);
        }
        self.nodes.insert(id, Node::from_def(id, def));
        id
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// All nodes in definition order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All node IDs in definition order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node occupying a cell
    pub fn node_at(&self, grid: GridPos) -> Option<&Node> {
        self.cells.get(&grid).and_then(|id| self.nodes.get(id))
    }

    /// The first source node
    pub fn source(&self) -> Option<&Node> {
        self.first_with_role(NodeRole::Source)
    }

    /// The first target node
    pub fn target(&self) -> Option<&Node> {
        self.first_with_role(NodeRole::Target)
    }

    fn first_with_role(&self, role: NodeRole) -> Option<&Node> {
        self.nodes.values().find(|n| n.role == role)
    }

    /// Connected neighbors of a node.
    ///
    /// Enumerated in the order of the node's effective ports. A neighbor is
    /// only included when its own effective ports contain the opposite
    /// direction; a port facing a portless face connects nothing.
    pub fn neighbors(&self, node_id: NodeId) -> Vec<Connection> {
        let Some(node) = self.nodes.get(&node_id) else {
            return Vec::new();
        };

        node.effective_ports()
            .iter()
            .filter_map(|via| {
                let neighbor = self.node_at(node.grid.step(via))?;
                neighbor
                    .has_port(via.opposite())
                    .then_some(Connection::new(node.id, neighbor.id, via))
            })
            .collect()
    }

    /// Every edge once, oriented from the lower id
    pub fn connections(&self) -> Vec<Connection> {
        self.node_ids()
            .flat_map(|id| self.neighbors(id))
            .filter(|c| c.from < c.to)
            .collect()
    }

    /// Check the one-source, one-target, one-node-per-cell rules
    pub fn validate(&self) -> Result<(), LevelError> {
        check_layout(self.nodes.values().map(|n| (n.grid, n.role)))
    }
}

/// Structural problem in a level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// Level has no nodes at all
    #[error("Level has no nodes")]
    EmptyLevel,

    /// No source node
    #[error("Level has no source")]
    MissingSource,

    /// No target node
    #[error("Level has no target")]
    MissingTarget,

    /// More than one source node
    #[error("Level has more than one source")]
    DuplicateSource,

    /// More than one target node
    #[error("Level has more than one target")]
    DuplicateTarget,

    /// Two nodes in the same cell
    #[error("Two nodes occupy cell {0}")]
    DuplicateCell(GridPos),
}

pub(crate) fn check_layout(
    pieces: impl Iterator<Item = (GridPos, NodeRole)>,
) -> Result<(), LevelError> {
    let mut cells = std::collections::HashSet::new();
    let mut sources = 0usize;
    let mut targets = 0usize;

    for (grid, role) in pieces {
        if !cells.insert(grid) {
            return Err(LevelError::DuplicateCell(grid));
        }
        match role {
            NodeRole::Source => sources += 1,
            NodeRole::Target => targets += 1,
            NodeRole::Wire => {}
        }
    }

    if cells.is_empty() {
        return Err(LevelError::EmptyLevel);
    }
    match (sources, targets) {
        (0, _) => Err(LevelError::MissingSource),
        (_, 0) => Err(LevelError::MissingTarget),
        (s, _) if s > 1 => Err(LevelError::DuplicateSource),
        (_, t) if t > 1 => Err(LevelError::DuplicateTarget),
        _ => Ok(()),
    }
}
