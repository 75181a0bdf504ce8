// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interaction controller: the single owner of the active level's state.
//!
//! Every mutation (rotating a piece, loading or resetting a level) is
//! followed by a fresh [`evaluate`] run, so [`PuzzleController::connectivity`]
//! always reflects the most recent command.

use crate::catalog::LevelCatalog;
use crate::evaluation::{evaluate, Connectivity};
use crate::graph::Circuit;
use crate::node::{Node, NodeId};
use crate::port::Rotation;

/// What a rotate command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// The wire turned one quarter clockwise
    Rotated {
        /// Rotated node
        id: NodeId,
        /// Its new rotation
        rotation: Rotation,
    },
    /// The node is a source or target and cannot turn
    Fixed(NodeId),
    /// No node with this id in the level
    UnknownNode(NodeId),
}

impl RotateOutcome {
    /// Whether the command changed the level
    pub fn applied(&self) -> bool {
        matches!(self, Self::Rotated { .. })
    }
}

/// Error from a level command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// Level number outside the catalog
    #[error("Level {requested} does not exist (levels 1-{count})")]
    LevelOutOfRange {
        /// Requested level
        requested: u32,
        /// Number of levels in the catalog
        count: u32,
    },
}

/// Owns the catalog, the active level and its connectivity
#[derive(Debug, Clone)]
pub struct PuzzleController {
    catalog: LevelCatalog,
    circuit: Circuit,
    connectivity: Connectivity,
    moves: u32,
}

impl PuzzleController {
    /// Start at level 1 of `catalog`
    pub fn new(catalog: LevelCatalog) -> Result<Self, ControllerError> {
        Self::with_level(catalog, 1)
    }

    /// Start at a given level of `catalog`
    pub fn with_level(catalog: LevelCatalog, level: u32) -> Result<Self, ControllerError> {
        let circuit = generate(&catalog, level)?;
        let connectivity = evaluate(&circuit);
        tracing::info!("Loaded level {level}: {}", circuit.name);
        Ok(Self {
            catalog,
            circuit,
            connectivity,
            moves: 0,
        })
    }

    /// Turn a wire one quarter clockwise.
    ///
    /// Sources, targets and unknown ids are left alone. Connectivity is
    /// recomputed in every case.
    pub fn rotate(&mut self, node_id: NodeId) -> RotateOutcome {
        let outcome = match self.circuit.node_mut(node_id) {
            None => RotateOutcome::UnknownNode(node_id),
            Some(node) => {
                if node.rotate_once() {
                    RotateOutcome::Rotated {
                        id: node_id,
                        rotation: node.rotation(),
                    }
                } else {
                    RotateOutcome::Fixed(node_id)
                }
            }
        };

        if outcome.applied() {
            self.moves += 1;
        }
        self.recompute();
        tracing::debug!(?outcome, connected = self.connectivity.connected, "rotate");
        outcome
    }

    /// Replace the active level with a fresh copy of `level`
    pub fn reset(&mut self, level: u32) -> Result<(), ControllerError> {
        let circuit = generate(&self.catalog, level)?;
        self.circuit = circuit;
        self.moves = 0;
        self.recompute();
        tracing::info!("Loaded level {level}: {}", self.circuit.name);
        Ok(())
    }

    /// Switch to `level`, discarding all rotations
    pub fn load_level(&mut self, level: u32) -> Result<(), ControllerError> {
        self.reset(level)
    }

    /// Reset the active level to its authored rotations
    pub fn restart(&mut self) {
        let level = self.level();
        if let Err(err) = self.reset(level) {
            tracing::error!("Failed to restart level {level}: {err}");
        }
    }

    /// Advance to the next level; the last level has no successor
    pub fn next_level(&mut self) -> Result<(), ControllerError> {
        self.load_level(self.level().saturating_add(1))
    }

    /// Go back one level; level 1 has no predecessor
    pub fn previous_level(&mut self) -> Result<(), ControllerError> {
        self.load_level(self.level().saturating_sub(1))
    }

    fn recompute(&mut self) {
        self.connectivity = evaluate(&self.circuit);
    }

    /// Active level number
    pub fn level(&self) -> u32 {
        self.circuit.level
    }

    /// Active level name
    pub fn level_name(&self) -> &str {
        &self.circuit.name
    }

    /// Number of levels available
    pub fn level_count(&self) -> u32 {
        self.catalog.level_count()
    }

    /// The catalog levels are generated from
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// The live circuit
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Nodes with their current rotations
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.circuit.nodes()
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.circuit.node(node_id)
    }

    /// Connectivity after the most recent command
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Whether the circuit is closed
    pub fn is_connected(&self) -> bool {
        self.connectivity.connected
    }

    /// Nodes on the powered path, source first
    pub fn path_nodes(&self) -> Vec<&Node> {
        self.connectivity.path_nodes(&self.circuit)
    }

    /// Rotations applied since the level was loaded
    pub fn moves(&self) -> u32 {
        self.moves
    }
}

fn generate(catalog: &LevelCatalog, level: u32) -> Result<Circuit, ControllerError> {
    let def = catalog
        .level(level)
        .ok_or(ControllerError::LevelOutOfRange {
            requested: level,
            count: catalog.level_count(),
        })?;
    Ok(Circuit::from_level(level, def))
}
