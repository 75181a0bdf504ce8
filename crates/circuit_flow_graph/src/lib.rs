// SPDX-License-Identifier: MIT OR Apache-2.0
//! Circuit connectivity engine for Circuit Flow.
//!
//! The puzzle places cube-shaped pieces on a 3D grid. Each piece exposes
//! ports on some of its six faces; the player turns wire pieces about the
//! vertical axis until facing ports form a path from the source to the
//! target.
//!
//! ## Architecture
//!
//! - [`direction`]: the six port directions and the horizontal rotation cycle
//! - [`port`]: port sets and the rotation transform
//! - [`node`]: authored and live pieces
//! - [`graph`]: the live circuit and its adjacency
//! - [`evaluation`]: breadth-first reachability from source to target
//! - [`catalog`]: authored levels, embedded as RON
//! - [`controller`]: the single owner of the active level's state
//!
//! Nothing here renders or reads input; a front-end reads
//! [`PuzzleController::nodes`] and [`PuzzleController::connectivity`] and
//! issues [`PuzzleController::rotate`] and level commands.

pub mod direction;
pub mod port;
pub mod node;
pub mod connection;
pub mod graph;
pub mod evaluation;
pub mod catalog;
pub mod controller;

pub use direction::{Direction, HORIZONTAL_CYCLE};
pub use port::{effective_ports, PortSet, Rotation};
pub use node::{GridPos, Node, NodeDef, NodeId, NodeRole};
pub use connection::Connection;
pub use graph::{Circuit, LevelError};
pub use evaluation::{evaluate, reachable, Connectivity};
pub use catalog::{CatalogError, LevelCatalog, LevelDef};
pub use controller::{ControllerError, PuzzleController, RotateOutcome};
