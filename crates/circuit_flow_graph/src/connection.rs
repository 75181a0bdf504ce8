// SPDX-License-Identifier: MIT OR Apache-2.0
//! Adjacency edges between facing ports.

use crate::direction::Direction;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Two grid-adjacent pieces whose ports face each other.
///
/// `from` exposes a port towards `via`; `to` sits in the next cell along
/// `via` and exposes `via.opposite()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Node the edge was discovered from
    pub from: NodeId,
    /// Neighboring node
    pub to: NodeId,
    /// Direction from `from` towards `to`
    pub via: Direction,
}

impl Connection {
    /// Create a new connection
    pub fn new(from: NodeId, to: NodeId, via: Direction) -> Self {
        Self { from, to, via }
    }
}
