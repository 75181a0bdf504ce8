// SPDX-License-Identifier: MIT OR Apache-2.0
//! Text and JSON views of the board.

use circuit_flow_graph::{
    Connection, GridPos, LevelCatalog, NodeId, NodeRole, PortSet, PuzzleController,
};
use serde::Serialize;

/// One piece as shown to the player
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    /// Node id, used by `rotate`
    pub id: NodeId,
    /// Cell
    pub grid: GridPos,
    /// World-space center
    pub position: [f32; 3],
    /// Role
    pub role: NodeRole,
    /// Quarter turns applied
    pub rotation: u8,
    /// Rotation about the vertical axis in radians
    pub angle: f32,
    /// Unrotated ports
    pub base_ports: PortSet,
    /// Ports after rotation
    pub ports: PortSet,
    /// On the powered path
    pub active: bool,
}

/// Everything a front-end needs to draw the current state
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    /// Active level number
    pub level: u32,
    /// Number of levels
    pub level_count: u32,
    /// Level name
    pub name: String,
    /// Rotations since the level was loaded
    pub moves: u32,
    /// Whether the circuit is closed
    pub connected: bool,
    /// Powered path, source first
    pub path: Option<Vec<NodeId>>,
    /// Pieces in id order
    pub nodes: Vec<NodeView>,
    /// Every link between facing ports, lower id first
    pub edges: Vec<Connection>,
}

impl BoardSnapshot {
    /// Capture the controller's current state
    pub fn capture(controller: &PuzzleController, spacing: f32) -> Self {
        let connectivity = controller.connectivity();
        let nodes = controller
            .nodes()
            .map(|node| NodeView {
                id: node.id,
                grid: node.grid,
                position: node.world_position(spacing),
                role: node.role,
                rotation: node.rotation().steps(),
                angle: node.rotation().radians(),
                base_ports: node.base_ports.clone(),
                ports: node.effective_ports(),
                active: connectivity.contains(node.id),
            })
            .collect();

        Self {
            level: controller.level(),
            level_count: controller.level_count(),
            name: controller.level_name().to_string(),
            moves: controller.moves(),
            connected: connectivity.connected,
            path: connectivity.path.clone(),
            nodes,
            edges: controller.circuit().connections(),
        }
    }

    /// Serialize as a single JSON line
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Board as text: a header, one line per piece, the links and the status line
pub fn render_board(snapshot: &BoardSnapshot, show_base_ports: bool) -> String {
    let mut out = format!(
        "Level {}/{}: {} (moves: {})\n",
        snapshot.level, snapshot.level_count, snapshot.name, snapshot.moves
    );

    for node in &snapshot.nodes {
        let marker = if node.active { '*' } else { ' ' };
        out.push_str(&format!(
            "{marker} {:>2} {:<6} {:<10} rot {} ports {}",
            node.id.0,
            node.role.as_str(),
            node.grid.to_string(),
            node.rotation,
            node.ports
        ));
        if show_base_ports {
            out.push_str(&format!(" base {}", node.base_ports));
        }
        out.push('\n');
    }

    out.push_str(&render_links(&snapshot.edges));
    out.push('\n');
    out.push_str(&render_status(snapshot));
    out.push('\n');
    out
}

/// Linked pairs as `1-2 (+x)`, in edge order
pub fn render_links(edges: &[Connection]) -> String {
    if edges.is_empty() {
        return "Links: none".to_string();
    }
    let links: Vec<String> = edges
        .iter()
        .map(|edge| format!("{}-{} ({})", edge.from, edge.to, edge.via))
        .collect();
    format!("Links: {}", links.join(", "))
}

/// One-line connectivity summary
pub fn render_status(snapshot: &BoardSnapshot) -> String {
    match &snapshot.path {
        Some(path) if snapshot.connected => {
            let route: Vec<String> = path.iter().map(ToString::to_string).collect();
            format!("Circuit closed! Current flows {}", route.join(" -> "))
        }
        _ => "Circuit open - rotate wires to connect source and target".to_string(),
    }
}

/// Level list with the active level marked
pub fn render_levels(catalog: &LevelCatalog, current: u32) -> String {
    catalog
        .numbered()
        .map(|(number, level)| {
            let marker = if number == current { '>' } else { ' ' };
            format!(
                "{marker} {number:>2}. {} ({} pieces)\n",
                level.name,
                level.nodes.len()
            )
        })
        .collect()
}

/// Command reference
pub const HELP: &str = "\
Commands:
  rotate <id> | r <id>   turn a wire a quarter clockwise
  reset                  restore the level's starting rotations
  level <n>              switch to level n
  next | prev            move between levels
  show                   print the board
  json                   print the board as JSON
  levels                 list all levels
  help                   this text
  quit                   leave the game
";
