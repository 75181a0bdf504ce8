// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reachability from the source to the target.
//!
//! [`evaluate`] runs a breadth-first search from the source over the
//! adjacency of [`Circuit::neighbors`]. The reported path is a shortest one
//! in hops. Among equally short paths the one found first wins, which
//! follows the order of each node's effective ports (base port order,
//! remapped in place by rotation), so results are deterministic.

use crate::graph::Circuit;
use crate::node::{GridPos, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Result of evaluating a circuit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    /// Whether current flows from the source to the target
    pub connected: bool,
    /// Shortest path from the source to the target, when connected
    pub path: Option<Vec<NodeId>>,
}

impl Connectivity {
    /// No path
    pub fn disconnected() -> Self {
        Self::default()
    }

    fn through(path: Vec<NodeId>) -> Self {
        Self {
            connected: true,
            path: Some(path),
        }
    }

    /// Whether a node lies on the powered path
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.path.as_ref().is_some_and(|p| p.contains(&node_id))
    }

    /// Number of edges on the path
    pub fn hops(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }

    /// Resolve the path to nodes of `circuit`
    pub fn path_nodes<'a>(&self, circuit: &'a Circuit) -> Vec<&'a Node> {
        self.path
            .iter()
            .flatten()
            .filter_map(|id| circuit.node(*id))
            .collect()
    }
}

/// Find whether the target is reachable from the source, and how.
///
/// A circuit without a source or a target evaluates as disconnected.
pub fn evaluate(circuit: &Circuit) -> Connectivity {
    let (Some(source), Some(target)) = (circuit.source(), circuit.target()) else {
        tracing::debug!("Level {} lacks a source or target", circuit.level);
        return Connectivity::disconnected();
    };
    if source.id == target.id {
        return Connectivity::through(vec![source.id]);
    }

    let mut queue = VecDeque::from([source.id]);
    let mut visited: HashSet<GridPos> = HashSet::from([source.grid]);
    let mut previous: HashMap<NodeId, NodeId> = HashMap::new();

    while let Some(current) = queue.pop_front() {
        if current == target.id {
            break;
        }
        for edge in circuit.neighbors(current) {
            let Some(next) = circuit.node(edge.to) else {
                continue;
            };
            if !visited.insert(next.grid) {
                continue;
            }
            previous.insert(next.id, current);
            queue.push_back(next.id);
        }
    }

    if !previous.contains_key(&target.id) {
        return Connectivity::disconnected();
    }

    let mut path = vec![target.id];
    let mut current = target.id;
    while current != source.id {
        let Some(&prev) = previous.get(&current) else {
            return Connectivity::disconnected();
        };
        path.push(prev);
        current = prev;
    }
    path.reverse();

    tracing::debug!("Level {} connected in {} hops", circuit.level, path.len() - 1);
    Connectivity::through(path)
}

/// Every node that current from `start` can reach, `start` included
pub fn reachable(circuit: &Circuit, start: NodeId) -> HashSet<NodeId> {
    let mut seen = HashSet::new();
    if circuit.node(start).is_none() {
        return seen;
    }

    let mut queue = VecDeque::from([start]);
    seen.insert(start);
    while let Some(current) = queue.pop_front() {
        for edge in circuit.neighbors(current) {
            if seen.insert(edge.to) {
                queue.push_back(edge.to);
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction::{self, *};
    use crate::node::{NodeDef, NodeRole};
    use crate::port::PortSet;
    use proptest::prelude::*;

    fn circuit(defs: &[NodeDef]) -> Circuit {
        let mut circuit = Circuit::new(0, "test");
        for d in defs {
            circuit.add_node(d);
        }
        circuit
    }

    fn straight_line(wire_rotation: u8) -> Circuit {
        circuit(&[
            NodeDef::new(GridPos(0, 0, 0), NodeRole::Source, [PosX], 0),
            NodeDef::new(GridPos(1, 0, 0), NodeRole::Wire, [NegX, PosX], wire_rotation),
            NodeDef::new(GridPos(2, 0, 0), NodeRole::Target, [NegX], 0),
        ])
    }

    #[test]
    fn test_straight_line_connects() {
        let c = straight_line(0);
        let result = evaluate(&c);
        assert!(result.connected);
        assert_eq!(result.path, Some(vec![NodeId(1), NodeId(2), NodeId(3)]));
        assert_eq!(result.hops(), Some(2));
        assert!(result.contains(NodeId(2)));
        assert_eq!(
            result.path_nodes(&c).iter().map(|n| n.grid).collect::<Vec<_>>(),
            vec![GridPos(0, 0, 0), GridPos(1, 0, 0), GridPos(2, 0, 0)]
        );
    }

    #[test]
    fn test_turning_the_only_wire_breaks_and_restores() {
        let mut c = straight_line(0);
        assert!(evaluate(&c).connected);

        c.node_mut(NodeId(2)).unwrap().rotate_once();
        let broken = evaluate(&c);
        assert!(!broken.connected);
        assert_eq!(broken.path, None);
        assert!(!broken.contains(NodeId(1)));

        for _ in 0..3 {
            c.node_mut(NodeId(2)).unwrap().rotate_once();
        }
        assert_eq!(evaluate(&c), evaluate(&straight_line(0)));
    }

    #[test]
    fn test_missing_endpoints_are_disconnected() {
        let no_target = circuit(&[
            NodeDef::new(GridPos(0, 0, 0), NodeRole::Source, [PosX], 0),
            NodeDef::new(GridPos(1, 0, 0), NodeRole::Wire, [NegX, PosX], 0),
        ]);
        assert_eq!(evaluate(&no_target), Connectivity::disconnected());

        let no_source = circuit(&[
            NodeDef::new(GridPos(1, 0, 0), NodeRole::Wire, [NegX, PosX], 0),
            NodeDef::new(GridPos(2, 0, 0), NodeRole::Target, [NegX], 0),
        ]);
        assert_eq!(evaluate(&no_source), Connectivity::disconnected());
        assert_eq!(evaluate(&Circuit::new(0, "empty")), Connectivity::disconnected());
    }

    #[test]
    fn test_ties_follow_port_order() {
        let square = |source_ports: [Direction; 2]| {
            circuit(&[
                NodeDef::new(GridPos(0, 0, 0), NodeRole::Source, source_ports, 0),
                NodeDef::new(GridPos(0, 0, 1), NodeRole::Wire, [NegZ, PosX], 0),
                NodeDef::new(GridPos(1, 0, 0), NodeRole::Wire, [NegX, PosZ], 0),
                NodeDef::new(GridPos(1, 0, 1), NodeRole::Target, [NegX, NegZ], 0),
            ])
        };

        let via_z = evaluate(&square([PosZ, PosX]));
        assert_eq!(via_z.path, Some(vec![NodeId(1), NodeId(2), NodeId(4)]));

        let via_x = evaluate(&square([PosX, PosZ]));
        assert_eq!(via_x.path, Some(vec![NodeId(1), NodeId(3), NodeId(4)]));
    }

    #[test]
    fn test_prefers_shorter_route() {
        // A long detour through y=1 and a direct two-hop route.
        let c = circuit(&[
            NodeDef::new(GridPos(0, 0, 0), NodeRole::Source, [PosY, PosX], 0),
            NodeDef::new(GridPos(0, 1, 0), NodeRole::Wire, [NegY, PosX], 0),
            NodeDef::new(GridPos(1, 1, 0), NodeRole::Wire, [NegX, PosX], 0),
            NodeDef::new(GridPos(2, 1, 0), NodeRole::Wire, [NegX, NegY], 0),
            NodeDef::new(GridPos(1, 0, 0), NodeRole::Wire, [NegX, PosX], 0),
            NodeDef::new(GridPos(2, 0, 0), NodeRole::Target, [NegX, PosY], 0),
        ]);
        let result = evaluate(&c);
        assert_eq!(result.path, Some(vec![NodeId(1), NodeId(5), NodeId(6)]));
    }

    #[test]
    fn test_reachable_floods_component() {
        let c = straight_line(1);
        assert_eq!(reachable(&c, NodeId(1)), HashSet::from([NodeId(1)]));
        let c = straight_line(2);
        assert_eq!(
            reachable(&c, NodeId(1)),
            HashSet::from([NodeId(1), NodeId(2), NodeId(3)])
        );
        assert!(reachable(&c, NodeId(9)).is_empty());
    }

    // Random levels on a 3x2x2 box, source in the first cell and target in
    // the last.
    fn cells() -> Vec<GridPos> {
        let mut cells = Vec::new();
        for x in 0..3 {
            for y in 0..2 {
                for z in 0..2 {
                    cells.push(GridPos(x, y, z));
                }
            }
        }
        cells
    }

    fn port_set() -> impl Strategy<Value = PortSet> {
        proptest::sample::subsequence(Direction::ALL.to_vec(), 1..=4)
            .prop_shuffle()
            .prop_map(PortSet::from_iter)
    }

    fn layout() -> impl Strategy<Value = Vec<Option<(PortSet, u8)>>> {
        proptest::collection::vec(proptest::option::weighted(0.8, (port_set(), 0u8..4)), 12)
    }

    fn build(layout: &[Option<(PortSet, u8)>]) -> Circuit {
        let cells = cells();
        let last = cells.len() - 1;
        let mut c = Circuit::new(0, "random");
        for (i, (grid, slot)) in cells.into_iter().zip(layout).enumerate() {
            let role = match i {
                0 => NodeRole::Source,
                i if i == last => NodeRole::Target,
                _ => NodeRole::Wire,
            };
            let (ports, rotation) = match slot {
                Some((ports, rotation)) => (ports.clone(), *rotation),
                None if role != NodeRole::Wire => (PortSet::from(Direction::ALL), 0),
                None => continue,
            };
            c.add_node(&NodeDef::new(grid, role, ports, rotation));
        }
        c
    }

    fn shortest_by_enumeration(c: &Circuit, from: NodeId, to: NodeId) -> Option<usize> {
        fn walk(c: &Circuit, to: NodeId, trail: &mut Vec<NodeId>, best: &mut Option<usize>) {
            let current = *trail.last().unwrap();
            if current == to {
                let hops = trail.len() - 1;
                *best = Some(best.map_or(hops, |b| b.min(hops)));
                return;
            }
            for edge in c.neighbors(current) {
                if !trail.contains(&edge.to) {
                    trail.push(edge.to);
                    walk(c, to, trail, best);
                    trail.pop();
                }
            }
        }

        let mut best = None;
        walk(c, to, &mut vec![from], &mut best);
        best
    }

    proptest! {
        #[test]
        fn prop_path_is_shortest(layout in layout()) {
            let c = build(&layout);
            let source = c.source().unwrap().id;
            let target = c.target().unwrap().id;
            let result = evaluate(&c);

            let expected = shortest_by_enumeration(&c, source, target);
            prop_assert_eq!(result.connected, expected.is_some());
            prop_assert_eq!(result.hops(), expected);

            if let Some(path) = &result.path {
                prop_assert_eq!(path.first(), Some(&source));
                prop_assert_eq!(path.last(), Some(&target));
                for pair in path.windows(2) {
                    prop_assert!(c.neighbors(pair[0]).iter().any(|e| e.to == pair[1]));
                }
            }
        }

        #[test]
        fn prop_turning_unpowered_wire_keeps_reach(layout in layout()) {
            let c = build(&layout);
            let source = c.source().unwrap().id;
            let before = reachable(&c, source);
            let connected = evaluate(&c).connected;

            let unpowered: Vec<NodeId> = c
                .nodes()
                .filter(|n| n.role == NodeRole::Wire && !before.contains(&n.id))
                .map(|n| n.id)
                .collect();
            for id in unpowered {
                let mut turned = c.clone();
                prop_assert!(turned.node_mut(id).unwrap().rotate_once());
                prop_assert!(reachable(&turned, source).is_superset(&before));
                prop_assert!(!connected || evaluate(&turned).connected);
            }
        }
    }
}
