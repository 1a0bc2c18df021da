//! Capacity-scaled breadth-first search for augmenting paths
//!
//! A neighbour is admissible only when its edge still has residual capacity
//! of at least the current threshold. Lowering the threshold between rounds
//! is what turns plain Edmonds-Karp into the Δ-scaling variant.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use log::trace;

use crate::data_structures::{Capacity, FlowNetwork, NodeId, Path};

/// Path discovered by the search, with the forward edges it uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    /// Vertices from source to target
    pub nodes: Path,
    /// Edge indices, `edges[i]` joins `nodes[i]` and `nodes[i + 1]`
    pub edges: Vec<usize>,
}

impl AugmentingPath {
    /// Smallest residual capacity along the path
    pub fn bottleneck(&self, network: &FlowNetwork) -> Capacity {
        self.edges
            .iter()
            .map(|&index| network.edge(index).residual_capacity())
            .min()
            .unwrap_or(0)
    }

    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }
}

/// Breadth-first search from `source` to `target` over edges whose residual
/// capacity is at least `threshold`.
///
/// Returns the first path reaching `target`, which has the fewest hops among
/// admissible paths; ties follow neighbour insertion order. `None` means the
/// target is unreachable at this threshold.
pub fn find_augmenting_path(
    network: &FlowNetwork,
    source: NodeId,
    target: NodeId,
    threshold: Capacity,
) -> Option<AugmentingPath> {
    if !network.contains(source) || !network.contains(target) || source == target {
        return None;
    }

    // parent[v] = (previous vertex, edge used to reach v)
    let mut parent: Vec<Option<(NodeId, usize)>> = vec![None; network.vertex_count()];
    let mut visited = vec![false; network.vertex_count()];
    let mut queue = VecDeque::from([source]);
    visited[source] = true;

    while let Some(current) = queue.pop_front() {
        for &edge_index in network.vertices()[current].outgoing() {
            let edge = network.edge(edge_index);
            let next = edge.to;
            if visited[next] || edge.residual_capacity() < threshold {
                continue;
            }
            visited[next] = true;
            parent[next] = Some((current, edge_index));

            if next == target {
                let path = rebuild(&parent, source, target);
                trace!("threshold {}: found path {:?}", threshold, path.nodes);
                return Some(path);
            }
            queue.push_back(next);
        }
    }

    None
}

fn rebuild(parent: &[Option<(NodeId, usize)>], source: NodeId, target: NodeId) -> AugmentingPath {
    let mut nodes = vec![target];
    let mut edges = Vec::new();
    let mut current = target;
    while current != source {
        match parent[current] {
            Some((previous, edge_index)) => {
                nodes.push(previous);
                edges.push(edge_index);
                current = previous;
            }
            None => break,
        }
    }
    nodes.reverse();
    edges.reverse();
    AugmentingPath { nodes, edges }
}
