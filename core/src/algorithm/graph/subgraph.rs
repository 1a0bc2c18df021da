//! Per-receiver subgraph extraction
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::graph::max_flow::FlowError;
use crate::data_structures::matrix::{self, CapacityMatrix};
use crate::data_structures::{FlowNetwork, NodeId};

/// Build the capacity matrix restricted to the links used by `paths`.
///
/// Each consecutive pair `(u, v)` of every path gets the original capacity
/// of edge `u -> v`; everything else stays 0. Flow state is not read.
pub fn build_subgraph<P>(network: &FlowNetwork, paths: &[P]) -> Result<CapacityMatrix, FlowError>
where
    P: AsRef<[NodeId]>,
{
    let mut subgraph = matrix::zeros(network.vertex_count());
    for path in paths {
        for hop in path.as_ref().windows(2) {
            let (from, to) = (hop[0], hop[1]);
            let edge_index = network
                .find_edge(from, to)
                .ok_or(FlowError::MissingEdge { from, to })?;
            subgraph[from][to] = network.edge(edge_index).capacity;
        }
    }
    Ok(subgraph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::max_flow::max_flow;

    fn network() -> FlowNetwork {
        FlowNetwork::from_matrix(&vec![
            vec![0, 4, 6, 0],
            vec![0, 0, 0, 3],
            vec![0, 0, 0, 7],
            vec![0, 0, 0, 0],
        ])
    }

    #[test]
    fn test_subgraph_uses_original_capacities() {
        let network = network();
        let paths = vec![vec![0, 2, 3]];
        let subgraph = build_subgraph(&network, &paths).unwrap();
        assert_eq!(
            subgraph,
            vec![
                vec![0, 0, 6, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 7],
                vec![0, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn test_subgraph_after_max_flow() {
        let mut network = network();
        let result = max_flow(&mut network, 0, 3).unwrap();
        let subgraph = build_subgraph(&network, &result.flow_paths).unwrap();
        // every link is used, capacities not flows are reported
        assert_eq!(subgraph, network.capacity_matrix());
    }

    #[test]
    fn test_missing_edge_is_reported() {
        let network = network();
        let paths = vec![vec![0, 3]];
        assert_eq!(
            build_subgraph(&network, &paths),
            Err(FlowError::MissingEdge { from: 0, to: 3 })
        );
    }

    #[test]
    fn test_empty_path_set() {
        let network = network();
        let paths: Vec<Vec<NodeId>> = Vec::new();
        assert_eq!(build_subgraph(&network, &paths).unwrap(), matrix::zeros(4));
    }
}
