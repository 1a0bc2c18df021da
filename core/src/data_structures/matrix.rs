//! Dense capacity matrices used for subgraphs and multicast graphs
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::Write;

use super::flow_network::{Capacity, NodeId};

/// Square matrix of capacities, `matrix[u][v]` for the link `u -> v`
pub type CapacityMatrix = Vec<Vec<Capacity>>;

/// All-zero `n x n` matrix
pub fn zeros(n: usize) -> CapacityMatrix {
    vec![vec![0; n]; n]
}

/// Dimensions as `(rows, columns)`; columns taken from the first row
pub fn shape(matrix: &CapacityMatrix) -> (usize, usize) {
    (matrix.len(), matrix.first().map_or(0, Vec::len))
}

/// Whether every row has the same length as the number of rows
pub fn is_square(matrix: &CapacityMatrix) -> bool {
    let n = matrix.len();
    matrix.iter().all(|row| row.len() == n)
}

/// Number of links with positive capacity
pub fn link_count(matrix: &CapacityMatrix) -> usize {
    matrix.iter().flatten().filter(|&&c| c > 0).count()
}

/// Vertices with at least two incoming links. These are the vertices where
/// converging flows would need network coding.
pub fn coding_nodes(matrix: &CapacityMatrix) -> Vec<NodeId> {
    let n = matrix.len();
    (0..n)
        .filter(|&v| matrix.iter().filter(|row| row.get(v).copied().unwrap_or(0) > 0).count() >= 2)
        .collect()
}

/// Line-per-row text block, entries separated by a single space
pub fn render(matrix: &CapacityMatrix) -> String {
    let mut out = String::new();
    for row in matrix {
        let line = row.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ");
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", line);
    }
    out
}
