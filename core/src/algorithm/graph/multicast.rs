//! Multicast graph synthesis
//!
//! The multicast graph is the link-wise maximum of the per-receiver
//! subgraphs: every link some receiver needs, at the capacity it needs.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::data_structures::matrix::{self, CapacityMatrix};

/// Synthesis errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Multicast synthesis needs at least one subgraph")]
    EmptyInput,
    #[error("Subgraph {index} is {found:?}, expected {expected:?}")]
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Cell-wise maximum across equally shaped matrices
pub fn build_multicast_graph(subgraphs: &[CapacityMatrix]) -> Result<CapacityMatrix, SynthesisError> {
    let (first, rest) = subgraphs.split_first().ok_or(SynthesisError::EmptyInput)?;
    let expected = matrix::shape(first);

    let mut multicast = first.clone();
    for (offset, subgraph) in rest.iter().enumerate() {
        let found = matrix::shape(subgraph);
        if found != expected || subgraph.iter().any(|row| row.len() != expected.1) {
            return Err(SynthesisError::ShapeMismatch {
                index: offset + 1,
                expected,
                found,
            });
        }
        for (target_row, row) in multicast.iter_mut().zip(subgraph) {
            for (cell, &value) in target_row.iter_mut().zip(row) {
                *cell = (*cell).max(value);
            }
        }
    }
    Ok(multicast)
}
