//! Adjacency-matrix loader
//!
//! Input layout:
//!
//! ```text
//! free-text header
//! 4 6                 <- 1-based receiver indices
//! 0 3 2 0 0 0         <- N rows of N capacities, spaces and/or commas
//! ...
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::data_structures::{Capacity, CapacityMatrix, FlowNetwork, NodeId};

/// Loader errors; `line` is always 1-based
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Line {line}: missing {what}")]
    MissingLine { line: usize, what: &'static str },
    #[error("Line {line}: '{token}' is not an integer")]
    InvalidToken { line: usize, token: String },
    #[error("Line {line}: negative capacity {value}")]
    NegativeCapacity { line: usize, value: Capacity },
    #[error("Line {line}: expected {expected} entries, found {found}")]
    RowLength { line: usize, expected: usize, found: usize },
    #[error("Line {line}: expected {expected} matrix rows, found {found}")]
    RowCount { line: usize, expected: usize, found: usize },
    #[error("Line {line}: receiver {index} is outside 1..={vertex_count}")]
    InvalidReceiver { line: usize, index: usize, vertex_count: usize },
    #[error("Line {line}: capacity matrix is empty")]
    EmptyMatrix { line: usize },
}

impl ParseError {
    /// Offending line, when the error is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::MissingLine { line, .. }
            | Self::InvalidToken { line, .. }
            | Self::NegativeCapacity { line, .. }
            | Self::RowLength { line, .. }
            | Self::RowCount { line, .. }
            | Self::InvalidReceiver { line, .. }
            | Self::EmptyMatrix { line } => Some(*line),
        }
    }
}

/// Parsed input before it is turned into a network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixInput {
    pub header: String,
    /// 0-based receivers
    pub receivers: Vec<NodeId>,
    pub matrix: CapacityMatrix,
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

/// Parse the text format into its parts
pub fn parse_input(text: &str) -> Result<MatrixInput, ParseError> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (_, header) = lines
        .next()
        .ok_or(ParseError::MissingLine { line: 1, what: "header" })?;
    let (receiver_line, receiver_text) = lines
        .next()
        .ok_or(ParseError::MissingLine { line: 2, what: "receiver list" })?;

    let mut one_based = Vec::new();
    for token in tokens(receiver_text) {
        let index = token.parse::<usize>().map_err(|_| ParseError::InvalidToken {
            line: receiver_line,
            token: token.to_string(),
        })?;
        one_based.push(index);
    }

    let mut matrix: CapacityMatrix = Vec::new();
    let mut last_line = receiver_line;
    for (line, text) in lines {
        if text.trim().is_empty() {
            continue;
        }
        last_line = line;

        let mut row = Vec::new();
        for token in tokens(text) {
            let value = token.parse::<Capacity>().map_err(|_| ParseError::InvalidToken {
                line,
                token: token.to_string(),
            })?;
            if value < 0 {
                return Err(ParseError::NegativeCapacity { line, value });
            }
            row.push(value);
        }

        let expected = matrix.first().map_or(row.len(), Vec::len);
        if row.len() != expected {
            return Err(ParseError::RowLength {
                line,
                expected,
                found: row.len(),
            });
        }
        if matrix.len() == expected {
            return Err(ParseError::RowCount {
                line,
                expected,
                found: matrix.len() + 1,
            });
        }
        matrix.push(row);
    }

    let n = matrix.len();
    if n == 0 {
        return Err(ParseError::EmptyMatrix { line: last_line + 1 });
    }
    if matrix[0].len() != n {
        return Err(ParseError::RowCount {
            line: last_line,
            expected: matrix[0].len(),
            found: n,
        });
    }

    let mut receivers = Vec::with_capacity(one_based.len());
    for index in one_based {
        if index == 0 || index > n {
            return Err(ParseError::InvalidReceiver {
                line: receiver_line,
                index,
                vertex_count: n,
            });
        }
        receivers.push(index - 1);
    }

    Ok(MatrixInput {
        header: header.trim().to_string(),
        receivers,
        matrix,
    })
}

/// Parse the text format into a flow network with receivers attached
pub fn parse_network(text: &str) -> Result<FlowNetwork, ParseError> {
    let input = parse_input(text)?;
    let mut network = FlowNetwork::from_matrix(&input.matrix);
    network.set_title(input.header);
    network.set_receivers(input.receivers);
    debug!(
        "Loaded network with {} vertices, {} forward edges, receivers {:?}",
        network.vertex_count(),
        network.forward_edges().count(),
        network.receivers()
    );
    Ok(network)
}

/// Read and parse a matrix file
pub fn load_network(path: impl AsRef<Path>) -> Result<FlowNetwork, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_network(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTERFLY: &str = "butterfly with a direct link\n\
        6 7\n\
        0 1 1 0 0 1 0\n\
        0 0 0 1 0 1 0\n\
        0 0 0 1 0 0 1\n\
        0 0 0 0 1 0 0\n\
        0 0 0 0 0 1 1\n\
        0 0 0 0 0 0 0\n\
        0 0 0 0 0 0 0\n";

    #[test]
    fn test_parse_butterfly() {
        let network = parse_network(BUTTERFLY).unwrap();
        assert_eq!(network.title(), "butterfly with a direct link");
        assert_eq!(network.vertex_count(), 7);
        assert_eq!(network.receivers(), &[5, 6]);
        assert_eq!(network.forward_edges().count(), 10);
        assert_eq!(network.edges().len(), 20);
        for edge in network.forward_edges() {
            let twin = network.edge(edge.reverse_edge_index);
            assert_eq!(twin.capacity, 0);
            assert_eq!((twin.from, twin.to), (edge.to, edge.from));
        }
    }

    #[test]
    fn test_comma_separated_rows_and_blank_lines() {
        let text = "header\n2\n0, 5\n\n0, 0\n\n";
        let input = parse_input(text).unwrap();
        assert_eq!(input.matrix, vec![vec![0, 5], vec![0, 0]]);
        assert_eq!(input.receivers, vec![1]);
    }

    #[test]
    fn test_diagonal_entries_are_ignored() {
        let network = parse_network("h\n2\n4 1\n0 9\n").unwrap();
        assert_eq!(network.forward_edges().count(), 1);
        assert_eq!(network.capacity_matrix(), vec![vec![0, 1], vec![0, 0]]);
    }

    #[test]
    fn test_row_length_mismatch_names_line() {
        let err = parse_input("h\n2\n0 1 2\n0 1\n0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::RowLength { line: 4, expected: 3, found: 2 }
        ));
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_invalid_token_names_line() {
        let err = parse_input("h\n2\n0 1\nx 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidToken { line: 4, ref token } if token == "x"));

        let err = parse_input("h\n2 b\n0 1\n0 0\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_negative_capacity() {
        let err = parse_input("h\n2\n0 -1\n0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::NegativeCapacity { line: 3, value: -1 }));
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = parse_input("h\n2\n0 1\n").unwrap_err();
        assert!(matches!(err, ParseError::RowCount { expected: 2, found: 1, .. }));

        let err = parse_input("h\n2\n0 1\n0 0\n1 1\n").unwrap_err();
        assert!(matches!(err, ParseError::RowCount { line: 5, .. }));
    }

    #[test]
    fn test_receiver_out_of_range() {
        let err = parse_input("h\n0\n0 1\n0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidReceiver { line: 2, index: 0, .. }));

        let err = parse_input("h\n3\n0 1\n0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidReceiver { index: 3, vertex_count: 2, .. }));
    }

    #[test]
    fn test_missing_lines() {
        assert!(matches!(parse_input(""), Err(ParseError::MissingLine { line: 1, .. })));
        assert!(matches!(parse_input("h"), Err(ParseError::MissingLine { line: 2, .. })));
        assert!(matches!(parse_input("h\n1\n"), Err(ParseError::EmptyMatrix { line: 3 })));
    }

    #[test]
    fn test_missing_file() {
        let err = load_network("/nonexistent/mcflow/graph.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert_eq!(err.line(), None);
    }
}
