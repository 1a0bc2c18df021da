//! Network and matrix data structures
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod flow_network;
pub mod matrix;

pub use self::flow_network::{Capacity, Flow, FlowEdge, FlowNetwork, NodeId, Path, Vertex};
pub use self::matrix::CapacityMatrix;
