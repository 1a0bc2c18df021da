//! Flow and multicast graph algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod augmenting_path;
pub mod max_flow;
pub mod multicast;
pub mod reduction;
pub mod subgraph;

pub use self::augmenting_path::{find_augmenting_path, AugmentingPath};
pub use self::max_flow::{
    max_flow, AugmentationStep, FlowError, FlowMetrics, FlowPath, MaxFlowResult, MaxFlowSolver,
};
pub use self::multicast::{build_multicast_graph, SynthesisError};
pub use self::reduction::{PathReducer, ReductionPolicy};
pub use self::subgraph::build_subgraph;
