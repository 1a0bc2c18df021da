//! MCFLOW: multicast throughput analysis for capacitated networks
//!
//! A capacity-scaling Edmonds-Karp solver is run from one source to every
//! receiver of a network. The augmenting paths of each run become a
//! per-receiver subgraph, the subgraphs are merged into a multicast graph by
//! taking the link-wise maximum, and path-reduction heuristics try to drop
//! redundant paths so fewer vertices need network coding.
//!
//! ```no_run
//! use mcflow_core::analysis::{AnalysisConfig, MulticastAnalysis};
//! use mcflow_core::io::load_network;
//!
//! let mut network = load_network("graphs/butterfly.txt")?;
//! let analysis = MulticastAnalysis::new(AnalysisConfig::default());
//! let report = analysis.run(&mut network, "butterfly")?;
//! println!("bottleneck rate: {}", report.bottleneck);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A [`FlowNetwork`](data_structures::FlowNetwork) is reused across
//! receivers: every max-flow run resets the flow on all edges first. Runs
//! borrow the network mutably, so concurrent use needs separate clones.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod analysis;
pub mod data_structures;
pub mod io;

pub use crate::algorithm::graph::{
    build_multicast_graph, build_subgraph, find_augmenting_path, max_flow, FlowError, MaxFlowResult,
    MaxFlowSolver, PathReducer, ReductionPolicy, SynthesisError,
};
pub use crate::analysis::{AnalysisConfig, AnalysisError, AnalysisReport, MulticastAnalysis};
pub use crate::data_structures::{CapacityMatrix, FlowNetwork, NodeId, Path};
pub use crate::io::{load_network, parse_network, ParseError};
