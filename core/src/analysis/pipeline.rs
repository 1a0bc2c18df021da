//! Multicast analysis pipeline
//!
//! For one network: max flow from the source to every receiver, the
//! bottleneck rate, the baseline multicast graph and one reduced multicast
//! graph per configured policy. A receiver whose max flow exceeds the
//! bottleneck may shed one augmenting path, but only when the paths it keeps
//! still carry the bottleneck rate.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::config::AnalysisConfig;
use crate::algorithm::graph::{
    build_multicast_graph, build_subgraph, FlowError, FlowPath, MaxFlowResult, MaxFlowSolver,
    PathReducer, ReductionPolicy, SynthesisError,
};
use crate::data_structures::matrix::{self, CapacityMatrix};
use crate::data_structures::{Flow, FlowNetwork, NodeId};
use crate::io::writer::{render_trace, ArtifactWriter, TraceLog};

/// Pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Network has no receivers")]
    NoReceivers,
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Max flow to one receiver and the links it uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverFlow {
    pub receiver: NodeId,
    pub result: MaxFlowResult,
    pub subgraph: CapacityMatrix,
}

/// What a policy did to one receiver's path set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverReduction {
    pub receiver: NodeId,
    pub paths_before: usize,
    pub paths_after: usize,
    /// Flow carried by the paths that were kept
    pub retained_flow: Flow,
    /// False when the reduction fell below the bottleneck and was undone
    pub accepted: bool,
}

/// Multicast graph produced under one policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyOutcome {
    pub policy: ReductionPolicy,
    pub reductions: Vec<ReceiverReduction>,
    pub multicast: CapacityMatrix,
    pub coding_nodes: Vec<NodeId>,
}

/// Everything the pipeline computed for one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub graph_name: String,
    pub source: NodeId,
    pub receivers: Vec<ReceiverFlow>,
    /// Minimum max flow over all receivers
    pub bottleneck: Flow,
    /// Multicast graph from the unreduced path sets
    pub multicast: CapacityMatrix,
    pub coding_nodes: Vec<NodeId>,
    pub policies: Vec<PolicyOutcome>,
}

impl AnalysisReport {
    pub fn max_flows(&self) -> Vec<Flow> {
        self.receivers.iter().map(|r| r.result.max_flow).collect()
    }

    pub fn policy(&self, policy: ReductionPolicy) -> Option<&PolicyOutcome> {
        self.policies.iter().find(|outcome| outcome.policy == policy)
    }
}

fn carried_flow(paths: &[FlowPath]) -> Flow {
    paths.iter().map(|fp| fp.flow).sum()
}

/// Runs the analysis for one network at a time
#[derive(Debug, Clone)]
pub struct MulticastAnalysis {
    config: AnalysisConfig,
}

impl MulticastAnalysis {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse `network` towards all of its receivers
    pub fn run(&self, network: &mut FlowNetwork, graph_name: &str) -> Result<AnalysisReport, AnalysisError> {
        if network.receivers().is_empty() {
            return Err(AnalysisError::NoReceivers);
        }
        let source = self.config.source;
        let trace = match &self.config.trace_file {
            Some(path) => Some(TraceLog::create(path).map_err(|source| AnalysisError::Io {
                path: path.clone(),
                source,
            })?),
            None => None,
        };

        let mut solver = MaxFlowSolver::new();
        let mut receivers = Vec::new();
        for receiver in network.receivers().to_vec() {
            let result = solver.solve(network, source, receiver)?;
            let subgraph = build_subgraph(network, &result.flow_paths)?;
            if let Some(log) = &trace {
                append(log, &render_trace(&result, &subgraph))?;
            }
            receivers.push(ReceiverFlow {
                receiver,
                result,
                subgraph,
            });
        }

        let max_flows: Vec<Flow> = receivers.iter().map(|r| r.result.max_flow).collect();
        let bottleneck = max_flows.iter().copied().min().unwrap_or(0);
        info!(
            "Maximum flows: {:?}, minimal maximum flow: {}",
            max_flows, bottleneck
        );

        let subgraphs: Vec<CapacityMatrix> = receivers.iter().map(|r| r.subgraph.clone()).collect();
        let multicast = build_multicast_graph(&subgraphs)?;
        let coding_nodes = matrix::coding_nodes(&multicast);

        let mut reducer = PathReducer::new(self.config.seed);
        let mut policies = Vec::with_capacity(self.config.policies.len());
        for &policy in &self.config.policies {
            let outcome = self.apply_policy(network, &receivers, bottleneck, policy, &mut reducer)?;
            info!(
                "Policy {}: {} links, coding nodes {:?}",
                policy,
                matrix::link_count(&outcome.multicast),
                outcome.coding_nodes
            );
            policies.push(outcome);
        }

        if let Some(log) = &trace {
            let mut text = format!(
                "Maximum flows: {:?}, minimal maximum flow: {}\n\nMulticast Graph Matrix\n",
                max_flows, bottleneck
            );
            text.push_str(&matrix::render(&multicast));
            for outcome in &policies {
                text.push_str(&format!(
                    "\nMulticast Graph Matrix with {} path deletion method:\n",
                    outcome.policy
                ));
                text.push_str(&matrix::render(&outcome.multicast));
            }
            append(log, &text)?;
        }

        Ok(AnalysisReport {
            graph_name: graph_name.to_string(),
            source,
            receivers,
            bottleneck,
            multicast,
            coding_nodes,
            policies,
        })
    }

    fn apply_policy(
        &self,
        network: &FlowNetwork,
        receivers: &[ReceiverFlow],
        bottleneck: Flow,
        policy: ReductionPolicy,
        reducer: &mut PathReducer,
    ) -> Result<PolicyOutcome, AnalysisError> {
        let mut reductions = Vec::new();
        let mut subgraphs = Vec::with_capacity(receivers.len());

        for receiver in receivers {
            if receiver.result.max_flow <= bottleneck {
                subgraphs.push(receiver.subgraph.clone());
                continue;
            }

            let paths = receiver.result.flow_paths.clone();
            let paths_before = paths.len();
            let reduced = reducer.reduce(paths, policy);
            let retained_flow = carried_flow(&reduced);
            let accepted = retained_flow >= bottleneck;

            if accepted {
                subgraphs.push(build_subgraph(network, &reduced)?);
            } else {
                warn!(
                    "Policy {} leaves receiver {} with {} < {}, keeping all paths",
                    policy, receiver.receiver, retained_flow, bottleneck
                );
                subgraphs.push(receiver.subgraph.clone());
            }
            reductions.push(ReceiverReduction {
                receiver: receiver.receiver,
                paths_before,
                paths_after: reduced.len(),
                retained_flow,
                accepted,
            });
        }

        let multicast = build_multicast_graph(&subgraphs)?;
        let coding_nodes = matrix::coding_nodes(&multicast);
        Ok(PolicyOutcome {
            policy,
            reductions,
            multicast,
            coding_nodes,
        })
    }

    /// Write matrix blocks, solver inputs and the JSON report into the
    /// configured output directory. Returns the written paths; nothing is
    /// written without an output directory.
    pub fn write_artifacts(&self, report: &AnalysisReport) -> Result<Vec<PathBuf>, AnalysisError> {
        let Some(dir) = &self.config.output_dir else {
            return Ok(Vec::new());
        };
        let io_err = |path: PathBuf| move |source: std::io::Error| AnalysisError::Io { path, source };

        let writer = ArtifactWriter::new(dir).map_err(io_err(dir.clone()))?;
        let name = &report.graph_name;
        let mut written = Vec::new();

        let stem = format!("{}_multicast", name);
        written.push(
            writer
                .write_matrix(&stem, &report.multicast)
                .map_err(io_err(dir.join(&stem)))?,
        );

        for outcome in &report.policies {
            let stem = format!("{}_{}_path", name, outcome.policy);
            let header = format!("{} {} path", name, outcome.policy);
            written.push(
                writer
                    .write_matrix(&stem, &outcome.multicast)
                    .map_err(io_err(dir.join(&stem)))?,
            );
            written.push(
                writer
                    .write_solver_input(&stem, &header, &outcome.multicast, report.bottleneck)
                    .map_err(io_err(dir.join(&stem)))?,
            );
        }

        let report_name = format!("{}_report.json", name);
        let json = serde_json::to_string_pretty(report)?;
        written.push(
            writer
                .write(&report_name, &json)
                .map_err(io_err(dir.join(&report_name)))?,
        );
        Ok(written)
    }
}

fn append(log: &TraceLog, text: &str) -> Result<(), AnalysisError> {
    log.append(text).map_err(|source| AnalysisError::Io {
        path: log.path().to_path_buf(),
        source,
    })
}
