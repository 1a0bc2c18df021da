//! Analysis configuration
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::ReductionPolicy;
use crate::data_structures::NodeId;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parameters of one multicast analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Vertex every flow starts from
    pub source: NodeId,
    /// Reduction policies to explore, in order
    pub policies: Vec<ReductionPolicy>,
    /// Seed for the random policy; entropy when absent
    pub seed: Option<u64>,
    /// Name used in artifact file names; the input file stem when absent
    pub graph_name: Option<String>,
    /// Directory for artifacts; nothing is written when absent
    pub output_dir: Option<PathBuf>,
    /// File receiving the augmentation trace
    pub trace_file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source: 0,
            policies: ReductionPolicy::ALL.to_vec(),
            seed: None,
            graph_name: None,
            output_dir: None,
            trace_file: None,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Graph name, falling back to the stem of `input`
    pub fn graph_name_for(&self, input: Option<&Path>) -> String {
        self.graph_name
            .clone()
            .or_else(|| {
                input
                    .and_then(Path::file_stem)
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "graph".to_string())
    }
}
