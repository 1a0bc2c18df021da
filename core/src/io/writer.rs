//! Output artifacts: matrix blocks, solver input files and trace logs
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::algorithm::graph::MaxFlowResult;
use crate::data_structures::matrix::{self, CapacityMatrix};
use crate::data_structures::Flow;

/// Text expected by the external feasibility solver: a header line, a
/// `<vertex count> <rate>` line, then the matrix block
pub fn render_solver_input(header: &str, matrix: &CapacityMatrix, rate: Flow) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{} {}", matrix.len(), rate);
    out.push_str(&matrix::render(matrix));
    out
}

/// Trace section for one max-flow run, augmentations first and the
/// resulting subgraph after
pub fn render_trace(result: &MaxFlowResult, subgraph: &CapacityMatrix) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Subgraph with s: {} and t: {}", result.source, result.target);
    for (number, step) in result.steps.iter().enumerate() {
        let _ = writeln!(
            out,
            "I: {}, flow: {}, max_flow: {}, path # {}: {:?}",
            step.threshold,
            step.flow,
            step.total,
            number + 1,
            step.path
        );
    }
    let _ = writeln!(
        out,
        "Subgraph with s: {} and t: {} matrix:",
        result.source, result.target
    );
    out.push_str(&matrix::render(subgraph));
    out.push('\n');
    out
}

/// Writes artifacts into one output directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    /// Create the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `contents` to `name` inside the output directory
    pub fn write(&self, name: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.dir.join(name);
        fs::write(&path, contents)?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Matrix block as `<stem>.mat`
    pub fn write_matrix(&self, stem: &str, matrix: &CapacityMatrix) -> io::Result<PathBuf> {
        self.write(&format!("{}.mat", stem), &matrix::render(matrix))
    }

    /// Solver input as `<stem>.txt`
    pub fn write_solver_input(
        &self,
        stem: &str,
        header: &str,
        matrix: &CapacityMatrix,
        rate: Flow,
    ) -> io::Result<PathBuf> {
        self.write(&format!("{}.txt", stem), &render_solver_input(header, matrix, rate))
    }
}

/// Append-only trace file
#[derive(Debug, Clone)]
pub struct TraceLog {
    path: PathBuf,
}

impl TraceLog {
    /// Truncate the file and write the banner
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, "Modified Edmonds-Karp Algorithm\n\n")?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        file.write_all(text.as_bytes())
    }
}
