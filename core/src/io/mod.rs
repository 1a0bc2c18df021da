//! Reading matrix files and writing analysis artifacts
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod loader;
pub mod writer;

pub use self::loader::{load_network, parse_input, parse_network, MatrixInput, ParseError};
pub use self::writer::{render_solver_input, render_trace, ArtifactWriter, TraceLog};
