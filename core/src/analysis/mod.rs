//! Per-network multicast analysis built on the flow algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod config;
pub mod pipeline;

pub use self::config::{AnalysisConfig, ConfigError};
pub use self::pipeline::{
    AnalysisError, AnalysisReport, MulticastAnalysis, PolicyOutcome, ReceiverFlow, ReceiverReduction,
};
