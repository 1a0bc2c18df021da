//! mcflow: analyse one adjacency-matrix file
//!
//! Usage: `mcflow <MATRIX_FILE> [CONFIG_JSON]`
//!
//! Logging goes through `env_logger`; set `RUST_LOG=info` to see every
//! augmentation.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, Command};
use log::{error, info};
use mcflow_core::analysis::{AnalysisConfig, MulticastAnalysis};
use mcflow_core::io::load_network;

fn make_parser() -> Command {
    Command::new("mcflow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Multicast throughput analysis of an adjacency-matrix network")
        .arg(
            Arg::new("matrix")
                .value_name("MATRIX_FILE")
                .help("Header line, receiver line, then one matrix row per line")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .value_name("CONFIG_JSON")
                .help("Analysis configuration; defaults apply when omitted")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn run(input: PathBuf, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = match config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    let graph_name = config.graph_name_for(Some(input.as_path()));

    let mut network = load_network(&input)?;
    let analysis = MulticastAnalysis::new(config);
    let report = analysis.run(&mut network, &graph_name)?;

    println!("Maximum flows: {:?}", report.max_flows());
    println!("Minimal maximum flow: {}", report.bottleneck);
    println!("Coding nodes: {:?}", report.coding_nodes);
    for outcome in &report.policies {
        println!("{} path deletion, coding nodes: {:?}", outcome.policy, outcome.coding_nodes);
    }

    for path in analysis.write_artifacts(&report)? {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = make_parser().get_matches();
    let Some(input) = matches.get_one::<PathBuf>("matrix").cloned() else {
        return ExitCode::FAILURE;
    };
    let config = matches.get_one::<PathBuf>("config").cloned();

    match run(input, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
