//! Xdebug Trace Profiler CLI
//!
//! Reconstructs per-function time and memory costs from an Xdebug
//! format-1 trace file and prints the most costly functions.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use xdebug_trace_profiler::aggregator::SortKey;
use xdebug_trace_profiler::commands::{execute_analyze, validate_args, AnalyzeArgs};
use xdebug_trace_profiler::utils::config::DEFAULT_TOP_FUNCTIONS;

/// Xdebug Trace Profiler - rank functions by time and memory cost
#[derive(Parser, Debug)]
#[command(name = "xdebug-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the Xdebug trace file (format option '1')
    trace_file: PathBuf,

    /// Cost metric to sort by
    #[arg(short, long, value_enum, default_value = "memory-inclusive")]
    sort: SortKey,

    /// Report functions in first-seen order instead of sorting
    #[arg(long, conflicts_with = "sort")]
    no_sort: bool,

    /// Number of functions to show
    #[arg(short, long, default_value_t = DEFAULT_TOP_FUNCTIONS)]
    top: usize,

    /// Write a JSON report to this path
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = AnalyzeArgs {
        trace_file: cli.trace_file,
        sort_key: if cli.no_sort { None } else { Some(cli.sort) },
        top: cli.top,
        output_json: cli.json,
    };

    // Validate args first
    validate_args(&args)?;

    // Execute analysis
    execute_analyze(args)?;

    Ok(())
}
