//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Validates the trace file header
//! 2. Streams records through the call stack tracker
//! 3. Aggregates per-function costs
//! 4. Ranks functions by the requested key
//! 5. Prints the text report and optionally writes a JSON report

use crate::aggregator::{rank, SortKey, TraceAnalyzer};
use crate::output::{build_report, render_report, write_report};
use crate::parser::parse_trace_file;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the Xdebug trace file
    pub trace_file: PathBuf,

    /// Sort key for ranking; None keeps first-seen order
    pub sort_key: Option<SortKey>,

    /// Number of functions to show
    pub top: usize,

    /// Optional output path for a JSON report
    pub output_json: Option<PathBuf>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::new(),
            sort_key: Some(SortKey::MemoryInclusive),
            top: crate::utils::config::DEFAULT_TOP_FUNCTIONS,
            output_json: None,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace file missing or unreadable
/// * Invalid trace header
/// * Structurally inconsistent trace (exit without matching entry frame)
/// * JSON report write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Analyzing trace file: {}", args.trace_file.display());

    // Step 1+2: Stream the trace through the analyzer
    let mut analyzer = TraceAnalyzer::new();
    let summary = parse_trace_file(&args.trace_file, |event, line| analyzer.apply(&event, line))
        .with_context(|| format!("Failed to analyze trace {}", args.trace_file.display()))?;

    debug!(
        "Replayed {} events ({} lines skipped), {} distinct functions",
        summary.events,
        summary.skipped,
        analyzer.function_count()
    );

    // Step 3+4: Rank the aggregated functions
    let function_count = analyzer.function_count();
    let ranked = rank(analyzer.into_entries(), args.sort_key, args.top);

    debug!("Top 3 functions:");
    for (i, entry) in ranked.iter().take(3).enumerate() {
        debug!(
            "  {}. {} ({} calls, {:.3}s inclusive)",
            i + 1,
            entry.name,
            entry.calls,
            entry.time_inclusive
        );
    }

    // Step 5: Output
    println!("{}", render_report(&ranked, args.sort_key));

    if let Some(json_path) = &args.output_json {
        let report = build_report(&args.trace_file, args.sort_key, function_count, ranked);
        write_report(&report, json_path).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.trace_file.as_os_str().is_empty() {
        anyhow::bail!("Trace file path cannot be empty");
    }

    if !args.trace_file.exists() {
        anyhow::bail!("Trace file does not exist: {}", args.trace_file.display());
    }

    if args.trace_file.is_dir() {
        anyhow::bail!("Trace file is a directory: {}", args.trace_file.display());
    }

    if args.top == 0 {
        anyhow::bail!("Result count must be greater than 0");
    }

    Ok(())
}
