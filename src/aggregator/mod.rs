//! Aggregation of trace events into per-function costs.
//!
//! This module transforms parsed entry/exit events into:
//! - Reconstructed call frames (depth-indexed stack)
//! - Per-function call counts and inclusive/own cost sums
//! - A ranked list of the most costly functions

pub mod analyzer;
pub mod functions;
pub mod ranking;
pub mod stack;

// Re-export main types and functions
pub use analyzer::TraceAnalyzer;
pub use functions::{FunctionAggregator, FunctionStats};
pub use ranking::{rank, SortKey};
pub use stack::{CallExit, CallStackTracker, Frame};
