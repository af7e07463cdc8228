//! Xdebug Trace Profiler
//!
//! Per-function time and memory profiling from Xdebug
//! format-1 trace files.
//!
//! This crate provides the core implementation for the
//! `xdebug-trace` CLI tool: it reconstructs the call tree
//! from flat, depth-annotated entry/exit records, aggregates
//! inclusive and own costs per function with recursion-aware
//! de-duplication, and ranks functions by a chosen metric.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install xdebug-trace-profiler
//! xdebug-trace ./tracefile.xt --sort memory-inclusive --top 30
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
