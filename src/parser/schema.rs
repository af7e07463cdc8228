//! Output JSON schema definitions for report data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the report was generated from
    pub trace_file: String,

    /// Sort key used for ranking, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,

    /// Total number of distinct functions observed in the trace
    pub function_count: usize,

    /// Ranked function entries (truncated to the requested count)
    pub functions: Vec<FunctionEntry>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Aggregated costs for one function
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionEntry {
    /// Function name as it appears in the trace
    pub name: String,

    /// Number of times the function exited, including recursive calls
    pub calls: u64,

    /// Wall time in seconds attributed to the function and its callees
    pub time_inclusive: f64,

    /// Memory bytes attributed to the function and its callees
    pub memory_inclusive: i64,

    /// Wall time in seconds spent directly in the function
    pub time_own: f64,

    /// Memory bytes allocated directly by the function
    pub memory_own: i64,

    /// Wall time in seconds spent in nested calls
    pub time_children: f64,

    /// Memory bytes allocated by nested calls
    pub memory_children: i64,
}
