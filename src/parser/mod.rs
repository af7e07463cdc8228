//! Trace parsing and report schema definitions.
//!
//! This module handles:
//! - Validating the trace file header
//! - Streaming tab-separated records from disk
//! - Parsing records into typed entry/exit events
//! - Defining the JSON report schema

pub mod reader;
pub mod record;
pub mod schema;

// Re-export main types
pub use reader::{parse_trace_file, ParseSummary};
pub use record::{parse_record, EventKind, TraceEvent};
pub use schema::{FunctionEntry, Report};
