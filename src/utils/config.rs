//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Header prefixes of an Xdebug trace file written with format option '1'.
// All three lines must be present, in this order, before any record.
pub const HEADER_VERSION_PREFIX: &str = "Version: 2.";
pub const HEADER_FORMAT_PREFIX: &str = "File format:";
pub const HEADER_TRACE_PREFIX: &str = "TRACE";

// Record field layout (tab-separated):
// depth \t call_id \t kind(0|1) \t timestamp \t memory [\t function \t is_internal ...]
pub const MIN_RECORD_FIELDS: usize = 5;
pub const FIELD_DEPTH: usize = 0;
pub const FIELD_KIND: usize = 2;
pub const FIELD_TIMESTAMP: usize = 3;
pub const FIELD_MEMORY: usize = 4;
pub const FIELD_FUNCTION_NAME: usize = 5;

/// Default number of functions shown in the report
pub const DEFAULT_TOP_FUNCTIONS: usize = 30;

/// Minimum width of the function-name column in the text report
pub const MIN_NAME_COLUMN_WIDTH: usize = 10;
