//! Output writers for ranked function costs.
//!
//! This module handles presentation of the aggregated results:
//! - Column-aligned text tables for the terminal
//! - JSON reports written to disk

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{build_report, read_report, write_report};
pub use table::{group_thousands, render_report};
