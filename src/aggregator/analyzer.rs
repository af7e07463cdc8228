//! End-to-end event replay: call stack tracking plus function aggregation.
//!
//! The analyzer owns all mutable state (frame stack, active-call counts,
//! function totals) as one value, so independent traces can be processed
//! with independent instances.

use super::functions::{FunctionAggregator, FunctionStats};
use super::stack::CallStackTracker;
use crate::parser::record::{EventKind, TraceEvent};
use crate::parser::schema::FunctionEntry;
use crate::utils::error::TraceError;

/// Owned replay state for one trace
///
/// **Public** - main entry point for trace analysis
#[derive(Debug, Default)]
pub struct TraceAnalyzer {
    tracker: CallStackTracker,
    functions: FunctionAggregator,
}

impl TraceAnalyzer {
    /// Create a fresh analyzer
    ///
    /// **Public** - constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event in trace order
    ///
    /// **Public** - called for every event the reader produces
    ///
    /// # Errors
    /// * `TraceError::ExitIntoHole` - exit event with no open frame at its depth
    pub fn apply(&mut self, event: &TraceEvent, line: u64) -> Result<(), TraceError> {
        match event.kind {
            EventKind::Entry => {
                // parse_record guarantees entry events carry a name
                let name = event.function_name.as_deref().unwrap_or("");
                self.tracker
                    .on_entry(event.depth, event.timestamp, event.memory_bytes, name);
            }
            EventKind::Exit => {
                let exit =
                    self.tracker
                        .on_exit(event.depth, event.timestamp, event.memory_bytes, line)?;
                self.functions.record(&exit);
            }
        }
        Ok(())
    }

    /// Accumulated stats in first-seen order
    ///
    /// **Public** - read access for tests and diagnostics
    pub fn stats(&self) -> &[FunctionStats] {
        self.functions.stats()
    }

    /// Number of distinct functions observed so far
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Finish the replay and hand the entries to the ranking step
    ///
    /// **Public** - consumes the analyzer; requires the whole trace applied
    pub fn into_entries(self) -> Vec<FunctionEntry> {
        self.functions.into_entries()
    }
}
