//! Per-function cost accumulation with recursion de-duplication.
//!
//! Every exit increments the call count, but cost windows are only added
//! for the outermost occurrence of a recursive chain. Inner occurrences are
//! dropped here because the outer frame's entry/exit snapshots already span
//! them; summing both would count the same wall-clock window twice.

use super::stack::CallExit;
use crate::parser::schema::FunctionEntry;
use std::collections::HashMap;

/// Accumulated costs for one function
///
/// **Public** - created on first exit, mutated on every later exit
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStats {
    /// Function name as it appears in the trace
    pub name: String,

    /// Number of exits observed, including recursive invocations
    pub calls: u64,

    /// Summed entry-to-exit time windows (outermost occurrences only)
    pub inclusive_time: f64,

    /// Summed entry-to-exit memory deltas (outermost occurrences only)
    pub inclusive_memory: i64,

    /// Summed nested-call time within counted windows
    pub child_time: f64,

    /// Summed nested-call memory within counted windows
    pub child_memory: i64,
}

impl FunctionStats {
    fn new(name: String) -> Self {
        Self {
            name,
            calls: 0,
            inclusive_time: 0.0,
            inclusive_memory: 0,
            child_time: 0.0,
            child_memory: 0,
        }
    }

    /// Time spent directly in the function, excluding nested calls
    pub fn own_time(&self) -> f64 {
        self.inclusive_time - self.child_time
    }

    /// Memory allocated directly by the function, excluding nested calls
    pub fn own_memory(&self) -> i64 {
        self.inclusive_memory - self.child_memory
    }
}

/// Accumulates function stats in first-seen order
///
/// **Public** - owned state, one instance per trace
#[derive(Debug, Default)]
pub struct FunctionAggregator {
    /// Stats in the order the functions first exited
    stats: Vec<FunctionStats>,

    /// Name to position in `stats`, for O(1) lookup
    index: HashMap<String, usize>,
}

impl FunctionAggregator {
    /// Create an empty aggregator
    ///
    /// **Public** - constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one closed call into the per-function totals
    ///
    /// **Public** - called for every exit the tracker reports
    ///
    /// The call count always grows. Cost windows are skipped while another
    /// occurrence of the same function is still open on the stack.
    pub fn record(&mut self, exit: &CallExit) {
        let pos = match self.index.get(&exit.function_name) {
            Some(&pos) => pos,
            None => {
                let pos = self.stats.len();
                self.index.insert(exit.function_name.clone(), pos);
                self.stats.push(FunctionStats::new(exit.function_name.clone()));
                pos
            }
        };

        let entry = &mut self.stats[pos];
        entry.calls += 1;

        if !exit.still_active {
            entry.inclusive_time += exit.time;
            entry.inclusive_memory += exit.memory;
            entry.child_time += exit.child_time;
            entry.child_memory += exit.child_memory;
        }
    }

    /// Stats in first-seen order
    ///
    /// **Public** - read access for ranking and tests
    pub fn stats(&self) -> &[FunctionStats] {
        &self.stats
    }

    /// Number of distinct functions observed
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// True if no function has exited yet
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Convert accumulated stats into report entries, first-seen order
    ///
    /// **Public** - input to the ranking step
    pub fn into_entries(self) -> Vec<FunctionEntry> {
        self.stats
            .into_iter()
            .map(|s| FunctionEntry {
                calls: s.calls,
                time_inclusive: s.inclusive_time,
                memory_inclusive: s.inclusive_memory,
                time_own: s.inclusive_time - s.child_time,
                memory_own: s.inclusive_memory - s.child_memory,
                time_children: s.child_time,
                memory_children: s.child_memory,
                name: s.name,
            })
            .collect()
    }
}
