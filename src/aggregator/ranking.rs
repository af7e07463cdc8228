//! Ranking of aggregated function costs.
//!
//! Sorting is stable and descending: functions tied on the requested key
//! keep the order in which they were first observed in the trace.

use crate::parser::schema::FunctionEntry;
use clap::ValueEnum;
use std::cmp::Ordering;

/// Cost metric used to rank functions
///
/// **Public** - selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Number of calls, recursive invocations included
    Calls,
    /// Total time of the function and its callees
    TimeInclusive,
    /// Total memory of the function and its callees
    MemoryInclusive,
    /// Time spent directly in the function
    TimeOwn,
    /// Memory allocated directly by the function
    MemoryOwn,
}

impl SortKey {
    /// Compare two entries on this key, ascending
    ///
    /// **Public** - callers flip the operands for a descending sort
    pub fn compare(self, a: &FunctionEntry, b: &FunctionEntry) -> Ordering {
        match self {
            SortKey::Calls => a.calls.cmp(&b.calls),
            SortKey::TimeInclusive => a.time_inclusive.total_cmp(&b.time_inclusive),
            SortKey::MemoryInclusive => a.memory_inclusive.cmp(&b.memory_inclusive),
            SortKey::TimeOwn => a.time_own.total_cmp(&b.time_own),
            SortKey::MemoryOwn => a.memory_own.cmp(&b.memory_own),
        }
    }

    /// Name as it appears on the CLI and in the JSON report
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Calls => "calls",
            SortKey::TimeInclusive => "time-inclusive",
            SortKey::MemoryInclusive => "memory-inclusive",
            SortKey::TimeOwn => "time-own",
            SortKey::MemoryOwn => "memory-own",
        }
    }
}

/// Sort entries descending by a key and keep the top `limit`
///
/// **Public** - final step of the aggregation pipeline
///
/// With no key the entries stay in first-seen order and are only truncated.
/// Ranking an already-ranked list again with the same key and a limit at
/// least its length returns it unchanged.
pub fn rank(
    mut entries: Vec<FunctionEntry>,
    sort_key: Option<SortKey>,
    limit: usize,
) -> Vec<FunctionEntry> {
    if let Some(key) = sort_key {
        // Stable sort; flipped operands give descending order
        entries.sort_by(|a, b| key.compare(b, a));
    }
    entries.truncate(limit);
    entries
}
