//! Record-level parsing for Xdebug format-1 trace lines.
//!
//! Each trace record is one tab-separated line:
//! `depth \t call_id \t kind(0|1) \t timestamp \t memory [\t function \t is_internal ...]`
//!
//! Parsing is lenient by design: anything that does not parse as a
//! well-formed entry or exit record yields no event at all. The trace file
//! interleaves records with blank lines and an end-of-trace footer, so
//! skipping unparseable lines is the normal mode of operation, not an error.

use crate::utils::config::{
    FIELD_DEPTH, FIELD_FUNCTION_NAME, FIELD_KIND, FIELD_MEMORY, FIELD_TIMESTAMP,
    MIN_RECORD_FIELDS,
};

/// Whether a record marks the start or the end of a function invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Entry,
    Exit,
}

/// A single well-formed trace record
///
/// **Public** - produced by the parser, consumed by the call stack tracker
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent {
    /// Call nesting depth of this record
    pub depth: usize,

    /// Entry or exit marker
    pub kind: EventKind,

    /// Seconds since script start
    pub timestamp: f64,

    /// Memory usage in bytes at this point
    pub memory_bytes: i64,

    /// Function name, present only on entry records
    pub function_name: Option<String>,
}

/// Parse one raw trace line into an event
///
/// **Public** - main entry point for record parsing
///
/// Returns `None` for every line that is not a well-formed entry or exit
/// record: too few fields, non-integer depth, unparseable timestamp or
/// memory, an entry without a function name, or a kind field that is
/// neither `"0"` nor `"1"`. No error escapes this function.
pub fn parse_record(line: &str) -> Option<TraceEvent> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_RECORD_FIELDS {
        return None;
    }

    let depth = fields[FIELD_DEPTH].trim().parse::<usize>().ok()?;
    let timestamp = fields[FIELD_TIMESTAMP].parse::<f64>().ok()?;
    let memory_bytes = fields[FIELD_MEMORY].trim().parse::<i64>().ok()?;

    match fields[FIELD_KIND] {
        "0" => {
            // Entry records carry the function name; without it there is
            // nothing to attribute costs to.
            let name = fields.get(FIELD_FUNCTION_NAME)?;
            Some(TraceEvent {
                depth,
                kind: EventKind::Entry,
                timestamp,
                memory_bytes,
                function_name: Some((*name).to_string()),
            })
        }
        "1" => Some(TraceEvent {
            depth,
            kind: EventKind::Exit,
            timestamp,
            memory_bytes,
            function_name: None,
        }),
        // Format 1 also emits return-value records (kind "R") in some
        // configurations; they carry no cost data.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_record() {
        let event = parse_record("2\t5\t0\t0.004471\t379416\tstr_replace\t1").unwrap();
        assert_eq!(event.depth, 2);
        assert_eq!(event.kind, EventKind::Entry);
        assert_eq!(event.timestamp, 0.004471);
        assert_eq!(event.memory_bytes, 379416);
        assert_eq!(event.function_name.as_deref(), Some("str_replace"));
    }

    #[test]
    fn test_parse_exit_record() {
        let event = parse_record("2\t5\t1\t0.004607\t379712").unwrap();
        assert_eq!(event.depth, 2);
        assert_eq!(event.kind, EventKind::Exit);
        assert_eq!(event.timestamp, 0.004607);
        assert_eq!(event.memory_bytes, 379712);
        assert!(event.function_name.is_none());
    }

    #[test]
    fn test_too_few_fields_is_ignored() {
        assert!(parse_record("1\t2\t0").is_none());
        assert!(parse_record("").is_none());
        assert!(parse_record("\t").is_none());
    }

    #[test]
    fn test_non_integer_depth_is_ignored() {
        assert!(parse_record("abc\t5\t0\t0.1\t100\tfoo\t1").is_none());
        assert!(parse_record("-1\t5\t1\t0.1\t100").is_none());
    }

    #[test]
    fn test_unknown_kind_is_ignored() {
        // Return-value record: structurally fine but produces no event
        assert!(parse_record("2\t5\tR\t0.1\t100\ttrue").is_none());
    }

    #[test]
    fn test_entry_without_function_name_is_ignored() {
        assert!(parse_record("2\t5\t0\t0.1\t100").is_none());
    }

    #[test]
    fn test_unparseable_timestamp_or_memory_is_ignored() {
        assert!(parse_record("2\t5\t1\tnot-a-float\t100").is_none());
        assert!(parse_record("2\t5\t1\t0.1\tnot-an-int").is_none());
    }
}
