//! End-to-end tests: trace file on disk through to ranked entries.

use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use xdebug_trace_profiler::aggregator::{rank, SortKey, TraceAnalyzer};
use xdebug_trace_profiler::parser::{parse_trace_file, FunctionEntry};
use xdebug_trace_profiler::utils::error::TraceError;

fn write_trace(records: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Version: 2.9.8").unwrap();
    writeln!(file, "File format: 4").unwrap();
    writeln!(file, "TRACE START [2024-01-01 00:00:00]").unwrap();
    for record in records {
        writeln!(file, "{}", record).unwrap();
    }
    file.flush().unwrap();
    file
}

fn analyze(records: &[&str]) -> Vec<FunctionEntry> {
    let file = write_trace(records);
    let mut analyzer = TraceAnalyzer::new();
    parse_trace_file(file.path(), |event, line| analyzer.apply(&event, line)).unwrap();
    analyzer.into_entries()
}

#[test]
fn test_nested_calls_scenario() {
    let entries = analyze(&[
        "1\t0\t0\t0.0\t0\tfoo\t1",
        "2\t1\t0\t1.0\t100\tbar\t1",
        "2\t1\t1\t3.0\t150",
        "1\t0\t1\t5.0\t200",
    ]);

    assert_eq!(entries.len(), 2);

    let bar = &entries[0];
    assert_eq!(bar.name, "bar");
    assert_eq!(bar.calls, 1);
    assert_eq!(bar.time_inclusive, 2.0);
    assert_eq!(bar.memory_inclusive, 50);
    assert_eq!(bar.time_children, 0.0);
    assert_eq!(bar.memory_children, 0);
    assert_eq!(bar.time_own, 2.0);
    assert_eq!(bar.memory_own, 50);

    let foo = &entries[1];
    assert_eq!(foo.name, "foo");
    assert_eq!(foo.calls, 1);
    assert_eq!(foo.time_inclusive, 5.0);
    assert_eq!(foo.memory_inclusive, 200);
    assert_eq!(foo.time_children, 2.0);
    assert_eq!(foo.memory_children, 50);
    assert_eq!(foo.time_own, 3.0);
    assert_eq!(foo.memory_own, 150);
}

#[test]
fn test_calls_count_every_exit_of_a_recursive_chain() {
    let entries = analyze(&[
        "1\t0\t0\t0.0\t0\tfib\t1",
        "2\t1\t0\t1.0\t100\tfib\t1",
        "3\t2\t0\t2.0\t200\tfib\t1",
        "3\t2\t1\t3.0\t250",
        "2\t1\t1\t4.0\t300",
        "1\t0\t1\t6.0\t400",
    ]);

    assert_eq!(entries.len(), 1);
    let fib = &entries[0];
    assert_eq!(fib.calls, 3);
    // Only the outermost invocation's window counts
    assert_eq!(fib.time_inclusive, 6.0);
    assert_eq!(fib.memory_inclusive, 400);
}

#[test]
fn test_mutual_recursion_counts_outermost_window_only() {
    // even -> odd -> even, the inner "even" window must be dropped
    let entries = analyze(&[
        "1\t0\t0\t0.0\t0\teven\t1",
        "2\t1\t0\t1.0\t100\todd\t1",
        "3\t2\t0\t2.0\t200\teven\t1",
        "3\t2\t1\t3.0\t300",
        "2\t1\t1\t4.0\t400",
        "1\t0\t1\t5.0\t500",
    ]);

    let even = entries.iter().find(|e| e.name == "even").unwrap();
    let odd = entries.iter().find(|e| e.name == "odd").unwrap();

    assert_eq!(even.calls, 2);
    assert_eq!(even.time_inclusive, 5.0);
    assert_eq!(even.memory_inclusive, 500);

    assert_eq!(odd.calls, 1);
    assert_eq!(odd.time_inclusive, 3.0);
    assert_eq!(odd.memory_inclusive, 300);
}

#[test]
fn test_malformed_lines_change_nothing() {
    let clean = analyze(&[
        "1\t0\t0\t0.0\t0\tmain\t1",
        "1\t0\t1\t1.0\t1000",
    ]);
    let with_noise = analyze(&[
        "short\tline",
        "1\t0\t0\t0.0\t0\tmain\t1",
        "not-a-depth\t0\t1\t9.9\t999",
        "1\t0\t1\t1.0\t1000",
        "",
    ]);

    assert_eq!(clean, with_noise);
}

#[test]
fn test_exit_into_hole_is_fatal() {
    let file = write_trace(&[
        "4\t0\t0\t0.0\t0\tdeep\t1",
        "3\t0\t1\t1.0\t100",
    ]);

    let mut analyzer = TraceAnalyzer::new();
    let result = parse_trace_file(file.path(), |event, line| analyzer.apply(&event, line));
    assert!(matches!(
        result,
        Err(TraceError::ExitIntoHole { depth: 3, line: 5 })
    ));
}

#[test]
fn test_missing_header_is_fatal() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1\t0\t0\t0.0\t0\tmain\t1").unwrap();
    file.flush().unwrap();

    let result = parse_trace_file(file.path(), |_, _| Ok(()));
    assert!(matches!(result, Err(TraceError::InvalidHeader(_))));
}

#[test]
fn test_rank_default_key_orders_by_inclusive_memory() {
    let entries = analyze(&[
        "1\t0\t0\t0.0\t0\tsmall\t1",
        "1\t0\t1\t1.0\t100",
        "1\t1\t0\t2.0\t100\tbig\t1",
        "1\t1\t1\t3.0\t5100",
    ]);

    let ranked = rank(entries, Some(SortKey::MemoryInclusive), 30);
    assert_eq!(ranked[0].name, "big");
    assert_eq!(ranked[1].name, "small");
}

#[test]
fn test_rank_limit_truncates() {
    let entries = analyze(&[
        "1\t0\t0\t0.0\t0\ta\t1",
        "1\t0\t1\t1.0\t100",
        "1\t1\t0\t2.0\t100\tb\t1",
        "1\t1\t1\t3.0\t300",
        "1\t2\t0\t4.0\t300\tc\t1",
        "1\t2\t1\t5.0\t900",
    ]);

    let ranked = rank(entries, Some(SortKey::MemoryInclusive), 2);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].name, "c");
    assert_eq!(ranked[1].name, "b");
}
