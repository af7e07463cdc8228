//! Trace file reader: header validation and buffered record streaming.
//!
//! An Xdebug format-1 trace starts with three header lines (version, file
//! format, TRACE marker) followed by tab-separated records. Traces grow to
//! hundreds of megabytes, so records are streamed line by line through a
//! reused buffer instead of being loaded whole.

use super::record::{parse_record, TraceEvent};
use crate::utils::config::{HEADER_FORMAT_PREFIX, HEADER_TRACE_PREFIX, HEADER_VERSION_PREFIX};
use crate::utils::error::TraceError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

/// Log a progress line roughly every this many bytes consumed
const PROGRESS_CHUNK_BYTES: u64 = 4 * 1024 * 1024;

/// Counters describing one full pass over a trace file
///
/// **Public** - returned by parse_trace_file
#[derive(Debug, Clone, Default)]
pub struct ParseSummary {
    /// Total lines read after the header
    pub lines_read: u64,

    /// Lines that produced an entry or exit event
    pub events: u64,

    /// Lines skipped as malformed or irrelevant
    pub skipped: u64,

    /// Bytes consumed, including the header
    pub bytes_read: u64,
}

/// Stream every well-formed event of a trace file into a callback
///
/// **Public** - main entry point for trace reading
///
/// The callback receives each event together with its 1-based line number,
/// used for error reporting. The callback aborts the pass by returning an
/// error.
///
/// # Errors
/// * `TraceError::Io` - file cannot be opened or read
/// * `TraceError::InvalidHeader` - the three header lines are absent or wrong
/// * any error returned by the callback
pub fn parse_trace_file<F>(path: &Path, mut on_event: F) -> Result<ParseSummary, TraceError>
where
    F: FnMut(TraceEvent, u64) -> Result<(), TraceError>,
{
    let file = File::open(path)?;
    let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);
    let mut reader = BufReader::new(file);

    info!("Parsing {} KB trace file...", file_size / 1024);
    let start = Instant::now();

    let mut summary = ParseSummary::default();
    summary.bytes_read += read_header(&mut reader)?;

    let mut line_no: u64 = 3;
    let mut next_progress = PROGRESS_CHUNK_BYTES;
    let mut buf = String::new();

    loop {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            break;
        }

        summary.bytes_read += n as u64;
        summary.lines_read += 1;
        line_no += 1;

        match parse_record(buf.trim_end_matches(['\r', '\n'])) {
            Some(event) => {
                summary.events += 1;
                on_event(event, line_no)?;
            }
            None => summary.skipped += 1,
        }

        if summary.bytes_read >= next_progress {
            if file_size > 0 {
                debug!(
                    "  ({:5.2}%)    read: {} KB",
                    (summary.bytes_read as f64 / file_size as f64) * 100.0,
                    summary.bytes_read / 1024
                );
            }
            next_progress += PROGRESS_CHUNK_BYTES;
        }
    }

    info!(
        "Done ({} KB in {:.2} sec): {} events, {} lines skipped",
        summary.bytes_read / 1024,
        start.elapsed().as_secs_f64(),
        summary.events,
        summary.skipped
    );

    Ok(summary)
}

/// Consume and validate the three mandatory header lines
///
/// **Private** - internal helper for parse_trace_file
///
/// Returns the number of header bytes consumed.
fn read_header<R: BufRead>(reader: &mut R) -> Result<u64, TraceError> {
    let mut bytes: u64 = 0;
    let mut lines = [String::new(), String::new(), String::new()];

    for line in &mut lines {
        let n = reader.read_line(line)?;
        if n == 0 {
            return Err(TraceError::InvalidHeader(
                "file ends before the three header lines".to_string(),
            ));
        }
        bytes += n as u64;
    }

    if !lines[0].starts_with(HEADER_VERSION_PREFIX) {
        return Err(TraceError::InvalidHeader(format!(
            "first line must start with '{}'",
            HEADER_VERSION_PREFIX
        )));
    }
    if !lines[1].starts_with(HEADER_FORMAT_PREFIX) {
        return Err(TraceError::InvalidHeader(format!(
            "second line must start with '{}'",
            HEADER_FORMAT_PREFIX
        )));
    }
    if !lines[2].starts_with(HEADER_TRACE_PREFIX) {
        return Err(TraceError::InvalidHeader(format!(
            "third line must start with '{}'",
            HEADER_TRACE_PREFIX
        )));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::record::EventKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_trace(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Version: 2.9.8").unwrap();
        writeln!(file, "File format: 4").unwrap();
        writeln!(file, "TRACE START [2024-01-01 00:00:00]").unwrap();
        write!(file, "{}", body).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_streams_events_in_order() {
        let file = write_trace("1\t0\t0\t0.0\t1000\tmain\t1\n1\t0\t1\t2.0\t1500\n");

        let mut seen = Vec::new();
        let summary = parse_trace_file(file.path(), |event, line| {
            seen.push((event.kind, line));
            Ok(())
        })
        .unwrap();

        assert_eq!(summary.events, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(seen, vec![(EventKind::Entry, 4), (EventKind::Exit, 5)]);
    }

    #[test]
    fn test_skips_malformed_lines() {
        let file = write_trace("garbage line\n1\t0\t1\t2.0\t1500\n\n");

        let summary = parse_trace_file(file.path(), |_, _| Ok(())).unwrap();

        assert_eq!(summary.events, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.lines_read, 3);
    }

    #[test]
    fn test_rejects_wrong_version_header() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Version: 3.0.0").unwrap();
        writeln!(file, "File format: 4").unwrap();
        writeln!(file, "TRACE START").unwrap();
        file.flush().unwrap();

        let result = parse_trace_file(file.path(), |_, _| Ok(()));
        assert!(matches!(result, Err(TraceError::InvalidHeader(_))));
    }

    #[test]
    fn test_rejects_truncated_header() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Version: 2.9.8").unwrap();
        file.flush().unwrap();

        let result = parse_trace_file(file.path(), |_, _| Ok(()));
        assert!(matches!(result, Err(TraceError::InvalidHeader(_))));
    }

    #[test]
    fn test_callback_error_aborts_pass() {
        let file = write_trace("1\t0\t1\t2.0\t1500\n1\t0\t1\t3.0\t1500\n");

        let mut calls = 0;
        let result = parse_trace_file(file.path(), |_, line| {
            calls += 1;
            Err(TraceError::ExitIntoHole { depth: 1, line })
        });

        assert!(matches!(result, Err(TraceError::ExitIntoHole { .. })));
        assert_eq!(calls, 1);
    }
}
