//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading and replaying a trace file
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("not an Xdebug trace file made with format option '1': {0}")]
    InvalidHeader(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An exit record referenced a stack slot that was never filled by an
    /// entry record. The trace skipped a depth on the way down, so there is
    /// no frame to close.
    #[error("exit at depth {depth} (line {line}) has no matching entry frame")]
    ExitIntoHole { depth: usize, line: u64 },
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
