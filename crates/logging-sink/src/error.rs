//! crates/logging-sink/src/error.rs
//!
//! Error types for the line sink.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Failures encountered while delivering a line.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log file could not be opened for appending.
    #[error("failed to open log file '{}': {source}", .path.display())]
    Open {
        /// Configured log file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Appending to the open log file failed.
    #[error("failed to write log file '{}': {source}", .path.display())]
    Write {
        /// Log file that rejected the write.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Writing to the stderr channel failed.
    #[error("failed to write to standard error: {0}")]
    Stderr(#[source] io::Error),
}

/// A string that does not name a [`Format`](crate::Format).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown log format '{input}'")]
pub struct ParseFormatError {
    input: String,
}

impl ParseFormatError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A string that does not name a [`Severity`](crate::Severity).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown severity '{input}'")]
pub struct ParseSeverityError {
    input: String,
}

impl ParseSeverityError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}
