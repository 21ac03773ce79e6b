//! Error types for songbook operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing, assembling or building a book.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown element keyword: {0:?}")]
    UnknownElement(String),

    #[error("malformed data file {path}: {reason}")]
    MalformedData { path: PathBuf, reason: String },

    #[error("missing resource: {}", .0.display())]
    MissingResource(PathBuf),

    #[error("malformed line, expected `keyword:payload`: {0:?}")]
    MalformedLine(String),

    #[error("required tool not available: {tool} ({reason})")]
    ToolUnavailable { tool: String, reason: String },

    #[error("{tool} failed: {reason}")]
    ToolExecution { tool: String, reason: String },

    #[error("{tool} did not finish within {seconds} seconds")]
    ToolTimeout { tool: String, seconds: u64 },

    #[error("song {0:?} rendered before its notation was converted")]
    Unrealized(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error only invalidates a single book line.
    ///
    /// Recoverable errors are logged and the offending element is skipped;
    /// everything else aborts the build.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnknownElement(_)
                | Error::MalformedData { .. }
                | Error::MissingResource(_)
                | Error::MalformedLine(_)
                | Error::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
