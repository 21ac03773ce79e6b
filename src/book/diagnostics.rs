use std::fmt;

use crate::element::SchemaWarning;
use crate::error::Error;

/// A book line that could not be turned into an element.
#[derive(Debug)]
pub struct LineError {
    /// 1-based line number.
    pub line_no: usize,
    /// The line as written, surrounding whitespace removed.
    pub line: String,
    pub error: Error,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid line {}: {:?}: {}", self.line_no, self.line, self.error)
    }
}

/// Something suspicious about a book that did not stop it from building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A data file did not match its element's schema.
    Schema { line_no: usize, warning: SchemaWarning },
    /// No `title` line; the default title is used.
    MissingTitle { default: String },
    /// More than one `title` line; the first one is used.
    MultipleTitles { count: usize, used: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Schema { line_no, warning } => write!(f, "line {line_no}: {warning}"),
            Warning::MissingTitle { default } => {
                write!(f, "title not defined, using default {default:?}")
            }
            Warning::MultipleTitles { count, used } => {
                write!(f, "{count} titles defined, using the first one: {used:?}")
            }
        }
    }
}
