//! Line-oriented book description parser.
//!
//! ```text
//! # My songbook
//! title:Campfire Classics
//! chapter:Folk
//! song:songs/boxer.json     # tablature song
//! csong:songs/wonderwall.json
//! ```
//!
//! Everything after the first `#` on a line is a comment, so payloads cannot
//! contain `#`. A line is split at its first `:` into keyword and payload.

use memchr::memchr;

use crate::element::Element;
use crate::error::{Error, Result};
use crate::factory::ElementFactory;

use super::diagnostics::{LineError, Warning};

/// Elements parsed from a book, plus what went wrong on the way.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub elements: Vec<Element>,
    pub errors: Vec<LineError>,
    pub warnings: Vec<Warning>,
}

/// Strip whitespace and the trailing comment from a raw line.
///
/// Returns `None` for lines that hold nothing but whitespace or a comment.
pub fn strip_line(raw: &str) -> Option<&str> {
    let line = raw.trim();
    let line = match memchr(b'#', line.as_bytes()) {
        Some(pos) => &line[..pos],
        None => line,
    };
    let line = line.trim_end();
    (!line.is_empty()).then_some(line)
}

/// Split a stripped line into `(keyword, payload)` at the first `:`.
pub fn split_line(line: &str) -> Result<(&str, &str)> {
    match memchr(b':', line.as_bytes()) {
        Some(pos) => Ok((&line[..pos], &line[pos + 1..])),
        None => Err(Error::MalformedLine(line.to_string())),
    }
}

/// Parse book description text.
///
/// A bad line is logged, recorded in [`ParseOutput::errors`] and skipped; it
/// never stops the rest of the book from parsing.
pub fn parse(text: &str, factory: &ElementFactory) -> ParseOutput {
    let mut output = ParseOutput::default();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let Some(line) = strip_line(raw) else {
            continue;
        };

        let created =
            split_line(line).and_then(|(keyword, payload)| factory.create(keyword, payload));
        match created {
            Ok(created) => {
                for warning in created.warnings {
                    tracing::warn!("line {line_no}: {warning}");
                    output.warnings.push(Warning::Schema { line_no, warning });
                }
                tracing::debug!("{}", created.element);
                output.elements.push(created.element);
            }
            Err(error) => {
                let error = LineError {
                    line_no,
                    line: raw.trim().to_string(),
                    error,
                };
                tracing::error!("{error}");
                output.errors.push(error);
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::BookElement;

    #[test]
    fn test_strip_line() {
        assert_eq!(strip_line("  chapter:Intro  \n"), Some("chapter:Intro"));
        assert_eq!(strip_line("chapter:Intro # first"), Some("chapter:Intro"));
        assert_eq!(strip_line("# just a comment"), None);
        assert_eq!(strip_line("   "), None);
        assert_eq!(strip_line(""), None);
    }

    #[test]
    fn test_hash_truncates_payload() {
        assert_eq!(strip_line("chapter:Song #1"), Some("chapter:Song"));
    }

    #[test]
    fn test_split_line_at_first_colon() {
        assert_eq!(split_line("chapter:Intro").unwrap(), ("chapter", "Intro"));
        assert_eq!(split_line("title:Live: 1999").unwrap(), ("title", "Live: 1999"));
        assert_eq!(split_line("chapter:").unwrap(), ("chapter", ""));
    }

    #[test]
    fn test_split_line_without_colon() {
        assert!(matches!(split_line("chapter Intro"), Err(Error::MalformedLine(_))));
    }

    #[test]
    fn test_parse_inline_elements_in_order() {
        let factory = ElementFactory::new(".");
        let output = parse("title:My Book\n\n# comment\nchapter:One\nchapter:Two\n", &factory);

        assert!(output.errors.is_empty());
        let keywords: Vec<_> = output.elements.iter().map(|e| e.keyword()).collect();
        assert_eq!(keywords, ["title", "chapter", "chapter"]);
        assert_eq!(output.elements[2].to_string(), "Chapter: Two");
    }

    #[test]
    fn test_parse_records_bad_lines_and_continues() {
        let factory = ElementFactory::new(".");
        let output = parse("chapter:One\nno separator\nbogus:x\r\nchapter:Two", &factory);

        assert_eq!(output.elements.len(), 2);
        assert_eq!(output.errors.len(), 2);
        assert_eq!(output.errors[0].line_no, 2);
        assert!(matches!(output.errors[0].error, Error::MalformedLine(_)));
        assert_eq!(output.errors[1].line_no, 3);
        assert_eq!(output.errors[1].line, "bogus:x");
        assert!(matches!(output.errors[1].error, Error::UnknownElement(_)));
    }

    #[test]
    fn test_line_error_display() {
        let error = LineError {
            line_no: 3,
            line: "bogus:x".to_string(),
            error: Error::UnknownElement("bogus".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "invalid line 3: \"bogus:x\": unknown element keyword: \"bogus\""
        );
    }
}
