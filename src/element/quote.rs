use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::escape::escape_latex;

use super::data::{DataRecord, Schema, SchemaWarning};
use super::{BookElement, RenderContext};

/// A quotation with its attribution, typeset with the `\fquote` macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub source: String,
}

impl Quote {
    pub const KEYWORD: &'static str = "quote";
    pub const SCHEMA: Schema = Schema::new(&["text", "source"]);

    /// Load a quote from its data file.
    pub fn load(data_file: &Path) -> Result<(Self, Vec<SchemaWarning>)> {
        let (mut record, warnings) = DataRecord::load(data_file, &Self::SCHEMA)?;
        let quote = Self {
            text: record.take("text"),
            source: record.take("source"),
        };
        Ok((quote, warnings))
    }
}

impl BookElement for Quote {
    fn keyword(&self) -> &'static str {
        Self::KEYWORD
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> Result<String> {
        Ok(format!(
            "\n\\fquote{{{}}}{{{}}}\n",
            escape_latex(&self.text),
            escape_latex(&self.source)
        ))
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quote: {}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::test_support::with_context;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_render() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("q.json");
        std::fs::write(
            &path,
            r#"{"text": "Less is more", "source": "Mies van der Rohe"}"#,
        )
        .unwrap();

        let (quote, warnings) = Quote::load(&path).unwrap();
        assert!(warnings.is_empty());

        let out = with_context(|ctx| quote.render(ctx).unwrap());
        assert_eq!(out, "\n\\fquote{Less is more}{Mies van der Rohe}\n");
    }

    #[test]
    fn test_render_escapes_text_and_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("q.json");
        std::fs::write(&path, r#"{"text": "100% & fun_time", "source": "A-B #2"}"#).unwrap();

        let (quote, _) = Quote::load(&path).unwrap();
        let out = with_context(|ctx| quote.render(ctx).unwrap());
        assert_eq!(out, "\n\\fquote{100\\% \\& fun\\_time}{A{-}B \\#2}\n");
    }
}
