use std::fmt;

use crate::error::Result;
use crate::escape::escape_latex;

use super::{BookElement, RenderContext};

/// Chapter heading, listed in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub text: String,
}

impl Chapter {
    pub const KEYWORD: &'static str = "chapter";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl BookElement for Chapter {
    fn keyword(&self) -> &'static str {
        Self::KEYWORD
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> Result<String> {
        Ok(format!("\n\\ltchapter{{{}}}\n", escape_latex(&self.text)))
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chapter: {}", self.text)
    }
}
