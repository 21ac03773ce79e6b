use std::fmt;

use crate::error::Result;

use super::{BookElement, RenderContext};

/// Book title. Contributes to the document preamble, renders nothing inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub title: String,
}

impl Title {
    pub const KEYWORD: &'static str = "title";

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl BookElement for Title {
    fn keyword(&self) -> &'static str {
        Self::KEYWORD
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> Result<String> {
        Ok(String::new())
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title: {}", self.title)
    }
}
