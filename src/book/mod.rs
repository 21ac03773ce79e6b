//! A parsed book: ordered elements, resolved title and diagnostics.

mod diagnostics;
pub mod parser;

pub use diagnostics::{LineError, Warning};
pub use parser::ParseOutput;

use std::path::{Path, PathBuf};

use crate::document;
use crate::element::{BookElement, Element, RenderContext};
use crate::error::Result;
use crate::factory::ElementFactory;
use crate::util::{file_stem_for_title, read_text_file};

/// A songbook parsed from its description file.
#[derive(Debug)]
pub struct Book {
    /// Path of the description file, if it was read from disk.
    pub path: Option<PathBuf>,
    pub title: String,
    /// Elements in file order.
    pub elements: Vec<Element>,
    /// Lines that were skipped.
    pub errors: Vec<LineError>,
    pub warnings: Vec<Warning>,
}

impl Book {
    /// Read and parse the book description at `path`.
    ///
    /// Relative payload paths resolve against the file's directory. Only a
    /// failure to read the book file itself is an error; bad lines end up in
    /// [`Book::errors`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_text_file(path)?;
        let base_path = path.parent().unwrap_or_else(|| Path::new(""));

        let mut book = Self::parse(&text, &ElementFactory::new(base_path));
        book.path = Some(path.to_path_buf());
        Ok(book)
    }

    /// Parse book description text with `factory`.
    pub fn parse(text: &str, factory: &ElementFactory) -> Self {
        let ParseOutput {
            elements,
            errors,
            mut warnings,
        } = parser::parse(text, factory);

        let (title, title_warning) = document::select_title(&elements);
        if let Some(warning) = title_warning {
            tracing::warn!("{warning}");
            warnings.push(warning);
        }

        Self {
            path: None,
            title,
            elements,
            errors,
            warnings,
        }
    }

    /// File stem for generated files (`<stem>.lytex`, `<stem>.tex`, `<stem>.pdf`).
    pub fn file_stem(&self) -> String {
        file_stem_for_title(&self.title)
    }

    /// Run external conversions for every element, in order.
    ///
    /// Already-realized elements are skipped, so this may be called before
    /// [`Book::to_document`] to surface tool failures early.
    pub fn realize(&self, ctx: &RenderContext<'_>) -> Result<()> {
        self.elements.iter().try_for_each(|e| e.realize(ctx))
    }

    /// Assemble the complete LaTeX document.
    pub fn to_document(&self, ctx: &RenderContext<'_>) -> Result<String> {
        document::assemble(&self.elements, &self.title, ctx)
    }
}
