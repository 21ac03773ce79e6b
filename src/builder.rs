//! Build pipeline from book description to PDF.
//!
//! 1. Parse the book and convert its songs
//! 2. Write `<stem>.lytex` and install the style package
//! 3. Typeset embedded notation with `lilypond-book`
//! 4. Compile with `pdflatex`: a draft pass, then a final pass unless in draft mode

use std::fs;
use std::path::PathBuf;

use crate::book::Book;
use crate::config::BuildOptions;
use crate::document::STYLE_PACKAGE;
use crate::element::RenderContext;
use crate::error::Result;
use crate::tools::Toolchain;

/// Style package used when no custom one is configured.
pub const DEFAULT_STYLE: &str = include_str!("../assets/songbook.sty");

/// Files produced by a build.
#[derive(Debug)]
pub struct BuildOutput {
    pub book: Book,
    /// The assembled `.lytex` document.
    pub document: PathBuf,
    /// The PDF the final pass writes (absent after a draft-only build).
    pub pdf: PathBuf,
}

/// Drives a complete songbook build.
pub struct BookBuilder<'a> {
    options: &'a BuildOptions,
    toolchain: &'a dyn Toolchain,
}

impl<'a> BookBuilder<'a> {
    pub fn new(options: &'a BuildOptions, toolchain: &'a dyn Toolchain) -> Self {
        Self { options, toolchain }
    }

    /// Run every build step in order. Any tool failure aborts the build.
    pub fn build(&self) -> Result<BuildOutput> {
        let out_dir = &self.options.out_dir;
        let ctx = RenderContext::new(self.options, self.toolchain);

        tracing::info!("Parsing book and converting songs...");
        let book = Book::open(&self.options.in_path)?;
        fs::create_dir_all(out_dir)?;
        book.realize(&ctx)?;

        tracing::info!("Generating book...");
        let stem = book.file_stem();
        let document = out_dir.join(format!("{stem}.lytex"));
        fs::write(&document, book.to_document(&ctx)?)?;

        // lilypond-book measures the text width, so the style must be in place first.
        self.install_style()?;
        self.toolchain.typeset(&document, out_dir)?;

        tracing::info!("Compiling book...");
        let tex_name = format!("{stem}.tex");
        self.toolchain.compile(&tex_name, out_dir, true)?;
        if !self.options.draft {
            self.toolchain.compile(&tex_name, out_dir, false)?;
        }

        Ok(BuildOutput {
            book,
            document,
            pdf: out_dir.join(format!("{stem}.pdf")),
        })
    }

    /// Put the style package next to the document.
    pub fn install_style(&self) -> Result<PathBuf> {
        let target = self.options.out_dir.join(format!("{STYLE_PACKAGE}.sty"));
        match &self.options.style_file {
            Some(source) => {
                fs::copy(source, &target)?;
            }
            None => fs::write(&target, DEFAULT_STYLE)?,
        }
        Ok(target)
    }
}
