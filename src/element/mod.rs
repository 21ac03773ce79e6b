//! Book elements: the typed units a book description is made of.
//!
//! Every line of a book becomes one [`Element`]. Each variant lives in its own
//! module and implements [`BookElement`]:
//!
//! - [`Title`]: book title, renders nothing inline
//! - [`Chapter`]: chapter heading
//! - [`Song`]: tablature song, converted to LilyPond notation
//! - [`CSong`]: chords-and-lyrics song, grouped in a `songs` environment
//! - [`Quote`]: quotation with attribution
//! - [`Picture`]: figure with an image
//!
//! Variants backed by a data file read it through [`data::DataRecord`].

pub mod data;

mod chapter;
mod csong;
mod picture;
mod quote;
mod song;
mod title;

pub use chapter::Chapter;
pub use csong::CSong;
pub use data::{Schema, SchemaWarning};
pub use picture::{Align, Picture};
pub use quote::Quote;
pub use song::{MIDI_MARKER, Song, patch_midi_block};
pub use title::Title;

use std::fmt;

use crate::config::BuildOptions;
use crate::error::Result;
use crate::tools::Toolchain;

/// Everything an element needs to realize and render itself.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub options: &'a BuildOptions,
    pub toolchain: &'a dyn Toolchain,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a BuildOptions, toolchain: &'a dyn Toolchain) -> Self {
        Self { options, toolchain }
    }
}

/// Environment shared by consecutive elements of the same kind.
///
/// The assembler opens a group before the first element of a run and closes
/// it after the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// `songs` environment of the `songs` package.
    Songs,
}

impl Group {
    pub fn begin(self) -> &'static str {
        match self {
            Group::Songs => "\n\\begin{songs}{}\n",
        }
    }

    pub fn end(self) -> &'static str {
        match self {
            Group::Songs => "\n\\end{songs}\n",
        }
    }
}

/// Capability shared by all book elements.
pub trait BookElement: fmt::Display {
    /// Keyword introducing this element in a book description.
    fn keyword(&self) -> &'static str;

    /// LaTeX fragment for this element.
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String>;

    /// Run any external work the rendering depends on.
    ///
    /// Must be idempotent: calling it again after success does nothing.
    fn realize(&self, _ctx: &RenderContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Group this element must be wrapped in, if any.
    fn group(&self) -> Option<Group> {
        None
    }
}

/// Closed set of element kinds, one per keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Title,
    Chapter,
    Song,
    CSong,
    Quote,
    Picture,
}

impl ElementKind {
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Title,
        ElementKind::Chapter,
        ElementKind::Song,
        ElementKind::CSong,
        ElementKind::Quote,
        ElementKind::Picture,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ElementKind::Title => Title::KEYWORD,
            ElementKind::Chapter => Chapter::KEYWORD,
            ElementKind::Song => Song::KEYWORD,
            ElementKind::CSong => CSong::KEYWORD,
            ElementKind::Quote => Quote::KEYWORD,
            ElementKind::Picture => Picture::KEYWORD,
        }
    }
}

/// One parsed book element.
#[derive(Debug, Clone)]
pub enum Element {
    Title(Title),
    Chapter(Chapter),
    Song(Song),
    CSong(CSong),
    Quote(Quote),
    Picture(Picture),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Title(_) => ElementKind::Title,
            Element::Chapter(_) => ElementKind::Chapter,
            Element::Song(_) => ElementKind::Song,
            Element::CSong(_) => ElementKind::CSong,
            Element::Quote(_) => ElementKind::Quote,
            Element::Picture(_) => ElementKind::Picture,
        }
    }

    fn as_dyn(&self) -> &dyn BookElement {
        match self {
            Element::Title(e) => e,
            Element::Chapter(e) => e,
            Element::Song(e) => e,
            Element::CSong(e) => e,
            Element::Quote(e) => e,
            Element::Picture(e) => e,
        }
    }
}

impl BookElement for Element {
    fn keyword(&self) -> &'static str {
        self.as_dyn().keyword()
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        self.as_dyn().render(ctx)
    }

    fn realize(&self, ctx: &RenderContext<'_>) -> Result<()> {
        self.as_dyn().realize(ctx)
    }

    fn group(&self) -> Option<Group> {
        self.as_dyn().group()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_dyn(), f)
    }
}
