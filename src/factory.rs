//! Keyword dispatch from book lines to elements.
//!
//! The registry is built once from [`ElementKind::ALL`] and maps each keyword
//! to a constructor. Constructors only load data and validate resources; no
//! external program runs until an element is realized.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::element::{
    CSong, Chapter, Element, ElementKind, Picture, Quote, SchemaWarning, Song, Title,
};
use crate::error::{Error, Result};

/// A freshly built element with the warnings its data file produced.
#[derive(Debug)]
pub struct Created {
    pub element: Element,
    pub warnings: Vec<SchemaWarning>,
}

impl Created {
    fn inline(element: Element) -> Self {
        Self {
            element,
            warnings: Vec::new(),
        }
    }
}

type Constructor = fn(&ElementFactory, &str) -> Result<Created>;

/// Creates elements from `keyword:payload` pairs.
///
/// Payloads of data-backed elements are paths relative to `base_path`, the
/// directory of the book file.
#[derive(Debug, Clone)]
pub struct ElementFactory {
    base_path: PathBuf,
    registry: HashMap<&'static str, Constructor>,
}

impl ElementFactory {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let registry = ElementKind::ALL
            .into_iter()
            .map(|kind| (kind.keyword(), constructor(kind)))
            .collect();

        Self {
            base_path: base_path.into(),
            registry,
        }
    }

    /// Build the element `keyword` describes.
    pub fn create(&self, keyword: &str, payload: &str) -> Result<Created> {
        let constructor = self
            .registry
            .get(keyword)
            .ok_or_else(|| Error::UnknownElement(keyword.to_string()))?;
        constructor(self, payload)
    }

    fn data_file(&self, payload: &str) -> PathBuf {
        self.base_path.join(payload)
    }
}

fn constructor(kind: ElementKind) -> Constructor {
    match kind {
        ElementKind::Title => create_title,
        ElementKind::Chapter => create_chapter,
        ElementKind::Song => create_song,
        ElementKind::CSong => create_csong,
        ElementKind::Quote => create_quote,
        ElementKind::Picture => create_picture,
    }
}

fn create_title(_: &ElementFactory, payload: &str) -> Result<Created> {
    Ok(Created::inline(Element::Title(Title::new(payload))))
}

fn create_chapter(_: &ElementFactory, payload: &str) -> Result<Created> {
    Ok(Created::inline(Element::Chapter(Chapter::new(payload))))
}

fn create_song(factory: &ElementFactory, payload: &str) -> Result<Created> {
    let (song, warnings) = Song::load(&factory.base_path, &factory.data_file(payload))?;
    Ok(Created {
        element: Element::Song(song),
        warnings,
    })
}

fn create_csong(factory: &ElementFactory, payload: &str) -> Result<Created> {
    let (song, warnings) = CSong::load(&factory.data_file(payload))?;
    Ok(Created {
        element: Element::CSong(song),
        warnings,
    })
}

fn create_quote(factory: &ElementFactory, payload: &str) -> Result<Created> {
    let (quote, warnings) = Quote::load(&factory.data_file(payload))?;
    Ok(Created {
        element: Element::Quote(quote),
        warnings,
    })
}

fn create_picture(factory: &ElementFactory, payload: &str) -> Result<Created> {
    let (picture, warnings) = Picture::load(&factory.base_path, &factory.data_file(payload))?;
    Ok(Created {
        element: Element::Picture(picture),
        warnings,
    })
}
