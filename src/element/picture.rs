use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::data::{DataRecord, Schema, SchemaWarning};
use super::{BookElement, RenderContext};

/// Horizontal placement of a picture inside its figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Parse an `align` value. Anything unrecognised is left-aligned.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "center" => Align::Center,
            "right" => Align::Right,
            "left" | "" => Align::Left,
            other => {
                tracing::debug!("unknown picture alignment {other:?}, using left");
                Align::Left
            }
        }
    }

    /// The LaTeX layout directive for this alignment.
    pub fn directive(self) -> &'static str {
        match self {
            Align::Left => r"\raggedright",
            Align::Center => r"\centering",
            Align::Right => r"\raggedleft",
        }
    }
}

/// An image placed in a floating figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub align: Align,
    /// `\includegraphics` option list, e.g. `width=0.8\textwidth`.
    pub size: String,
    /// Absolute path of the image.
    pub pic_path: PathBuf,
}

impl Picture {
    pub const KEYWORD: &'static str = "pic";
    pub const SCHEMA: Schema = Schema::new(&["align", "size", "pic_path"]);

    /// Load a picture from its data file, resolving `pic_path` against
    /// `base_path`.
    pub fn load(base_path: &Path, data_file: &Path) -> Result<(Self, Vec<SchemaWarning>)> {
        let (mut record, warnings) = DataRecord::load(data_file, &Self::SCHEMA)?;

        let pic_path = std::path::absolute(base_path.join(record.take("pic_path")))?;
        if !pic_path.is_file() {
            return Err(Error::MissingResource(pic_path));
        }

        let picture = Self {
            align: Align::parse(&record.take("align")),
            size: record.take("size"),
            pic_path,
        };
        Ok((picture, warnings))
    }
}

impl BookElement for Picture {
    fn keyword(&self) -> &'static str {
        Self::KEYWORD
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> Result<String> {
        Ok(format!(
            "\n\\begin{{figure}}[htb]\n{}\n\\includegraphics[{}]{{{}}}\n\\end{{figure}}\n",
            self.align.directive(),
            self.size,
            self.pic_path.display()
        ))
    }
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Picture: {}", self.pic_path.display())
    }
}
