use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::escape::escape_latex;

use super::data::{DataRecord, Schema, SchemaWarning};
use super::{BookElement, RenderContext};

/// Comment line the tablature converter leaves where a `\midi` block may go.
pub const MIDI_MARKER: &str = "% __MAGIC_MIDI_VS_LAYOUT_MARKER__";

/// A tablature song, converted to LilyPond notation by an external tool.
///
/// Building a `Song` only loads its data file and checks that the tablature
/// exists. The conversion runs in [`BookElement::realize`], once per song;
/// the converter's identifier for the generated `.ly` file is memoized.
#[derive(Debug, Clone)]
pub struct Song {
    pub artist: String,
    pub title: String,
    pub album: String,
    pub tuning: String,
    pub composer: String,
    /// Tablature file, resolved against the book's directory.
    pub tg_file: PathBuf,
    notation_id: OnceCell<String>,
}

impl Song {
    pub const KEYWORD: &'static str = "song";
    pub const SCHEMA: Schema =
        Schema::new(&["artist", "title", "album", "tuning", "composer", "tg_file"]);

    /// Load a song from its data file, resolving `tg_file` against `base_path`.
    pub fn load(base_path: &Path, data_file: &Path) -> Result<(Self, Vec<SchemaWarning>)> {
        let (mut record, warnings) = DataRecord::load(data_file, &Self::SCHEMA)?;

        let tg_file = base_path.join(record.take("tg_file"));
        if !tg_file.is_file() {
            return Err(Error::MissingResource(tg_file));
        }

        let song = Self {
            artist: record.take("artist"),
            title: record.take("title"),
            album: record.take("album"),
            tuning: record.take("tuning"),
            composer: record.take("composer"),
            tg_file,
            notation_id: OnceCell::new(),
        };
        Ok((song, warnings))
    }

    /// Identifier of the converted notation, once realized.
    pub fn notation_id(&self) -> Option<&str> {
        self.notation_id.get().map(String::as_str)
    }

    fn render_midi(&self, ctx: &RenderContext<'_>, id: &str) -> Result<()> {
        let out_dir = &ctx.options.out_dir;
        let ly_path = out_dir.join(format!("{id}.ly"));
        let midi_ly_path = out_dir.join(format!("{id}_midi.ly"));

        let source = std::fs::read_to_string(&ly_path)?;
        std::fs::write(&midi_ly_path, patch_midi_block(&source))?;

        let rendered = ctx.toolchain.render_audio(&midi_ly_path, &out_dir.join(id));

        if let Err(e) = std::fs::remove_file(&midi_ly_path) {
            tracing::warn!("could not remove {}: {e}", midi_ly_path.display());
        }
        rendered
    }
}

/// Enable MIDI output in a converted LilyPond file.
pub fn patch_midi_block(source: &str) -> String {
    source.replace(MIDI_MARKER, "\\midi {}")
}

impl BookElement for Song {
    fn keyword(&self) -> &'static str {
        Self::KEYWORD
    }

    fn realize(&self, ctx: &RenderContext<'_>) -> Result<()> {
        if self.notation_id.get().is_some() {
            return Ok(());
        }

        let id = ctx
            .toolchain
            .convert_tablature(&self.tg_file, &ctx.options.out_dir)?;
        tracing::debug!("converted {} to {id}.ly", self.tg_file.display());

        if ctx.options.midi {
            self.render_midi(ctx, &id)?;
        }

        let _ = self.notation_id.set(id);
        Ok(())
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let id = self
            .notation_id
            .get()
            .ok_or_else(|| Error::Unrealized(self.title.clone()))?;
        let out_dir = &ctx.options.out_dir;

        let header = format!(
            "\\songheader{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}",
            escape_latex(&self.title),
            escape_latex(&self.artist),
            escape_latex(&self.album),
            escape_latex(&self.tuning),
            escape_latex(&self.composer),
        );
        let ly_file = out_dir.join(format!("{id}.ly"));

        if ctx.options.midi {
            let midi_file = out_dir.join(format!("{id}.midi"));
            Ok(format!(
                "\n{header}%\n\\marginpar{{\\attachfile[mimetype=audio/midi, print=false]{{{}}}}}\n\\lilypondfile{{{}}}\n",
                midi_file.display(),
                ly_file.display()
            ))
        } else {
            Ok(format!("\n{header}\n\\lilypondfile{{{}}}\n", ly_file.display()))
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Song: {}", self.title)
    }
}
