use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::escape::escape_latex;

use super::data::{DataRecord, Schema, SchemaWarning};
use super::{BookElement, Group, RenderContext};

/// A chords-and-lyrics song typeset with the `songs` package.
///
/// `content` is raw `songs` markup (verses, chords) and is embedded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSong {
    pub artist: String,
    pub title: String,
    pub tuning: String,
    pub composer: String,
    pub album: String,
    pub year: String,
    pub content: String,
}

impl CSong {
    pub const KEYWORD: &'static str = "csong";
    pub const SCHEMA: Schema =
        Schema::new(&["artist", "title", "tuning", "composer", "album", "year", "content"])
            .with_multiline(&["content"]);

    /// Load a chord song from its data file.
    pub fn load(data_file: &Path) -> Result<(Self, Vec<SchemaWarning>)> {
        let (mut record, warnings) = DataRecord::load(data_file, &Self::SCHEMA)?;
        let song = Self {
            artist: record.take("artist"),
            title: record.take("title"),
            tuning: record.take("tuning"),
            composer: record.take("composer"),
            album: record.take("album"),
            year: record.take("year"),
            content: record.take("content"),
        };
        Ok((song, warnings))
    }
}

impl BookElement for CSong {
    fn keyword(&self) -> &'static str {
        Self::KEYWORD
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> Result<String> {
        let title = escape_latex(&self.title);
        let artist = escape_latex(&self.artist);
        Ok(format!(
            "\n\\csongtoc{{{title}}}{{{artist}}}\n\
             \\beginsong{{{title}}}[\n  by={{{artist}}},\n  cr={{{composer}}},\n]\n\
             \\musicnote{{{tuning}}}\n\n\
             {content}\n\
             \\endsong\n",
            composer = escape_latex(&self.composer),
            tuning = escape_latex(&self.tuning),
            content = self.content,
        ))
    }

    fn group(&self) -> Option<Group> {
        Some(Group::Songs)
    }
}

impl fmt::Display for CSong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CSong: {}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::test_support::with_context;
    use tempfile::TempDir;

    fn sample() -> CSong {
        CSong {
            artist: "Simon & Garfunkel".to_string(),
            title: "The Boxer".to_string(),
            tuning: "Capo 2".to_string(),
            composer: "Paul Simon".to_string(),
            album: "Bridge over Troubled Water".to_string(),
            year: "1969".to_string(),
            content: "\\beginverse\n\\[C]I am just a poor boy\n\\endverse".to_string(),
        }
    }

    #[test]
    fn test_render_escapes_metadata_not_content() {
        let out = with_context(|ctx| sample().render(ctx).unwrap());

        assert!(out.contains("\\csongtoc{The Boxer}{Simon \\& Garfunkel}"));
        assert!(out.contains("by={Simon \\& Garfunkel},"));
        assert!(out.contains("\\musicnote{Capo 2}"));
        assert!(out.contains("\\beginverse\n\\[C]I am just a poor boy\n\\endverse"));
        assert!(out.ends_with("\\endsong\n"));
    }

    #[test]
    fn test_is_grouped_as_songs() {
        assert_eq!(sample().group(), Some(Group::Songs));
    }

    #[test]
    fn test_load_content_as_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("boxer.json");
        std::fs::write(
            &path,
            r#"{
                "artist": "Simon & Garfunkel",
                "title": "The Boxer",
                "tuning": "",
                "composer": "Paul Simon",
                "album": "",
                "year": "1969",
                "content": ["\\beginverse", "Lie la lie", "\\endverse"]
            }"#,
        )
        .unwrap();

        let (song, warnings) = CSong::load(&path).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(song.year, "1969");
        assert_eq!(song.content, "\\beginverse\nLie la lie\n\\endverse");
    }
}
