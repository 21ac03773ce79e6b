//! Explicit build configuration.
//!
//! Every component that needs to know where the book lives, where output goes
//! or how chatty external tools should be receives a [`BuildOptions`] value.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Locations of the external programs a build shells out to.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Java runtime used to run the tablature converter.
    pub java: PathBuf,
    /// Tablature-to-LilyPond converter jar.
    pub converter_jar: PathBuf,
    /// LaTeX preprocessor that typesets embedded LilyPond snippets.
    pub lilypond_book: PathBuf,
    /// LilyPond itself, used for MIDI rendering.
    pub lilypond: PathBuf,
    /// LaTeX compiler.
    pub pdflatex: PathBuf,
    /// Upper bound on each external process. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            java: PathBuf::from("java"),
            converter_jar: PathBuf::from("bin/tg2ly.jar"),
            lilypond_book: PathBuf::from("lilypond-book"),
            lilypond: PathBuf::from("lilypond"),
            pdflatex: PathBuf::from("pdflatex"),
            timeout: None,
        }
    }
}

/// Options for one songbook build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Path of the book description file.
    pub in_path: PathBuf,
    /// Directory that receives generated files.
    pub out_dir: PathBuf,
    /// Verbosity level (0 = quiet tools, 1 = tool warnings, 2 = everything).
    pub verbose: u8,
    /// Stop after the draft compiler pass.
    pub draft: bool,
    /// Render a MIDI sidecar for each song and attach it to the PDF.
    pub midi: bool,
    /// Custom LaTeX style file; the built-in one is used when absent.
    pub style_file: Option<PathBuf>,
    pub tools: ToolConfig,
}

impl BuildOptions {
    /// Create options with default tools for the given input and output.
    pub fn new(in_path: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            in_path: in_path.into(),
            out_dir: out_dir.into(),
            verbose: 0,
            draft: false,
            midi: false,
            style_file: None,
            tools: ToolConfig::default(),
        }
    }

    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    pub fn with_midi(mut self, midi: bool) -> Self {
        self.midi = midi;
        self
    }

    pub fn with_style_file(mut self, style_file: impl Into<PathBuf>) -> Self {
        self.style_file = Some(style_file.into());
        self
    }

    pub fn with_tools(mut self, tools: ToolConfig) -> Self {
        self.tools = tools;
        self
    }

    /// Directory that relative paths in the book are resolved against.
    pub fn base_path(&self) -> &Path {
        self.in_path.parent().unwrap_or_else(|| Path::new(""))
    }
}
