//! Recording [`Toolchain`] for unit tests.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use super::Toolchain;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct FakeToolchain {
    ly_source: Option<String>,
    fail_conversion: bool,
    conversions: Cell<usize>,
    audio: RefCell<Vec<(String, PathBuf)>>,
    calls: RefCell<Vec<String>>,
}

impl FakeToolchain {
    /// Write `source` as the converted `.ly` file on every conversion.
    pub fn with_ly_source(mut self, source: impl Into<String>) -> Self {
        self.ly_source = Some(source.into());
        self
    }

    pub fn failing_conversion(mut self) -> Self {
        self.fail_conversion = true;
        self
    }

    pub fn conversions(&self) -> usize {
        self.conversions.get()
    }

    /// Contents and output stems passed to the audio renderer.
    pub fn audio_sources(&self) -> Vec<(String, PathBuf)> {
        self.audio.borrow().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Toolchain for FakeToolchain {
    fn convert_tablature(&self, tab_file: &Path, out_dir: &Path) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(format!("convert {}", tab_file.display()));
        if self.fail_conversion {
            return Err(Error::ToolExecution {
                tool: "tablature converter".into(),
                reason: "exit status: 1".into(),
            });
        }

        let n = self.conversions.get() + 1;
        self.conversions.set(n);
        let id = format!("song-{n}");
        if let Some(source) = &self.ly_source {
            std::fs::write(out_dir.join(format!("{id}.ly")), source)?;
        }
        Ok(id)
    }

    fn render_audio(&self, source: &Path, output_stem: &Path) -> Result<()> {
        let text = std::fs::read_to_string(source)?;
        self.audio
            .borrow_mut()
            .push((text, output_stem.to_path_buf()));
        self.calls
            .borrow_mut()
            .push(format!("audio {}", output_stem.display()));
        Ok(())
    }

    fn typeset(&self, document: &Path, _out_dir: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("typeset {}", document.display()));
        Ok(())
    }

    fn compile(&self, tex_name: &str, _out_dir: &Path, draft: bool) -> Result<()> {
        let mode = if draft { "draft" } else { "final" };
        self.calls
            .borrow_mut()
            .push(format!("compile {mode} {tex_name}"));
        Ok(())
    }
}
