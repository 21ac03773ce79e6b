//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use songbook::{Result, Toolchain};
use tempfile::TempDir;

/// Toolchain that hands out identifiers without running anything.
#[derive(Debug, Default)]
pub struct StubToolchain {
    pub calls: RefCell<Vec<String>>,
}

impl Toolchain for StubToolchain {
    fn convert_tablature(&self, tab_file: &Path, _out_dir: &Path) -> Result<String> {
        let mut calls = self.calls.borrow_mut();
        calls.push(format!("convert {}", tab_file.display()));
        Ok(format!("notation{}", calls.len()))
    }

    fn render_audio(&self, _source: &Path, output_stem: &Path) -> Result<()> {
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
        self.calls
            .borrow_mut()
            .push(format!("compile {tex_name} draft={draft}"));
        Ok(())
    }
}

/// A book directory on disk.
pub struct BookDir {
    pub dir: TempDir,
}

impl BookDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn book(&self, lines: &[&str]) -> PathBuf {
        self.file("book.txt", &lines.join("\n"))
    }

    pub fn quote(&self, name: &str) {
        self.file(
            name,
            r#"{"text": "Without music, life would be a mistake.", "source": "Nietzsche"}"#,
        );
    }

    pub fn song(&self, name: &str, tg_file: &str) {
        self.file(
            name,
            &format!(
                r#"{{"artist": "Artist", "title": "Title", "album": "Album",
                    "tuning": "Standard", "composer": "Composer", "tg_file": "{tg_file}"}}"#
            ),
        );
    }

    pub fn csong(&self, name: &str, title: &str) {
        self.file(
            name,
            &format!(
                r#"{{"artist": "Artist", "title": "{title}", "tuning": "", "composer": "",
                    "album": "", "year": "", "content": "\\beginverse\nLa\n\\endverse"}}"#
            ),
        );
    }
}
