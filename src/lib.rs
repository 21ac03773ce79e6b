//! # songbook
//!
//! Build songbooks from a plain-text book description using LilyPond and LaTeX.
//!
//! A book description lists one element per line:
//!
//! ```text
//! title:Campfire Classics
//! chapter:Folk
//! song:songs/boxer.json       # tablature, converted to LilyPond notation
//! csong:songs/wonderwall.json # chords and lyrics
//! quote:quotes/dylan.json
//! pic:pictures/stage.json
//! ```
//!
//! ## Pipeline
//!
//! - [`Book::open`] parses the description. Bad lines are logged and skipped.
//! - [`Book::to_document`] assembles the LaTeX document, converting songs
//!   through a [`Toolchain`] on the way.
//! - [`BookBuilder`] runs the whole build, ending in a PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use songbook::{BookBuilder, BuildOptions, SystemToolchain};
//!
//! let options = BuildOptions::new("book.txt", "out");
//! let toolchain = SystemToolchain::from_options(&options);
//! toolchain.check_environment(options.midi)?;
//! let output = BookBuilder::new(&options, &toolchain).build()?;
//! println!("wrote {}", output.pdf.display());
//! # Ok::<(), songbook::Error>(())
//! ```

pub mod book;
pub mod builder;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod escape;
pub mod factory;
pub mod tools;
pub(crate) mod util;

pub use book::{Book, LineError, Warning};
pub use builder::{BookBuilder, BuildOutput};
pub use config::{BuildOptions, ToolConfig};
pub use document::{DEFAULT_TITLE, assemble, select_title};
pub use element::{BookElement, Element, ElementKind, Group, RenderContext};
pub use error::{Error, Result};
pub use escape::escape_latex;
pub use factory::{Created, ElementFactory};
pub use tools::{SystemToolchain, Toolchain};
