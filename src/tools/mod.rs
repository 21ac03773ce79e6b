//! External programs a songbook build depends on.
//!
//! The [`Toolchain`] trait is the seam between book logic and the outside
//! world: song realization converts tablature through it and the builder
//! typesets and compiles through it. [`SystemToolchain`] runs the real
//! programs configured in [`ToolConfig`].
//!
//! Command-line contracts:
//!
//! | Step | Command |
//! |---|---|
//! | Tablature conversion | `java -jar <jar> --in <tab> --out <dir>`, prints the notation identifier |
//! | Audio rendering | `lilypond [--loglevel=NONE] -o <stem> <file>_midi.ly` |
//! | Typesetting | `lilypond-book --pdf [--loglevel=WARN --lily-loglevel=WARN] --format=latex --out=<dir> <file>.lytex` |
//! | Compilation | `pdflatex [-draftmode] -interaction=nonstopmode -output-directory=<dir> <file>.tex` |

mod process;

#[cfg(test)]
pub(crate) mod fake;

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::config::{BuildOptions, ToolConfig};
use crate::error::{Error, Result};

use process::Stdout;

/// Operations backed by external programs.
pub trait Toolchain {
    /// Convert a tablature file to LilyPond in `out_dir`.
    ///
    /// Returns the identifier of the generated notation: the file is
    /// `<out_dir>/<identifier>.ly`.
    fn convert_tablature(&self, tab_file: &Path, out_dir: &Path) -> Result<String>;

    /// Render `source` to audio, writing `<output_stem>.midi`.
    fn render_audio(&self, source: &Path, output_stem: &Path) -> Result<()>;

    /// Expand embedded notation in `document`, producing `.tex` in `out_dir`.
    fn typeset(&self, document: &Path, out_dir: &Path) -> Result<()>;

    /// Compile `<out_dir>/<tex_name>` to PDF. A draft pass skips output.
    fn compile(&self, tex_name: &str, out_dir: &Path, draft: bool) -> Result<()>;
}

/// [`Toolchain`] that runs the configured programs.
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    config: ToolConfig,
    verbose: u8,
}

impl SystemToolchain {
    pub fn new(config: ToolConfig, verbose: u8) -> Self {
        Self { config, verbose }
    }

    pub fn from_options(options: &BuildOptions) -> Self {
        Self::new(options.tools.clone(), options.verbose)
    }

    fn converter_command(&self) -> Command {
        let mut command = Command::new(&self.config.java);
        command.arg("-jar").arg(&self.config.converter_jar);
        command
    }

    /// Verify every program a build needs is installed.
    ///
    /// `lilypond` is only required when `midi` is set.
    pub fn check_environment(&self, midi: bool) -> Result<()> {
        let timeout = self.config.timeout;

        process::ensure_runs(
            "lilypond-book",
            Command::new(&self.config.lilypond_book).arg("--version"),
            timeout,
        )?;
        if midi {
            process::ensure_runs(
                "lilypond",
                Command::new(&self.config.lilypond).arg("--version"),
                timeout,
            )?;
        }
        process::ensure_runs(
            "pdflatex",
            Command::new(&self.config.pdflatex).arg("--version"),
            timeout,
        )?;
        process::ensure_runs(
            "tablature converter",
            self.converter_command().arg("--version"),
            timeout,
        )?;

        Ok(())
    }
}

impl Toolchain for SystemToolchain {
    fn convert_tablature(&self, tab_file: &Path, out_dir: &Path) -> Result<String> {
        let mut command = self.converter_command();
        command.arg("--in").arg(tab_file).arg("--out").arg(out_dir);

        let out = process::run(
            "tablature converter",
            &mut command,
            Stdout::Capture,
            self.config.timeout,
        )?;
        parse_identifier(&out)
    }

    fn render_audio(&self, source: &Path, output_stem: &Path) -> Result<()> {
        let mut command = Command::new(&self.config.lilypond);
        if self.verbose < 2 {
            command.arg("--loglevel=NONE");
        }
        command.arg("-o").arg(output_stem).arg(source);

        process::run("lilypond", &mut command, Stdout::Discard, self.config.timeout)?;
        Ok(())
    }

    fn typeset(&self, document: &Path, out_dir: &Path) -> Result<()> {
        let mut command = Command::new(&self.config.lilypond_book);
        command.arg("--pdf");
        if self.verbose == 0 {
            command.args(["--loglevel=WARN", "--lily-loglevel=WARN"]);
        }
        command.arg("--format=latex");
        command.arg(prefixed("--out=", out_dir));
        command.arg(document);

        let stdout = if self.verbose > 0 {
            Stdout::Inherit
        } else {
            Stdout::Discard
        };
        process::run("lilypond-book", &mut command, stdout, self.config.timeout)?;
        Ok(())
    }

    fn compile(&self, tex_name: &str, out_dir: &Path, draft: bool) -> Result<()> {
        let mut command = Command::new(&self.config.pdflatex);
        if draft {
            command.arg("-draftmode");
        }
        command.arg("-interaction=nonstopmode");
        command.arg(prefixed("-output-directory=", out_dir));
        command.arg(tex_name);
        command.env("TEXINPUTS", tex_inputs(out_dir));

        let stdout = if self.verbose >= 2 {
            Stdout::Inherit
        } else {
            Stdout::Discard
        };
        process::run("pdflatex", &mut command, stdout, self.config.timeout)?;
        Ok(())
    }
}

/// Extract the notation identifier from converter output.
fn parse_identifier(stdout: &str) -> Result<String> {
    let id: String = stdout.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::ToolExecution {
            tool: "tablature converter".to_string(),
            reason: "no notation identifier on standard output".to_string(),
        });
    }
    Ok(id.to_string())
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

/// `TEXINPUTS` with the output directory searched first.
fn tex_inputs(out_dir: &Path) -> OsString {
    let mut value = out_dir.as_os_str().to_os_string();
    value.push(":");
    if let Some(existing) = std::env::var_os("TEXINPUTS") {
        value.push(existing);
    }
    value
}
