//! songbook - build songbooks with LilyPond and LaTeX

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use songbook::{BookBuilder, BuildOptions, SystemToolchain, ToolConfig};

#[derive(Parser)]
#[command(name = "songbook")]
#[command(version, long_about = None)]
#[command(about = "Create modular and beautiful songbooks using LilyPond and LaTeX")]
#[command(after_help = "EXAMPLES:
    songbook --in book.txt --out build        Build build/<title>.pdf
    songbook --in book.txt --out build -d     Draft pass only
    songbook --in book.txt --out build -m -v  Attach MIDI files, verbose")]
struct Cli {
    /// Path to the book description
    #[arg(long = "in", value_name = "BOOK")]
    in_path: PathBuf,

    /// Output directory (created if necessary)
    #[arg(long = "out", value_name = "DIR")]
    out_dir: PathBuf,

    /// Verbose build output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only run the draft compiler pass
    #[arg(short, long)]
    draft: bool,

    /// Render and attach a MIDI file for every song
    #[arg(short, long)]
    midi: bool,

    /// Custom LaTeX style package to install instead of the built-in one
    #[arg(long, value_name = "STY")]
    style: Option<PathBuf>,

    /// Java runtime
    #[arg(long, env = "SONGBOOK_JAVA", default_value = "java")]
    java: PathBuf,

    /// Tablature converter jar
    #[arg(long, env = "SONGBOOK_CONVERTER_JAR", default_value = "bin/tg2ly.jar")]
    converter_jar: PathBuf,

    /// lilypond-book executable
    #[arg(long, env = "SONGBOOK_LILYPOND_BOOK", default_value = "lilypond-book")]
    lilypond_book: PathBuf,

    /// lilypond executable
    #[arg(long, env = "SONGBOOK_LILYPOND", default_value = "lilypond")]
    lilypond: PathBuf,

    /// pdflatex executable
    #[arg(long, env = "SONGBOOK_PDFLATEX", default_value = "pdflatex")]
    pdflatex: PathBuf,

    /// Kill any external tool running longer than this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

impl Cli {
    fn into_options(self) -> BuildOptions {
        let tools = ToolConfig {
            java: self.java,
            converter_jar: self.converter_jar,
            lilypond_book: self.lilypond_book,
            lilypond: self.lilypond,
            pdflatex: self.pdflatex,
            timeout: self.timeout.map(Duration::from_secs),
        };

        let mut options = BuildOptions::new(self.in_path, self.out_dir)
            .with_verbose(self.verbose)
            .with_draft(self.draft)
            .with_midi(self.midi)
            .with_tools(tools);
        if let Some(style) = self.style {
            options = options.with_style_file(style);
        }
        options
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.into_options();
    match build(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build(options: &BuildOptions) -> songbook::Result<()> {
    let started = Instant::now();

    let toolchain = SystemToolchain::from_options(options);
    toolchain.check_environment(options.midi)?;

    let output = BookBuilder::new(options, &toolchain).build()?;

    if !output.book.errors.is_empty() {
        tracing::warn!("{} line(s) skipped", output.book.errors.len());
    }
    if !options.draft {
        tracing::info!("Wrote {}", output.pdf.display());
    }
    tracing::info!(
        "Finished in {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
