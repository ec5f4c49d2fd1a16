//! hdoc - HTML shorthand processor

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hdoc::{Error, ExpandOptions, StyleDocument, Syntax, dom, expand};

#[derive(Parser)]
#[command(name = "hdoc")]
#[command(version, about = "A simple HTML shorthand processor", long_about = None)]
#[command(after_help = "EXAMPLES:
    hdoc notes.html                  Expand to standard output
    hdoc notes.html -o notes.out.html
    hdoc --html legacy.html          Parse with the lenient HTML5 parser")]
struct Cli {
    /// Source document
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Output file (default: standard output)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Style document (default: data/styles/default.html)
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,

    /// Parse the source as HTML5 instead of XML
    #[arg(long)]
    html: bool,

    /// Attribute that names a marker's term
    #[arg(long, value_name = "NAME", default_value = "w")]
    term_attr: String,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let style = StyleDocument::resolve(cli.style.as_deref())?;
    if let Some(style) = &style {
        debug!(path = %style.path().display(), root = ?style.root_tag(), "style document ready");
    }

    let bytes = fs::read(&cli.source).map_err(|source| Error::Read {
        path: cli.source.clone(),
        source,
    })?;
    let text = dom::decode_source(&bytes);
    let syntax = if cli.html { Syntax::Html } else { Syntax::Xml };
    let mut document = hdoc::parse(&text, syntax)?;

    let options = ExpandOptions {
        term_attribute: cli.term_attr.clone(),
        ..ExpandOptions::default()
    };
    let report = expand(&mut document, &options)?;
    info!(
        source = %cli.source.display(),
        definitions = report.definitions,
        references = report.references,
        "expanded shorthand"
    );

    // The output is only opened once expansion has succeeded, so a failed
    // run leaves no file behind.
    match &cli.output {
        Some(path) => write_file(path, &document, syntax),
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            dom::serialize(&document, syntax, &mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}

fn write_file(path: &Path, document: &dom::ArenaDom, syntax: Syntax) -> Result<(), Error> {
    let wrap = |source: io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = fs::File::create(path).map_err(wrap)?;
    let mut out = io::BufWriter::new(file);
    dom::serialize(document, syntax, &mut out).map_err(wrap)?;
    out.flush().map_err(wrap)?;
    Ok(())
}
