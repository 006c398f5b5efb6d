//! Command-line interface for boolq
//! Translates boolean search queries into English, or dumps the intermediate
//! tokens and tree for inspection.
//!
//! Usage:
//!   boolq `<query>`...                     - Translate each query argument
//!   boolq < queries.txt                  - Translate one query per input line
//!   boolq --format ast-treeviz `<query>`   - Show how a query was grouped
//!   boolq --fields labels.yaml `<query>`   - Read field:value terms with custom labels
//!   boolq --list-formats                 - List all available formats
use boolq::query::fields::{FieldSource, FieldsError};
use boolq::query::processor::{available_formats, process_query, ProcessingError, ProcessingSpec};
use boolq::Translator;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boolq", version)]
#[command(about = "Render boolean search queries as plain English")]
struct Args {
    /// Queries to translate. Without any, one query is read per line of stdin.
    queries: Vec<String>,

    /// Output format (see --list-formats)
    #[arg(short, long, default_value = "english")]
    format: String,

    /// Field label table (YAML or JSON). Enables field:value terms.
    #[arg(long, env = "BOOLQ_FIELDS")]
    fields: Option<PathBuf>,

    /// Use the built-in coin catalogue field labels
    #[arg(long)]
    builtin_fields: bool,

    /// Read field:value terms, showing field names as typed
    #[arg(long)]
    field_terms: bool,

    /// List available output formats and exit
    #[arg(long)]
    list_formats: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Fields(#[from] FieldsError),
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list_formats {
        for format in available_formats() {
            writeln!(out, "{}", format)?;
        }
        return Ok(());
    }

    let spec = ProcessingSpec::from_string(&args.format)?;
    let source = FieldSource::from_flags(args.fields, args.builtin_fields, args.field_terms);
    let translator = Translator::from_field_source(&source)?;
    tracing::debug!(?source, format = %spec.name(), "configured translator");

    if args.queries.is_empty() {
        for line in io::stdin().lock().lines() {
            emit(&mut out, &process_query(&line?, &spec, &translator)?)?;
        }
    } else {
        for query in &args.queries {
            emit(&mut out, &process_query(query, &spec, &translator)?)?;
        }
    }

    Ok(())
}

fn emit(out: &mut impl Write, output: &str) -> io::Result<()> {
    if output.ends_with('\n') {
        write!(out, "{}", output)
    } else {
        writeln!(out, "{}", output)
    }
}
