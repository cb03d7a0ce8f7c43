//! wordmaze - Reconstruct reading order from positioned words
//!
//! Reads JSON word boxes (a bare list of words, a single page, or a
//! multi-page maze) and writes the reconstructed text or layout tree.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wordmaze_core::converter::{JsonConverter, TextConverter};
use wordmaze_core::error::Result;
use wordmaze_core::layout::{ColumnHint, LayoutParams, Word};
use wordmaze_core::page::{Page, WordMaze};

/// Output type for the reconstructed content.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON layout tree
    Json,
}

/// Reconstruct lines, blocks and reading order from word boxes.
#[derive(Parser, Debug)]
#[command(name = "wordmaze")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more paths to JSON input files, or "-" for stdin
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// JSON file with layout parameters; flags below override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    // === Layout options ===
    /// Max baseline difference for words on one line (page units)
    #[arg(long = "line-tolerance")]
    line_tolerance: Option<f64>,

    /// Max horizontal gap between adjacent words of a line (page units)
    #[arg(long = "word-gap")]
    word_gap: Option<f64>,

    /// Max vertical gap between consecutive lines of a block (page units)
    #[arg(long = "block-gap")]
    block_gap: Option<f64>,

    /// Minimum horizontal overlap fraction for lines of one block
    #[arg(long = "column-overlap")]
    column_overlap: Option<f64>,

    /// Fixed number of columns (1 reads strictly top to bottom)
    #[arg(long)]
    columns: Option<usize>,

    /// Max left-edge difference for lines of one block (page units)
    #[arg(long = "left-edge")]
    left_edge: Option<f64>,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,

    /// Write a "Page N" header before each page of text output
    #[arg(long = "show-pageno", action = ArgAction::SetTrue)]
    show_pageno: bool,

    /// Pretty-print JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_params(args: &Args) -> Result<LayoutParams> {
    let mut params = match &args.config {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => LayoutParams::default(),
    };
    if let Some(v) = args.line_tolerance {
        params = params.with_line_height_tolerance(v);
    }
    if let Some(v) = args.word_gap {
        params = params.with_word_gap_tolerance(v);
    }
    if let Some(v) = args.block_gap {
        params = params.with_block_gap_threshold(v);
    }
    if let Some(v) = args.column_overlap {
        params = params.with_column_overlap_fraction(v);
    }
    if let Some(n) = args.columns {
        params = params.with_column_count_hint(ColumnHint::Fixed(n));
    }
    if let Some(v) = args.left_edge {
        params = params.with_left_edge_tolerance(v);
    }
    params.validate()?;
    Ok(params)
}

/// Parses any accepted input shape into a maze: an array of words, an
/// object with `pages`, or a single page object. A bare word list becomes a
/// single page sized to fit its words.
///
/// The shape is chosen before deserializing so word validation errors
/// reach the caller unchanged.
fn parse_input(data: &[u8]) -> Result<WordMaze> {
    let value: Value = serde_json::from_slice(data)?;
    let is_maze = value.get("pages").is_some();
    let maze = match value {
        Value::Array(_) => {
            let words: Vec<Word> = serde_json::from_value(value)?;
            WordMaze::new(vec![Page::fit(words)])
        }
        Value::Object(_) if is_maze => serde_json::from_value(value)?,
        _ => WordMaze::new(vec![serde_json::from_value::<Page>(value)?]),
    };
    Ok(maze)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        io::Read::read_to_end(&mut io::stdin(), &mut data)?;
        Ok(data)
    } else {
        Ok(std::fs::read(path)?)
    }
}

/// Process a single input file.
fn process_file<W: Write>(
    path: &Path,
    writer: &mut W,
    args: &Args,
    params: &LayoutParams,
) -> Result<()> {
    let maze = parse_input(&read_input(path)?)?;
    debug!(path = %path.display(), pages = maze.len(), "loaded input");
    let docs = maze.reconstruct(params)?;

    match args.output_type {
        OutputType::Text => {
            let mut converter = TextConverter::new(writer, args.show_pageno);
            for doc in &docs {
                converter.receive_layout(doc)?;
            }
        }
        OutputType::Json => {
            JsonConverter::new(writer, args.pretty).write_pages(&docs)?;
        }
    }
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = match build_params(&args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        if path.as_os_str() != "-" && !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }

        if let Err(e) = process_file(path, &mut output, &args, &params) {
            eprintln!("Error processing {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    output.flush()?;

    Ok(())
}
