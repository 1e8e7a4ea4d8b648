//! Lazyview - A terminal live preview for lazy-JSON documents.
//!
//! # Usage
//!
//! ```bash
//! lazyview config.ljson
//! lazyview --view --watch config.ljson
//! lazyview --check config.ljson
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use lazyview::app::{App, Mode};
use lazyview::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use lazyview::document::{DocumentParser, InputFormat, ParseOptions, emit_json};
use lazyview::render::{render, to_plain_text};
use lazyview::session::DEFAULT_DEBOUNCE_MS;

/// A terminal live preview for lazy-JSON documents
#[derive(Parser, Debug)]
#[command(name = "lazyview", version, about, long_about = None)]
struct Cli {
    /// Document to edit or view (stdin for --print, --check and --emit-json)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Show only the rendered output, full screen
    #[arg(long)]
    view: bool,

    /// Watch FILE for changes and re-render
    #[arg(short, long)]
    watch: bool,

    /// Quiet period after an edit before re-rendering
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Accept a trailing comma before `]` or `}`
    #[arg(long)]
    allow_trailing_commas: bool,

    /// Input is a tagged node tree instead of lazy-JSON
    #[arg(long)]
    tagged_tree: bool,

    /// Print the rendered document as plain text and exit
    #[arg(long, group = "batch")]
    print: bool,

    /// Parse the document, report the result and exit
    #[arg(long, group = "batch")]
    check: bool,

    /// Print the parsed document as JSON and exit
    #[arg(long, group = "batch")]
    emit_json: bool,

    /// Write log events to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    const fn batch(&self) -> bool {
        self.print || self.check || self.emit_json
    }
}

fn init_logging(log_file: Option<&Path>, batch: bool) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        // The TUI owns stdout and stderr.
        None if batch => BoxMakeWriter::new(std::io::stderr),
        None => BoxMakeWriter::new(std::io::sink),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(())
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
    }
}

fn run_batch(cli: &Cli, format: InputFormat) -> Result<ExitCode> {
    let text = read_source(cli.file.as_deref())?;
    let node = match format.parse(&text) {
        Ok(node) => node,
        Err(err) => {
            let message = err.describe(&text);
            tracing::debug!(%message, "parse failed");
            if cli.check {
                println!("{message}");
            } else {
                eprintln!("error: {message}");
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.check {
        println!("successfully parsed");
    } else if cli.emit_json {
        println!("{}", emit_json(&node));
    } else {
        print!("{}", to_plain_text([&render(&node)]));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref(), cli.batch())?;
    tracing::debug!(?effective, "effective flags");

    let options = ParseOptions {
        allow_trailing_commas: effective.allow_trailing_commas,
        ..ParseOptions::default()
    };
    let format = InputFormat::new(cli.tagged_tree, options);

    if cli.batch() {
        return run_batch(&cli, format);
    }

    let mode = if effective.view { Mode::View } else { Mode::Edit };
    let text = match cli.file.as_deref() {
        Some(path) if path.exists() => read_source(Some(path))?,
        Some(path) if mode == Mode::View => {
            anyhow::bail!("File not found: {}", path.display())
        }
        // Edit mode creates the file on first save.
        Some(_) => String::new(),
        None if mode == Mode::View => anyhow::bail!("--view needs a FILE to display"),
        None => String::new(),
    };

    let mut app = App::new(cli.file, &text)
        .with_format(format)
        .with_debounce_ms(effective.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
        .with_mode(mode)
        .with_watch(effective.watch)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")?;
    Ok(ExitCode::SUCCESS)
}
