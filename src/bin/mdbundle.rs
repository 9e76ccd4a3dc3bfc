//! CLI binary for mdbundle.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `BundleConfig` and prints results. Invoked with no arguments it reads
//! `document.md` from the working directory and writes `document.html`
//! next to it, overwriting any existing file.

use anyhow::{Context, Result};
use clap::Parser;
use mdbundle::{bundle_to_file, BundleConfig, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_TITLE};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Bundle document.md → document.html in the current directory
  mdbundle

  # Bundle a specific file
  mdbundle notes.md -o notes.html

  # Set the document title
  mdbundle report.md -o report.html --title "Q3 Report"

  # Print run statistics as JSON
  mdbundle --json notes.md -o notes.html

IMAGE INLINING:
  Every ![alt](path) whose path resolves to a readable local file is
  replaced by a base64 data URI, making the output self-contained. A
  reference that cannot be resolved is left unchanged and reported on
  stderr; the bundle is still written.

VIEWING:
  The output renders its Markdown in the browser at load time using
  marked.js, fetched from jsdelivr. Opening the file requires network
  access for that one script; all document content is embedded.

ENVIRONMENT VARIABLES:
  MDBUNDLE_OUTPUT   Default for -o/--output
  MDBUNDLE_TITLE    Default for --title
  RUST_LOG          Override the log filter (tracing-subscriber EnvFilter)
"#;

/// Bundle a Markdown document into a single self-contained HTML file.
#[derive(Parser, Debug)]
#[command(
    name = "mdbundle",
    version,
    about = "Bundle a Markdown document into a single self-contained HTML file",
    long_about = "Inline local images as base64 data URIs and wrap the Markdown in an \
HTML shell that renders it client-side, producing one file with no local dependencies.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Source Markdown file.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write the HTML bundle to this file (overwritten if present).
    #[arg(short, long, env = "MDBUNDLE_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Document title placed in the HTML head.
    #[arg(long, env = "MDBUNDLE_TITLE", default_value = DEFAULT_TITLE)]
    title: String,

    /// Print run statistics and per-image outcomes as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Per-image failures surface as WARN lines, so the default filter must
    // let them through.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = BundleConfig::builder()
        .input(cli.input.clone())
        .output(cli.output.clone())
        .title(cli.title.clone())
        .build()
        .context("Invalid configuration")?;

    // ── Run the pipeline ─────────────────────────────────────────────────
    let output = bundle_to_file(&config)
        .with_context(|| format!("Failed to bundle '{}'", cli.input.display()))?;

    if cli.json {
        let report = serde_json::json!({
            "output": config.output,
            "stats": output.stats,
            "substitutions": output.substitutions,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if !cli.quiet {
        let stats = &output.stats;
        let tick = if stats.failed_images == 0 {
            green("✔")
        } else {
            yellow("⚠")
        };
        eprintln!(
            "{} Successfully created {}",
            tick,
            bold(&config.output.display().to_string())
        );
        eprintln!(
            "   {}  {}",
            dim(&format!(
                "{}/{} images inlined",
                stats.inlined_images, stats.image_refs
            )),
            dim(&format!("{} bytes", stats.html_bytes)),
        );
    }

    Ok(())
}
