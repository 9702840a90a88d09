//! hdt-ingest CLI entrypoint
//!
//! Canonicalizes every input file and prints one JSON summary per document
//! on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hdt::{process_paths, DocumentSummary, HdtConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "hdt-ingest", version, about = "Canonicalize documents with byte-exact provenance")]
struct Cli {
    /// Files or directories to ingest
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Encoding label (overrides `ingest.default_encoding`)
    #[arg(long)]
    encoding: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Include the full canonical document and its edit ops
    #[arg(long)]
    ops: bool,

    /// Log output format (overrides `logging.format`)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when at least one document failed.
fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => HdtConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HdtConfig::default(),
    };
    if let Some(encoding) = cli.encoding {
        cfg.ingest.default_encoding = encoding;
    }
    if let Some(format) = cli.log_format {
        cfg.logging.format = format;
    }
    cfg.validate().context("invalid configuration")?;

    init_tracing(&cfg);

    let results = process_paths(&cli.paths, &cfg).context("collecting inputs")?;
    let mut all_ok = true;
    for result in results {
        match result {
            Ok(doc) => {
                let summary = DocumentSummary::from_document(&doc, cli.ops);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Err(err) => {
                all_ok = false;
                error!(error = %err, "document_failed");
            }
        }
    }
    Ok(all_ok)
}

fn init_tracing(cfg: &HdtConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));
    let registry = tracing_subscriber::registry().with(filter);
    match cfg.logging.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
