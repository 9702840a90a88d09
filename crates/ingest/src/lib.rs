//! HDT Ingest Layer
//!
//! This is where documents enter the pipeline. We read raw bytes at the
//! caller boundary, hand them to the canonical layer under a declared
//! encoding, and return an [`IngestedDocument`] that carries everything a later
//! stage needs to cite canonical spans back to exact source bytes.
//!
//! ## What we do here
//!
//! - **Pick a format adapter** - `.md`/`.markdown`, `.srt`, everything else is
//!   plain text. All adapters share one canonicalization.
//! - **Enforce size limits** - Oversized files are rejected before reading.
//! - **Precompute byte starts** - So the alignment index can answer byte-range
//!   queries without touching the text again.
//! - **Batch in parallel** - Documents are independent; [`ingest_batch`] fans
//!   out over rayon and keeps results in input order.
//! - **Log everything** - Structured logs via tracing, one span per file.
//!
//! ## Example
//!
//! ```
//! use ingest::parse_txt;
//!
//! let doc = parse_txt("a\r\nb\rc\u{a0}d".as_bytes(), "utf-8").unwrap();
//! assert_eq!(doc.canonical.canonical_text, "a\nb\nc d");
//!
//! let index = doc.index();
//! let span = doc.source_span(&index, 1, 2);
//! assert_eq!(span.bytes, (1, 3));
//! assert_eq!(span.original_text, "\r\n");
//! ```
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn, Level};

mod config;
mod error;
mod parsers;
mod types;

pub use crate::config::{ConfigError, IngestConfig};
pub use crate::error::IngestError;
pub use crate::parsers::{parse_auto, parse_bytes, parse_md, parse_srt, parse_txt};
pub use crate::types::{IngestedDocument, MediaType, SourceSpan};

/// Reads one file and canonicalizes it with the configured encoding.
pub fn ingest_file(path: &Path, cfg: &IngestConfig) -> Result<IngestedDocument, IngestError> {
    let start = Instant::now();
    let media_type = MediaType::from_path(path);

    let span = tracing::span!(
        Level::INFO,
        "ingest.file",
        path = %path.display(),
        media_type = %media_type
    );
    let _guard = span.enter();

    match ingest_file_inner(path, cfg) {
        Ok(doc) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                doc_id = %doc.raw.doc_id,
                encoding = %doc.raw.encoding,
                bytes_len = doc.raw.bytes_len,
                orig_len = doc.canonical.alignment.orig_len,
                canon_len = doc.canonical.alignment.canon_len,
                ops = doc.canonical.alignment.ops.len(),
                elapsed_micros,
                "ingest_success"
            );
            Ok(doc)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(error = %err, elapsed_micros, "ingest_failure");
            Err(err)
        }
    }
}

fn ingest_file_inner(path: &Path, cfg: &IngestConfig) -> Result<IngestedDocument, IngestError> {
    cfg.validate()?;

    let io_error = |err: std::io::Error| IngestError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    };

    // Reject oversized files before reading them into memory.
    if let Some(limit) = cfg.max_payload_bytes {
        let size = fs::metadata(path).map_err(io_error)?.len();
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        if size > limit {
            return Err(IngestError::PayloadTooLarge { size, limit });
        }
    }

    let bytes = fs::read(path).map_err(io_error)?;
    let mut doc = parse_auto(&bytes, &cfg.default_encoding, Some(path))?;
    doc.raw.source_uri = Some(path.display().to_string());
    Ok(doc)
}

/// Ingests every path in parallel. Results line up with `paths`; a failing
/// document does not affect the others.
pub fn ingest_batch<P>(paths: &[P], cfg: &IngestConfig) -> Vec<Result<IngestedDocument, IngestError>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| ingest_file(path.as_ref(), cfg))
        .collect()
}

/// Expands directories (one level, sorted) into the files they contain.
/// Plain file paths pass through unchanged.
pub fn collect_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            let io_error = |err: std::io::Error| IngestError::Io {
                path: input.display().to_string(),
                message: err.to_string(),
            };
            let mut found = Vec::new();
            for entry in fs::read_dir(input).map_err(io_error)? {
                let path = entry.map_err(io_error)?.path();
                if path.is_file() {
                    found.push(path);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(input.to_path_buf());
        }
    }
    Ok(files)
}
