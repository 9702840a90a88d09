//! Workspace umbrella crate for HDT document canonicalization.
//!
//! This crate stitches together the ingest adapters and the canonical layer so
//! callers can go from a file on disk to canonical text plus a byte-exact
//! alignment with a single API entry point, and loads the YAML configuration
//! shared by the `hdt-ingest` binary.

pub mod config;

pub use canonical::{
    canonicalize, canonicalize_text, compute_byte_starts, decode_strict, doc_id_from_bytes,
    hash_bytes, resolve_encoding, Alignment, AlignmentIndex, CanonicalDocument, CanonicalError,
    EditKind, EditOp, LangBlock, RawDocument, ALIGNMENT_VERSION,
};
pub use config::{ConfigLoadError, HdtConfig, LogFormat, LoggingConfig};
pub use ingest::{
    collect_inputs, ingest_batch, ingest_file, parse_auto, parse_bytes, parse_md, parse_srt,
    parse_txt, ConfigError, IngestConfig, IngestError, IngestedDocument, MediaType, SourceSpan,
};

use serde::Serialize;

/// Number of canonical characters shown in [`DocumentSummary::preview`].
pub const PREVIEW_CHARS: usize = 80;

/// Per-document report printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub doc_id: String,
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
    pub orig_bytes_len: usize,
    pub canon_len: usize,
    /// Byte range the whole canonical text maps back to. Always
    /// `[0, orig_bytes_len]`.
    pub inverse_full_span_bytes: [usize; 2],
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<CanonicalDocument>,
}

impl DocumentSummary {
    /// Builds the summary; `with_ops` attaches the full canonical document.
    pub fn from_document(doc: &IngestedDocument, with_ops: bool) -> Self {
        let index = doc.index();
        let canon_len = doc.canon_len();
        let (start, end) = index.inverse_bytes((0, canon_len));
        Self {
            doc_id: doc.doc_id().to_string(),
            media_type: doc.raw.media_type.clone(),
            source_uri: doc.raw.source_uri.clone(),
            orig_bytes_len: doc.raw.bytes_len,
            canon_len,
            inverse_full_span_bytes: [start, end],
            preview: doc.canonical.slice_chars(0, PREVIEW_CHARS).to_string(),
            canonical: with_ops.then(|| doc.canonical.clone()),
        }
    }
}

/// Ingests every path under `cfg.ingest`, expanding directories one level.
/// Results are in input order.
pub fn process_paths<P: AsRef<std::path::Path>>(
    paths: &[P],
    cfg: &HdtConfig,
) -> Result<Vec<Result<IngestedDocument, IngestError>>, IngestError> {
    let files = collect_inputs(paths)?;
    Ok(ingest_batch(&files, &cfg.ingest))
}
