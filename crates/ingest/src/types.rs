//! Data model for ingested documents.
//!
//! ```text
//! bytes ──parse_*──▶ IngestedDocument
//!                    ├── raw: RawDocument             (identity, size, source)
//!                    ├── canonical: CanonicalDocument (text + alignment)
//!                    ├── original_text: String        (decoded, pre-canonical)
//!                    └── byte_starts: Vec<usize>      (orig_len + 1 prefix sums)
//!
//!                    .index()          ──▶ AlignmentIndex (built on demand)
//!                    .source_span(c0, c1) ─▶ SourceSpan (bytes + original text)
//! ```

use std::fmt;
use std::path::Path;

use canonical::{AlignmentIndex, CanonicalDocument, RawDocument};
use serde::{Deserialize, Serialize};

/// Media types the format adapters understand. All of them share the same
/// canonicalization; only the recorded `media_type` differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MediaType {
    #[default]
    #[serde(rename = "text/plain")]
    PlainText,
    #[serde(rename = "text/markdown")]
    Markdown,
    #[serde(rename = "text/srt")]
    Srt,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::PlainText => "text/plain",
            MediaType::Markdown => "text/markdown",
            MediaType::Srt => "text/srt",
        }
    }

    /// Picks the media type from a file extension (case-insensitive).
    /// Unknown or missing extensions are plain text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("md") | Some("markdown") => MediaType::Markdown,
            Some("srt") => MediaType::Srt,
            _ => MediaType::PlainText,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical span traced back to the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Requested canonical character span (after clamping).
    pub canon: (usize, usize),
    /// Original decoded character span.
    pub orig: (usize, usize),
    /// Original byte range under the declared encoding.
    pub bytes: (usize, usize),
    /// The original decoded text over `orig`, for audit display.
    pub original_text: String,
}

/// Everything a later stage needs to cite canonical spans against the source.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedDocument {
    pub raw: RawDocument,
    pub canonical: CanonicalDocument,
    pub original_text: String,
    pub byte_starts: Vec<usize>,
}

impl IngestedDocument {
    pub fn doc_id(&self) -> &str {
        &self.raw.doc_id
    }

    pub fn canon_len(&self) -> usize {
        self.canonical.alignment.canon_len
    }

    /// Builds the alignment index. The index owns a copy of the byte starts;
    /// build it once per document and reuse it for many queries.
    pub fn index(&self) -> AlignmentIndex {
        AlignmentIndex::new(&self.canonical.alignment, self.byte_starts.clone())
    }

    /// Traces the canonical span `[c0, c1)` back to the original input.
    pub fn source_span(&self, index: &AlignmentIndex, c0: usize, c1: usize) -> SourceSpan {
        let end = c1.min(index.canon_len());
        let canon = (c0.min(end), end);
        let orig = index.inverse_span(canon);
        let bytes = index.inverse_bytes(canon);
        let original_text = self
            .original_text
            .chars()
            .skip(orig.0)
            .take(orig.1.saturating_sub(orig.0))
            .collect();
        SourceSpan {
            canon,
            orig,
            bytes,
            original_text,
        }
    }
}
