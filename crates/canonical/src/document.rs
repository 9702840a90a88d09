//! Document types produced by [`canonicalize`](crate::canonicalize).
//!
//! ```text
//! RawDocument                     CanonicalDocument
//! ├── doc_id ─────────────────────┼── doc_id
//! ├── media_type                  ├── canonical_text
//! ├── encoding                    ├── lang_blocks (one "und" block)
//! ├── bytes_len                   └── alignment: Alignment
//! └── source_uri (adapters only)
//! ```
//!
//! Both are plain values owned by the caller. Neither is mutated after
//! canonicalization; the alignment index is derived from
//! [`CanonicalDocument::alignment`] on demand and never persisted.

use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;

/// Identity and size metadata for the original input bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Content-derived identifier, `doc-` followed by 10 hex chars.
    pub doc_id: String,
    pub media_type: String,
    pub encoding: String,
    /// Length of the raw input in bytes.
    pub bytes_len: usize,
    /// Where the bytes came from, when read from a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

/// Language/script tag over a canonical character range.
///
/// Language detection is not performed; canonicalization always emits a single
/// block covering the whole text with `bcp47 = "und"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangBlock {
    pub start: usize,
    pub end: usize,
    pub bcp47: String,
    pub confidence: f32,
}

impl LangBlock {
    pub fn undetermined(canon_len: usize) -> Self {
        Self {
            start: 0,
            end: canon_len,
            bcp47: "und".to_string(),
            confidence: 0.0,
        }
    }
}

/// Canonical text plus the alignment that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDocument {
    pub doc_id: String,
    pub canonical_text: String,
    #[serde(default)]
    pub lang_blocks: Vec<LangBlock>,
    pub alignment: Alignment,
}

impl CanonicalDocument {
    /// Canonical length in characters.
    pub fn canon_len(&self) -> usize {
        self.alignment.canon_len
    }

    /// Slices the canonical text by character boundaries, clamped to the text.
    pub fn slice_chars(&self, start: usize, end: usize) -> &str {
        let text = self.canonical_text.as_str();
        let end = end.max(start);
        let byte_at = |char_idx: usize| {
            text.char_indices()
                .nth(char_idx)
                .map(|(b, _)| b)
                .unwrap_or(text.len())
        };
        &text[byte_at(start)..byte_at(end)]
    }
}
