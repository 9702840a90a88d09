//! Format adapters.
//!
//! Plain text, Markdown and SRT subtitles are all canonicalized the same way
//! (CRLF, NBSP, BOM and combining marks are handled by the canonical layer);
//! the adapters only differ in the `media_type` they record.

use std::path::Path;

use canonical::{canonicalize, compute_byte_starts};

use crate::error::IngestError;
use crate::types::{IngestedDocument, MediaType};

/// Canonicalizes `raw_bytes` and precomputes byte starts for the index.
pub fn parse_bytes(
    raw_bytes: &[u8],
    encoding: &str,
    media_type: MediaType,
) -> Result<IngestedDocument, IngestError> {
    let (raw, canonical, original_text) =
        canonicalize(raw_bytes, encoding, media_type.as_str())?;
    let byte_starts = compute_byte_starts(&original_text, &raw.encoding)?;
    Ok(IngestedDocument {
        raw,
        canonical,
        original_text,
        byte_starts,
    })
}

pub fn parse_txt(raw_bytes: &[u8], encoding: &str) -> Result<IngestedDocument, IngestError> {
    parse_bytes(raw_bytes, encoding, MediaType::PlainText)
}

pub fn parse_md(raw_bytes: &[u8], encoding: &str) -> Result<IngestedDocument, IngestError> {
    parse_bytes(raw_bytes, encoding, MediaType::Markdown)
}

pub fn parse_srt(raw_bytes: &[u8], encoding: &str) -> Result<IngestedDocument, IngestError> {
    parse_bytes(raw_bytes, encoding, MediaType::Srt)
}

/// Dispatches on the extension of `path`; no path means plain text.
pub fn parse_auto(
    raw_bytes: &[u8],
    encoding: &str,
    path: Option<&Path>,
) -> Result<IngestedDocument, IngestError> {
    let media_type = path.map(MediaType::from_path).unwrap_or_default();
    parse_bytes(raw_bytes, encoding, media_type)
}
