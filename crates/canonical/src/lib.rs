//! HDT canonical text layer.
//!
//! Turns raw document bytes into canonical text that downstream stages
//! (segmentation, span extraction, provenance stamping) index by character
//! offset, and keeps an exact record of how every canonical character relates
//! to the original bytes so any canonical span can be cited back to its source
//! byte range.
//!
//! ## What we do
//!
//! - Strict decoding under a caller-declared encoding (no auto-detection)
//! - Leading BOM removal, CRLF/CR → LF, NBSP → space
//! - NFC composition of base + combining-mark clusters
//! - An [`Alignment`] of keep/delete/insert/replace ops tiling both texts
//! - An [`AlignmentIndex`] answering boundary and byte-range queries in O(1)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. Same bytes + same encoding label give the
//! same canonical text and the same ops on any machine. Documents share no
//! state, so callers may canonicalize them in parallel freely.
//!
//! ## Errors
//!
//! Only decoding ([`CanonicalError::Decode`]) and byte-offset re-encoding
//! ([`CanonicalError::Encode`]) can fail. Once decoding succeeds the
//! transform and the index are total: out-of-range queries saturate.
//!
//! ```rust
//! use canonical::{canonicalize, compute_byte_starts, AlignmentIndex};
//!
//! let raw_bytes = "Cafe\u{301}\r\nbar".as_bytes();
//! let (raw, doc, original) = canonicalize(raw_bytes, "utf-8", "text/plain").unwrap();
//! assert_eq!(doc.canonical_text, "Caf\u{e9}\nbar");
//!
//! let starts = compute_byte_starts(&original, &raw.encoding).unwrap();
//! let index = AlignmentIndex::new(&doc.alignment, starts);
//! let canon_len = doc.canonical_text.chars().count();
//! assert_eq!(index.inverse_bytes((0, canon_len)), (0, raw.bytes_len));
//! ```

mod alignment;
mod document;
mod encoding;
mod error;
mod hash;
mod index;
mod pipeline;

pub use crate::alignment::{Alignment, EditKind, EditOp, ALIGNMENT_VERSION};
pub use crate::document::{CanonicalDocument, LangBlock, RawDocument};
pub use crate::encoding::{compute_byte_starts, decode_strict, resolve_encoding};
pub use crate::error::CanonicalError;
pub use crate::hash::{doc_id_from_bytes, hash_bytes};
pub use crate::index::AlignmentIndex;
pub use crate::pipeline::{canonicalize, canonicalize_text};
