//! Error types produced by the ingest crate.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`Io`](IngestError::Io) | I/O | The source file could not be read |
//! | [`PayloadTooLarge`](IngestError::PayloadTooLarge) | Validation | Size limit exceeded |
//! | [`Canonical`](IngestError::Canonical) | Canonicalization | Decode or byte-offset failure |
//! | [`InvalidConfig`](IngestError::InvalidConfig) | Configuration | [`IngestConfig`](crate::IngestConfig) failed validation |
//!
//! None of these are transient. A batch caller decides whether to skip the
//! offending document; retrying the same input is pointless.
//!
//! ```rust
//! use ingest::{parse_txt, IngestError};
//! use canonical::CanonicalError;
//!
//! match parse_txt(b"\xff\xfe broken", "utf-8") {
//!     Err(IngestError::Canonical(CanonicalError::Decode { offset, .. })) => {
//!         assert_eq!(offset, 0);
//!     }
//!     other => panic!("expected decode failure, got {other:?}"),
//! }
//! ```
use canonical::CanonicalError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while reading and canonicalizing a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// Reading the source failed. The I/O error is flattened to its message so
    /// the error stays cloneable.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Raw payload exceeds [`IngestConfig::max_payload_bytes`](crate::IngestConfig::max_payload_bytes).
    #[error("raw payload size {size} exceeds limit of {limit}")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Decoding or byte-offset computation failed.
    #[error(transparent)]
    Canonical(#[from] CanonicalError),

    #[error("invalid ingest configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
