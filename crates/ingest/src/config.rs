//! Configuration for file ingest.
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let cfg = IngestConfig::default();
//! assert_eq!(cfg.default_encoding, "utf-8");
//! assert!(cfg.validate().is_ok());
//!
//! let cp1252 = IngestConfig {
//!     default_encoding: "windows-1252".into(),
//!     max_payload_bytes: Some(10 * 1024 * 1024),
//!     ..Default::default()
//! };
//! assert!(cp1252.validate().is_ok());
//! ```
//!
//! Serialized form (as it appears under `ingest:` in the YAML config):
//!
//! ```yaml
//! version: 1
//! default_encoding: utf-8
//! max_payload_bytes: 10485760
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IngestConfig {
    /// Semantic version of the ingest configuration. Must be >= 1.
    ///
    /// Default: `1`
    pub version: u32,

    /// Encoding label used to decode every file. Encodings are never
    /// auto-detected; a file in another encoding fails to decode.
    ///
    /// Default: `"utf-8"`
    pub default_encoding: String,

    /// Maximum raw file size in bytes. Larger files are rejected with
    /// [`IngestError::PayloadTooLarge`](crate::IngestError::PayloadTooLarge)
    /// before they are read.
    ///
    /// Default: `None` (no limit)
    pub max_payload_bytes: Option<usize>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config version must be >= 1")]
    InvalidVersion,

    #[error("unknown default_encoding label: {0:?}")]
    UnknownEncoding(String),

    #[error("max_payload_bytes must be greater than zero when set")]
    ZeroPayloadLimit,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            default_encoding: "utf-8".into(),
            max_payload_bytes: None,
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion);
        }
        if canonical::resolve_encoding(&self.default_encoding).is_err() {
            return Err(ConfigError::UnknownEncoding(self.default_encoding.clone()));
        }
        if self.max_payload_bytes == Some(0) {
            return Err(ConfigError::ZeroPayloadLimit);
        }
        Ok(())
    }
}
