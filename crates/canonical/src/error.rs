use thiserror::Error;

/// Errors that can occur during canonicalization and alignment.
///
/// Decoding and encoding failures are deterministic: retrying with the same
/// bytes and encoding label always fails the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CanonicalError {
    /// The encoding label is not one `encoding_rs` recognizes.
    #[error("unknown encoding label: {0:?}")]
    UnknownEncoding(String),

    /// The raw bytes are malformed under the declared encoding.
    #[error("bytes are not valid {encoding}: malformed sequence at byte offset {offset}")]
    Decode { encoding: String, offset: usize },

    /// A decoded character has no representation in the declared encoding.
    #[error("character {ch:?} at char index {index} cannot be encoded as {encoding}")]
    Encode {
        encoding: String,
        index: usize,
        ch: char,
    },

    /// A deserialized alignment violates the tiling invariant.
    #[error("invalid alignment: {0}")]
    InvalidAlignment(String),
}
