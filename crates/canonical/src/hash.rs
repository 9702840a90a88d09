//! Content hashing for document identity.
//!
//! ```text
//! hash_bytes(b)        = hex(SHA-256(b))
//! doc_id_from_bytes(b) = "doc-" || hash_bytes(b)[..10]
//! ```
//!
//! The doc id is a pipeline identity, not a security boundary: ten hex chars
//! (40 bits) keep ids short in logs while staying collision-free at batch
//! scale.

use sha2::{Digest, Sha256};

const DOC_ID_HEX_CHARS: usize = 10;

/// SHA-256 of arbitrary bytes as a 64-char lowercase hex string.
///
/// ```rust
/// use canonical::hash_bytes;
///
/// let hash = hash_bytes(b"hello world");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, hash_bytes(b"hello world"));
/// ```
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Deterministic document id derived from the raw input bytes.
///
/// ```rust
/// use canonical::doc_id_from_bytes;
///
/// let id = doc_id_from_bytes(b"Demand grew.");
/// assert!(id.starts_with("doc-"));
/// assert_eq!(id.len(), 14);
/// ```
pub fn doc_id_from_bytes(bytes: &[u8]) -> String {
    let digest = hash_bytes(bytes);
    format!("doc-{}", &digest[..DOC_ID_HEX_CHARS])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_id_is_stable_and_content_sensitive() {
        assert_eq!(doc_id_from_bytes(b"abc"), doc_id_from_bytes(b"abc"));
        assert_ne!(doc_id_from_bytes(b"abc"), doc_id_from_bytes(b"abd"));
    }

    #[test]
    fn known_digest() {
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(doc_id_from_bytes(b""), "doc-e3b0c44298");
    }
}
