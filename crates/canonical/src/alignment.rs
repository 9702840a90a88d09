//! Edit-operation record linking original decoded text to canonical text.
//!
//! An [`Alignment`] is the complete, replayable description of one
//! canonicalization run. Every range is a half-open interval of *character*
//! (Unicode scalar value) indices, never bytes.
//!
//! # Tiling
//!
//! Read in order, the `orig` ranges of the ops cover `[0, orig_len)` with no
//! gaps or overlaps, and the `canon` ranges cover `[0, canon_len)` the same
//! way. [`canonicalize`](crate::canonicalize) produces alignments that hold
//! this by construction; [`Alignment::check_coverage`] verifies it for
//! alignments that arrive from elsewhere (for example, deserialized JSON).
//!
//! # Persisted shape
//!
//! ```json
//! {
//!   "version": "v1",
//!   "ops": [{"kind": "keep", "orig": [0, 1], "canon": [0, 1]}],
//!   "encoding": "utf-8",
//!   "orig_len": 1,
//!   "canon_len": 1
//! }
//! ```
//!
//! Field names and the `kind` strings are read by downstream consumers and
//! must not change.

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Version tag written into every alignment this crate produces.
pub const ALIGNMENT_VERSION: &str = "v1";

/// The kind of a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// Original characters carried over unchanged (equal-length ranges).
    Keep,
    /// Original characters dropped; the canonical range is empty.
    Delete,
    /// Canonical characters with no original counterpart.
    Insert,
    /// Original characters rewritten into different canonical characters.
    Replace,
}

impl EditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::Keep => "keep",
            EditKind::Delete => "delete",
            EditKind::Insert => "insert",
            EditKind::Replace => "replace",
        }
    }
}

/// One contiguous edit, as `[start, end)` character ranges on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditOp {
    pub kind: EditKind,
    /// Range in the original decoded text.
    pub orig: [usize; 2],
    /// Range in the canonical text.
    pub canon: [usize; 2],
}

impl EditOp {
    pub fn new(kind: EditKind, orig: [usize; 2], canon: [usize; 2]) -> Self {
        Self { kind, orig, canon }
    }

    pub fn orig_len(&self) -> usize {
        self.orig[1].saturating_sub(self.orig[0])
    }

    pub fn canon_len(&self) -> usize {
        self.canon[1].saturating_sub(self.canon[0])
    }

    /// True when every interior boundary of this op has an exact counterpart.
    pub fn is_length_preserving(&self) -> bool {
        self.kind == EditKind::Keep && self.orig_len() == self.canon_len()
    }
}

fn default_version() -> String {
    ALIGNMENT_VERSION.to_string()
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

/// Ordered edit record for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    #[serde(default = "default_version")]
    pub version: String,
    pub ops: Vec<EditOp>,
    /// Encoding label the original bytes were decoded with.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Length of the original decoded text, in characters.
    pub orig_len: usize,
    /// Length of the canonical text, in characters.
    pub canon_len: usize,
}

impl Alignment {
    pub fn new(
        ops: Vec<EditOp>,
        encoding: impl Into<String>,
        orig_len: usize,
        canon_len: usize,
    ) -> Self {
        Self {
            version: default_version(),
            ops,
            encoding: encoding.into(),
            orig_len,
            canon_len,
        }
    }

    /// Verifies that the ops tile both coordinate spaces exactly and that
    /// every `keep` op has equal-length ranges.
    pub fn check_coverage(&self) -> Result<(), CanonicalError> {
        let mut orig_cursor = 0usize;
        let mut canon_cursor = 0usize;

        for (pos, op) in self.ops.iter().enumerate() {
            let [o0, o1] = op.orig;
            let [c0, c1] = op.canon;
            if o0 != orig_cursor || c0 != canon_cursor {
                return Err(CanonicalError::InvalidAlignment(format!(
                    "op {pos} starts at orig {o0}/canon {c0}, expected {orig_cursor}/{canon_cursor}"
                )));
            }
            if o1 < o0 || c1 < c0 {
                return Err(CanonicalError::InvalidAlignment(format!(
                    "op {pos} has a reversed range: orig [{o0}, {o1}), canon [{c0}, {c1})"
                )));
            }
            if op.kind == EditKind::Keep && op.orig_len() != op.canon_len() {
                return Err(CanonicalError::InvalidAlignment(format!(
                    "keep op {pos} changes length: orig {} vs canon {}",
                    op.orig_len(),
                    op.canon_len()
                )));
            }
            orig_cursor = o1;
            canon_cursor = c1;
        }

        if orig_cursor != self.orig_len || canon_cursor != self.canon_len {
            return Err(CanonicalError::InvalidAlignment(format!(
                "ops end at orig {orig_cursor}/canon {canon_cursor}, expected {}/{}",
                self.orig_len, self.canon_len
            )));
        }
        Ok(())
    }

    /// True when the transform changed nothing (every op is a `keep`).
    pub fn is_identity(&self) -> bool {
        self.orig_len == self.canon_len && self.ops.iter().all(|op| op.kind == EditKind::Keep)
    }

    /// Number of ops of the given kind.
    pub fn count(&self, kind: EditKind) -> usize {
        self.ops.iter().filter(|op| op.kind == kind).count()
    }
}
