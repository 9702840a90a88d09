//! Boundary lookup tables compiled from an [`Alignment`].
//!
//! A *boundary* is a position between characters: `0..=len`. The index maps
//! every original boundary to a canonical one and back, then turns original
//! boundaries into byte offsets with the byte-starts prefix sum from
//! [`compute_byte_starts`](crate::compute_byte_starts).
//!
//! ## Precision
//!
//! Inside a `keep` op the mapping is exact. Inside any other op (or a `keep`
//! whose ranges differ in length) there is no meaningful interior
//! correspondence, so every boundary the op touches collapses onto the op's
//! start on the other side. A query that lands inside a composed cluster
//! therefore returns the cluster start, never an interpolated position.
//!
//! ## Invariants
//!
//! - both tables are non-decreasing;
//! - `forward_char(0) == 0`, `forward_char(orig_len) == canon_len`;
//! - `inverse_char(0) == 0`, `inverse_char(canon_len) == orig_len`.
//!
//! When the canonical text is empty (a document holding only a BOM) the last
//! two cannot both hold; the start anchor wins and the document maps to the
//! empty span at offset 0.

use crate::alignment::Alignment;

/// Read-only bidirectional boundary map for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentIndex {
    orig_len: usize,
    canon_len: usize,
    orig2canon: Vec<usize>,
    canon2orig: Vec<usize>,
    byte_starts: Vec<usize>,
}

impl AlignmentIndex {
    /// Compiles the lookup tables. `byte_starts` should hold `orig_len + 1`
    /// entries; lookups past its end saturate at the last entry.
    pub fn new(alignment: &Alignment, byte_starts: Vec<usize>) -> Self {
        let orig_len = alignment.orig_len;
        let canon_len = alignment.canon_len;
        let mut orig2canon = vec![0usize; orig_len + 1];
        let mut canon2orig = vec![0usize; canon_len + 1];

        for op in &alignment.ops {
            let [o0, o1] = op.orig;
            let [c0, c1] = op.canon;
            // Deserialized ops are unchecked; never walk past the tables.
            let o_end = o1.min(orig_len);
            let c_end = c1.min(canon_len);

            if op.is_length_preserving() {
                for (o, c) in (o0..=o_end).zip(c0..=c_end) {
                    orig2canon[o] = c;
                    canon2orig[c] = o;
                }
            } else {
                for o in o0..=o_end {
                    orig2canon[o] = c0.min(canon_len);
                }
                for c in c0..=c_end {
                    canon2orig[c] = o0.min(orig_len);
                }
            }
        }

        // Adjacent ops of different kinds share a boundary slot; the later
        // write can undercut an earlier neighbour.
        raise_to_running_max(&mut orig2canon);
        raise_to_running_max(&mut canon2orig);

        // A collapsed op at either end leaves the document edges pointing at
        // its start; pin them so the full span always maps to the full span.
        orig2canon[orig_len] = canon_len;
        canon2orig[canon_len] = orig_len;
        orig2canon[0] = 0;
        canon2orig[0] = 0;

        Self {
            orig_len,
            canon_len,
            orig2canon,
            canon2orig,
            byte_starts,
        }
    }

    pub fn orig_len(&self) -> usize {
        self.orig_len
    }

    pub fn canon_len(&self) -> usize {
        self.canon_len
    }

    pub fn byte_starts(&self) -> &[usize] {
        &self.byte_starts
    }

    /// Original boundary → canonical boundary. Input is clamped to
    /// `[0, orig_len]`.
    pub fn forward_char(&self, orig_boundary: usize) -> usize {
        self.orig2canon[orig_boundary.min(self.orig_len)]
    }

    /// Canonical boundary → original boundary. Input is clamped to
    /// `[0, canon_len]`.
    pub fn inverse_char(&self, canon_boundary: usize) -> usize {
        self.canon2orig[canon_boundary.min(self.canon_len)]
    }

    /// Maps an original character span to a canonical one.
    pub fn forward_span(&self, orig_span: (usize, usize)) -> (usize, usize) {
        (self.forward_char(orig_span.0), self.forward_char(orig_span.1))
    }

    /// Maps a canonical character span to an original one.
    pub fn inverse_span(&self, canon_span: (usize, usize)) -> (usize, usize) {
        (self.inverse_char(canon_span.0), self.inverse_char(canon_span.1))
    }

    /// Original byte range (under the declared encoding) that produced the
    /// canonical span `[c0, c1)`.
    pub fn inverse_bytes(&self, canon_span: (usize, usize)) -> (usize, usize) {
        let (o0, o1) = self.inverse_span(canon_span);
        (self.byte_at(o0), self.byte_at(o1))
    }

    fn byte_at(&self, orig_boundary: usize) -> usize {
        match self.byte_starts.get(orig_boundary) {
            Some(&offset) => offset,
            None => self.byte_starts.last().copied().unwrap_or(0),
        }
    }
}

fn raise_to_running_max(table: &mut [usize]) {
    for i in 1..table.len() {
        if table[i] < table[i - 1] {
            table[i] = table[i - 1];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{EditKind, EditOp};
    use crate::encoding::compute_byte_starts;
    use crate::pipeline::canonicalize;

    fn index_for(text: &str) -> (AlignmentIndex, String, usize) {
        let (raw, doc, orig) = canonicalize(text.as_bytes(), "utf-8", "text/plain")
            .expect("canonicalization succeeds");
        let starts = compute_byte_starts(&orig, &raw.encoding).expect("byte starts");
        (AlignmentIndex::new(&doc.alignment, starts), doc.canonical_text, raw.bytes_len)
    }

    fn assert_monotonic(idx: &AlignmentIndex) {
        for b in 1..=idx.orig_len() {
            assert!(idx.forward_char(b - 1) <= idx.forward_char(b), "orig2canon at {b}");
        }
        for b in 1..=idx.canon_len() {
            assert!(idx.inverse_char(b - 1) <= idx.inverse_char(b), "canon2orig at {b}");
        }
    }

    #[test]
    fn crlf_maps_to_single_newline() {
        let (idx, canon, _) = index_for("a\r\nb");
        assert_eq!(canon, "a\nb");
        // canonical "\n" at [1, 2) covers original "\r\n" at [1, 3)
        assert_eq!(idx.inverse_span((1, 2)), (1, 3));
        assert_eq!(idx.forward_char(2), 1);
        assert_eq!(idx.forward_char(3), 2);
        assert_monotonic(&idx);
    }

    #[test]
    fn interior_of_composed_cluster_collapses_to_cluster_start() {
        // e + dot below + circumflex composes to U+1EC7
        let (idx, canon, _) = index_for("xe\u{323}\u{302}y");
        assert_eq!(canon, "x\u{1ec7}y");
        assert_eq!(canon.chars().count(), 3);
        // original boundaries 2 and 3 sit inside the cluster [1, 4)
        assert_eq!(idx.forward_char(1), 1);
        assert_eq!(idx.forward_char(2), 1);
        assert_eq!(idx.forward_char(3), 1);
        assert_eq!(idx.forward_char(4), 2);
        assert_eq!(idx.inverse_char(1), 1);
        assert_eq!(idx.inverse_char(2), 4);
        assert_monotonic(&idx);
    }

    #[test]
    fn trailing_composed_cluster_keeps_full_span() {
        let (idx, canon, bytes_len) = index_for("Cafe\u{301}");
        assert_eq!(canon, "Caf\u{e9}");
        assert_eq!(idx.inverse_char(4), 5);
        assert_eq!(idx.forward_char(5), 4);
        assert_eq!(idx.inverse_bytes((0, 4)), (0, bytes_len));
        assert_eq!(idx.inverse_bytes((3, 4)), (3, 6));
    }

    #[test]
    fn leading_bom_is_inside_full_span() {
        let (idx, canon, bytes_len) = index_for("\u{feff}ok");
        assert_eq!(canon, "ok");
        assert_eq!(idx.inverse_bytes((0, 2)), (0, bytes_len));
        // the first retained char still starts after the BOM
        assert_eq!(idx.inverse_bytes((1, 2)), (4, 5));
        assert_monotonic(&idx);
    }

    #[test]
    fn bom_only_document_maps_to_empty_span() {
        let (idx, canon, _) = index_for("\u{feff}");
        assert_eq!(canon, "");
        assert_eq!(idx.inverse_char(0), 0);
        assert_eq!(idx.forward_char(1), 0);
    }

    #[test]
    fn queries_clamp_out_of_range_boundaries() {
        let (idx, _, bytes_len) = index_for("abc");
        assert_eq!(idx.forward_char(99), 3);
        assert_eq!(idx.inverse_char(99), 3);
        assert_eq!(idx.inverse_bytes((2, 99)), (2, bytes_len));
    }

    #[test]
    fn short_byte_starts_saturate() {
        let aln = Alignment::new(
            vec![EditOp::new(EditKind::Keep, [0, 2], [0, 2])],
            "utf-8",
            2,
            2,
        );
        let idx = AlignmentIndex::new(&aln, vec![0, 1]);
        assert_eq!(idx.inverse_bytes((0, 2)), (0, 1));
        let empty = AlignmentIndex::new(&aln, Vec::new());
        assert_eq!(empty.inverse_bytes((0, 2)), (0, 0));
    }

    #[test]
    fn repair_pass_restores_order_for_overlapping_ops() {
        // not a valid tiling: the replace rewrites slots the keep already set
        let aln = Alignment::new(
            vec![
                EditOp::new(EditKind::Keep, [0, 3], [0, 3]),
                EditOp::new(EditKind::Replace, [2, 3], [0, 1]),
            ],
            "utf-8",
            3,
            3,
        );
        let idx = AlignmentIndex::new(&aln, vec![0, 1, 2, 3]);
        assert_eq!(idx.forward_char(2), 1);
        assert_eq!(idx.inverse_char(1), 2);
        assert_monotonic(&idx);
    }

    #[test]
    fn oversized_ops_are_bounded_by_the_tables() {
        let aln: Alignment = serde_json::from_str(
            r#"{"ops":[
                {"kind":"replace","orig":[0,1000000000000000000],"canon":[0,1]},
                {"kind":"keep","orig":[1,18446744073709551615],"canon":[1,18446744073709551615]}
            ],"encoding":"utf-8","orig_len":2,"canon_len":2}"#,
        )
        .expect("parse alignment");
        assert!(aln.check_coverage().is_err());

        let idx = AlignmentIndex::new(&aln, vec![0, 1, 2]);
        assert_eq!(idx.forward_char(2), 2);
        assert_eq!(idx.inverse_char(2), 2);
        assert_eq!(idx.inverse_bytes((0, 2)), (0, 2));
        assert_monotonic(&idx);
    }
}
