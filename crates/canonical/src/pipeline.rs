use unicode_categories::UnicodeCategories;
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

use crate::alignment::{Alignment, EditKind, EditOp};
use crate::document::{CanonicalDocument, LangBlock, RawDocument};
use crate::encoding::decode_strict;
use crate::error::CanonicalError;
use crate::hash::doc_id_from_bytes;

const BOM: char = '\u{feff}';
const NBSP: char = '\u{a0}';

/// Main entry point. Decodes `raw_bytes` strictly under `encoding` and
/// rewrites the text into canonical form.
///
/// Returns the raw-input metadata, the canonical document (text plus
/// alignment) and the decoded original text, which callers need for
/// [`compute_byte_starts`](crate::compute_byte_starts).
pub fn canonicalize(
    raw_bytes: &[u8],
    encoding: &str,
    media_type: &str,
) -> Result<(RawDocument, CanonicalDocument, String), CanonicalError> {
    let original = decode_strict(raw_bytes, encoding)?.into_owned();
    let (canonical_text, alignment) = canonicalize_text(&original, encoding);

    let raw = RawDocument {
        doc_id: doc_id_from_bytes(raw_bytes),
        media_type: media_type.to_string(),
        encoding: encoding.to_string(),
        bytes_len: raw_bytes.len(),
        source_uri: None,
    };
    let canonical = CanonicalDocument {
        doc_id: raw.doc_id.clone(),
        lang_blocks: vec![LangBlock::undetermined(alignment.canon_len)],
        canonical_text,
        alignment,
    };

    Ok((raw, canonical, original))
}

/// Canonicalizes already-decoded text. Infallible: every character matches
/// exactly one rule.
///
/// Rules, first match wins:
///
/// 1. U+FEFF at index 0 is deleted.
/// 2. CR LF and lone CR become one LF.
/// 3. U+00A0 becomes an ASCII space.
/// 4. A base character plus its trailing combining marks (Mn, Mc, Me) is
///    NFC-composed. Unchanged clusters emit one `keep` per code point; changed
///    clusters emit a single `replace` over the whole cluster.
pub fn canonicalize_text(original: &str, encoding: &str) -> (String, Alignment) {
    let chars: Vec<char> = original.chars().collect();
    let n = chars.len();
    let mut out = Rewriter::with_capacity(original.len(), n);

    let mut i = 0;
    while i < n {
        let ch = chars[i];

        if i == 0 && ch == BOM {
            out.delete(1);
            i += 1;
            continue;
        }

        if ch == '\r' {
            let unit = if chars.get(i + 1) == Some(&'\n') { 2 } else { 1 };
            out.replace(unit, "\n");
            i += unit;
            continue;
        }

        if ch == NBSP {
            out.replace(1, " ");
            i += 1;
            continue;
        }

        let end = cluster_end(&chars, i);
        let cluster = &chars[i..end];
        if is_nfc_quick(cluster.iter().copied()) == IsNormalized::Yes {
            cluster.iter().for_each(|&c| out.keep(c));
        } else {
            let composed: String = cluster.iter().copied().nfc().collect();
            if composed.chars().eq(cluster.iter().copied()) {
                cluster.iter().for_each(|&c| out.keep(c));
            } else {
                out.replace(cluster.len(), &composed);
            }
        }
        i = end;
    }

    out.finish(encoding)
}

fn is_combining_mark(ch: char) -> bool {
    ch.is_mark_nonspacing() || ch.is_mark_spacing_combining() || ch.is_mark_enclosing()
}

/// End (exclusive) of the cluster starting at `start`: the character itself
/// plus every combining mark that follows it.
fn cluster_end(chars: &[char], start: usize) -> usize {
    let mut end = start + 1;
    while end < chars.len() && is_combining_mark(chars[end]) {
        end += 1;
    }
    end
}

/// Accumulates canonical text and ops while keeping both cursors in step.
struct Rewriter {
    text: String,
    ops: Vec<EditOp>,
    orig_pos: usize,
    canon_pos: usize,
}

impl Rewriter {
    fn with_capacity(bytes: usize, chars: usize) -> Self {
        Self {
            text: String::with_capacity(bytes),
            ops: Vec::with_capacity(chars),
            orig_pos: 0,
            canon_pos: 0,
        }
    }

    fn keep(&mut self, ch: char) {
        self.text.push(ch);
        self.push(EditKind::Keep, 1, 1);
    }

    fn delete(&mut self, orig_chars: usize) {
        self.push(EditKind::Delete, orig_chars, 0);
    }

    fn replace(&mut self, orig_chars: usize, fragment: &str) {
        self.text.push_str(fragment);
        self.push(EditKind::Replace, orig_chars, fragment.chars().count());
    }

    fn push(&mut self, kind: EditKind, orig_chars: usize, canon_chars: usize) {
        let orig = [self.orig_pos, self.orig_pos + orig_chars];
        let canon = [self.canon_pos, self.canon_pos + canon_chars];
        self.ops.push(EditOp::new(kind, orig, canon));
        self.orig_pos = orig[1];
        self.canon_pos = canon[1];
    }

    fn finish(self, encoding: &str) -> (String, Alignment) {
        let alignment = Alignment::new(self.ops, encoding, self.orig_pos, self.canon_pos);
        (self.text, alignment)
    }
}
