use hdt::{canonicalize, compute_byte_starts, parse_auto, AlignmentIndex, IngestConfig};

const MIXED: &str = "\u{feff}Se\u{301}ance\r\nline\rtwo\u{a0}three \u{212b} q\u{301}\u{20dd}\n";

#[test]
fn identical_bytes_yield_identical_outputs() {
    let bytes = MIXED.as_bytes();
    let (raw_a, doc_a, orig_a) = canonicalize(bytes, "utf-8", "text/plain").expect("first run");
    let (raw_b, doc_b, orig_b) = canonicalize(bytes, "utf-8", "text/plain").expect("second run");

    assert_eq!(raw_a, raw_b);
    assert_eq!(orig_a, orig_b);
    assert_eq!(doc_a.canonical_text.as_bytes(), doc_b.canonical_text.as_bytes());
    assert_eq!(doc_a.alignment, doc_b.alignment);

    let json_a = serde_json::to_string(&doc_a).expect("serialize a");
    let json_b = serde_json::to_string(&doc_b).expect("serialize b");
    assert_eq!(json_a, json_b, "serialized documents must be byte-identical");
}

#[test]
fn doc_id_depends_only_on_bytes() {
    let bytes = MIXED.as_bytes();
    let (txt, _, _) = canonicalize(bytes, "utf-8", "text/plain").expect("txt");
    let (md, _, _) = canonicalize(bytes, "utf-8", "text/markdown").expect("md");
    assert_eq!(txt.doc_id, md.doc_id);
    assert!(txt.doc_id.starts_with("doc-"));
    assert_eq!(txt.doc_id.len(), "doc-".len() + 10);

    let (other, _, _) = canonicalize(b"different", "utf-8", "text/plain").expect("other");
    assert_ne!(txt.doc_id, other.doc_id);
}

#[test]
fn index_answers_are_stable_across_rebuilds() {
    let (raw, doc, orig) = canonicalize(MIXED.as_bytes(), "utf-8", "text/plain").expect("ok");
    let starts = compute_byte_starts(&orig, &raw.encoding).expect("starts");
    let idx_a = AlignmentIndex::new(&doc.alignment, starts.clone());
    let idx_b = AlignmentIndex::new(&doc.alignment, starts);

    let canon_len = doc.alignment.canon_len;
    for c0 in 0..=canon_len {
        for c1 in c0..=canon_len {
            assert_eq!(idx_a.inverse_bytes((c0, c1)), idx_b.inverse_bytes((c0, c1)));
        }
    }
}

#[test]
fn adapters_agree_with_core_canonicalization() {
    let cfg = IngestConfig::default();
    let doc = parse_auto(MIXED.as_bytes(), &cfg.default_encoding, None).expect("parse");
    let (_, core, _) = canonicalize(MIXED.as_bytes(), "utf-8", "text/plain").expect("core");
    assert_eq!(doc.canonical, core);
}
