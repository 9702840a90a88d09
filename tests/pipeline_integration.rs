use std::fs;

use hdt::{
    ingest_file, parse_txt, process_paths, AlignmentIndex, DocumentSummary, EditKind, HdtConfig,
    IngestConfig,
};
use tempfile::TempDir;

#[test]
fn file_to_citation_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("report.md");
    let source = "\u{feff}# Re\u{301}sume\u{301}\r\nDemand grew 5\u{a0}%.\r\n";
    fs::write(&path, source).expect("write fixture");

    let doc = ingest_file(&path, &IngestConfig::default()).expect("ingest");
    assert_eq!(doc.canonical.canonical_text, "# R\u{e9}sum\u{e9}\nDemand grew 5 %.\n");

    let index = doc.index();
    let canon_len = doc.canon_len();
    assert_eq!(index.inverse_bytes((0, canon_len)), (0, source.len()));

    // cite "Demand" back to the exact source bytes
    let start = doc.canonical.canonical_text.chars().position(|c| c == 'D').expect("D");
    let span = doc.source_span(&index, start, start + 6);
    let (b0, b1) = span.bytes;
    assert_eq!(&source.as_bytes()[b0..b1], b"Demand");
    assert_eq!(span.original_text, "Demand");

    // a composed character cites both source code points
    let span = doc.source_span(&index, 3, 4);
    assert_eq!(span.original_text, "e\u{301}");
    assert_eq!(span.bytes.1 - span.bytes.0, 3);
}

#[test]
fn every_canonical_span_maps_inside_the_source() {
    let text = "a\r\n\u{a0}e\u{301}\u{323}\r\u{1f468}\u{200d}\u{1f469}";
    let doc = parse_txt(text.as_bytes(), "utf-8").expect("parse");
    let index: AlignmentIndex = doc.index();
    let canon_len = doc.canon_len();
    for c0 in 0..=canon_len {
        for c1 in c0..=canon_len {
            let (b0, b1) = index.inverse_bytes((c0, c1));
            assert!(b0 <= b1 && b1 <= doc.raw.bytes_len, "span ({c0}, {c1})");
            assert!(text.is_char_boundary(b0) && text.is_char_boundary(b1));
        }
    }
}

#[test]
fn alignment_ops_tile_both_texts() {
    let doc = parse_txt("x\r\ny\u{a0}z\u{212b}".as_bytes(), "utf-8").expect("parse");
    let alignment = &doc.canonical.alignment;
    alignment.check_coverage().expect("contiguous ops");
    assert_eq!(alignment.count(EditKind::Replace), 3);
    assert_eq!(alignment.count(EditKind::Insert), 0);
}

#[test]
fn directory_batch_with_config() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("a.txt"), b"caf\xe9\r\n").expect("write a");
    fs::write(dir.path().join("b.srt"), b"1\r\nna\xefve\r\n").expect("write b");

    let cfg = HdtConfig::from_yaml_str("ingest:\n  default_encoding: windows-1252\n")
        .expect("config");
    let results = process_paths(&[dir.path()], &cfg).expect("collect");
    assert_eq!(results.len(), 2);

    let a = results[0].as_ref().expect("a ok");
    assert_eq!(a.canonical.canonical_text, "caf\u{e9}\n");
    let b = results[1].as_ref().expect("b ok");
    assert_eq!(b.raw.media_type, "text/srt");

    let summary = DocumentSummary::from_document(a, false);
    assert_eq!(summary.inverse_full_span_bytes, [0, 6]);
    assert_eq!(summary.orig_bytes_len, 6);
}

#[test]
fn stateful_encoding_full_span_stays_inside_source() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("jp.txt");
    // "a", ESC $ B, JIS 4A ;z, ESC ( B, CR LF
    let source: &[u8] = b"a\x1b$B4A;z\x1b(B\r\n";
    fs::write(&path, source).expect("write fixture");

    let cfg = IngestConfig {
        default_encoding: "iso-2022-jp".into(),
        ..Default::default()
    };
    let doc = ingest_file(&path, &cfg).expect("ingest");
    assert_eq!(doc.canonical.canonical_text, "a\u{6f22}\u{5b57}\n");

    let index = doc.index();
    let (b0, b1) = index.inverse_bytes((0, doc.canon_len()));
    assert_eq!((b0, b1), (0, source.len()));
    assert_eq!(&source[b0..b1], source);
}
