use canonical::{canonicalize, compute_byte_starts, AlignmentIndex};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn sample(size: usize) -> String {
    // mix of keeps, CRLF replaces, NBSP replaces and composed clusters
    "Cafe\u{301} na\u{ef}ve\u{a0}text\r\n".repeat(size / 24 + 1)
}

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");

    for size in [64, 512, 4096, 32768].iter() {
        let text = sample(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("bytes_{size}"), |b| {
            b.iter(|| {
                canonicalize(black_box(text.as_bytes()), "utf-8", "text/plain")
                    .expect("canonicalize")
            })
        });
    }

    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment_index");

    for size in [4096, 32768].iter() {
        let text = sample(*size);
        let (raw, doc, orig) =
            canonicalize(text.as_bytes(), "utf-8", "text/plain").expect("canonicalize");
        let starts = compute_byte_starts(&orig, &raw.encoding).expect("byte starts");
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("build_{size}"), |b| {
            b.iter(|| AlignmentIndex::new(black_box(&doc.alignment), starts.clone()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_canonicalize, bench_index);
criterion_main!(benches);
