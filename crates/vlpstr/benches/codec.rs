//! Benchmark – `vlpstr` encode and decode
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vlpstr::{Terminator, Validation, VlpStr, decode_length, encode, required_size, write_prefix};

/// Payload sizes straddling each of the first three width boundaries.
const SIZES: &[usize] = &[16, 127, 128, 4_096, 65_536];

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for &len in SIZES {
        let payload = vec![b'a'; len];
        let mut buf = vec![0u8; required_size(len, Terminator::Nul)];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &payload, |b, payload| {
            b.iter(|| black_box(encode(&mut buf, black_box(payload), Terminator::Nul)));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    // Prefix-only buffers, one per width.
    let prefixes: Vec<[u8; 9]> = (0..=8u32)
        .map(|width| {
            let len = if width == 0 { 100 } else { 1u64 << (8 * width - 1) };
            let mut buf = [0u8; 9];
            write_prefix(&mut buf, len);
            buf
        })
        .collect();

    group.bench_function("decode_length", |b| {
        b.iter(|| {
            for buf in &prefixes {
                black_box(decode_length(black_box(buf)));
            }
        });
    });

    for &len in SIZES {
        let mut buf = vec![0u8; required_size(len, Terminator::Nul)];
        encode(&mut buf, &vec![b'a'; len], Terminator::Nul);
        group.bench_with_input(BenchmarkId::new("parse_strict", len), &buf, |b, buf| {
            b.iter(|| {
                let view = VlpStr::parse_with(black_box(buf), Validation::Strict)
                    .expect("benchmark input is well formed");
                black_box(view.as_bytes().len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
