//! Criterion micro-benchmarks for the geometry codec.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meshbridge_bench::polygon_profile;
use meshbridge_core::Separators;
use meshbridge_geometry::{decode, decode_with_report, encode_polygons};

/// Benchmark: encode 1K polygons of 32 points with one hole each.
fn bench_encode_polygons_1k(c: &mut Criterion) {
    let polygons = polygon_profile(1_000, 32);

    c.bench_function("encode_polygons_1k", |b| {
        b.iter(|| {
            let list = encode_polygons(black_box(&polygons), Separators::default());
            black_box(&list);
        });
    });
}

/// Benchmark: decode the same list.
fn bench_decode_polygons_1k(c: &mut Criterion) {
    let list = encode_polygons(&polygon_profile(1_000, 32), Separators::default());

    c.bench_function("decode_polygons_1k", |b| {
        b.iter(|| {
            let polygons = decode(black_box(&list));
            black_box(&polygons);
        });
    });
}

/// Benchmark: decode with anomaly reporting at a loose tolerance.
fn bench_decode_with_report_1k(c: &mut Criterion) {
    let list = encode_polygons(&polygon_profile(1_000, 32), Separators::default());

    c.bench_function("decode_with_report_1k", |b| {
        b.iter(|| {
            let decoded = decode_with_report(black_box(&list), 1e-6);
            black_box(&decoded);
        });
    });
}

criterion_group!(
    benches,
    bench_encode_polygons_1k,
    bench_decode_polygons_1k,
    bench_decode_with_report_1k
);
criterion_main!(benches);
