//! Criterion micro-benchmarks for mesh resizing and exchange round trips.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use meshbridge_bench::mesh_profile;
use meshbridge_kernel::Exchange;
use meshbridge_mesh::FaceData;
use meshbridge_pin::Pinnable;
use meshbridge_test_utils::MockKernel;

/// Benchmark: grow every dimension of a 100x100 quad mesh by a quarter.
fn bench_resize_100x100(c: &mut Criterion) {
    let mesh = mesh_profile(100);
    let target = (
        mesh.num_nodes() * 5 / 4,
        mesh.num_edges() * 5 / 4,
        mesh.num_faces() * 5 / 4,
        mesh.num_face_nodes() * 5 / 4,
    );

    c.bench_function("resize_100x100", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut m| {
                m.resize(target.0, target.1, target.2, target.3);
                m.dispose();
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: pin, project and unpin a 100x100 quad mesh.
fn bench_pin_cycle_100x100(c: &mut Criterion) {
    let mut mesh = mesh_profile(100);

    c.bench_function("pin_cycle_100x100", |b| {
        b.iter(|| {
            let view = mesh.create_native_view();
            black_box(view.num_nodes);
            drop(view);
            mesh.unpin();
        });
    });
}

/// Benchmark: set and read back a 50x50 quad mesh through the mock engine.
fn bench_exchange_round_trip_50x50(c: &mut Criterion) {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let exchange = Exchange::new(&kernel);
    let mut mesh = mesh_profile(50);

    c.bench_function("exchange_round_trip_50x50", |b| {
        b.iter(|| {
            exchange.set_mesh2d(state, &mut mesh).unwrap();
            let back = exchange.mesh2d(state, FaceData::Include).unwrap();
            black_box(&back);
        });
    });
}

criterion_group!(
    benches,
    bench_resize_100x100,
    bench_pin_cycle_100x100,
    bench_exchange_round_trip_50x50
);
criterion_main!(benches);
