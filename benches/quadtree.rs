use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

use rs_barnes_hut::particles::{Cell, Quadtree, WorkingVecs};
use rs_barnes_hut::utils::{TreeSpec, DEFAULT_FAR_FIELD_LIMIT, GRAVITATIONAL_CONSTANT};

fn spec(height: usize, particles: usize) -> TreeSpec {
    TreeSpec::new(height, (particles, particles), (1e30, 1e32), (0.0, 1e17), (0.0, 1e17))
}

fn built_tree(height: usize, particles: usize) -> Quadtree {
    let mut tree = Quadtree::init(&spec(height, particles), &mut StdRng::seed_from_u64(42))
        .expect("valid benchmark tree");
    tree.compute_multipoles();
    tree
}

pub fn bench_tree_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(20);

    group.bench_function("build_h5_100k", |b| b.iter(|| {
        let tree = Quadtree::init(&spec(5, 100_000), &mut StdRng::seed_from_u64(42));
        black_box(tree)
    }));

    let tree = built_tree(5, 100_000);
    group.bench_function("multipoles_sequential", |b| b.iter_batched(
        || tree.clone(),
        |mut t| t.compute_multipoles(),
        BatchSize::LargeInput,
    ));
    group.bench_function("multipoles_parallel", |b| b.iter_batched(
        || tree.clone(),
        |mut t| t.compute_multipoles_parallel(),
        BatchSize::LargeInput,
    ));
    group.bench_function("forces_parallel", |b| b.iter_batched(
        || tree.clone(),
        |mut t| black_box(t.compute_forces(DEFAULT_FAR_FIELD_LIMIT)),
        BatchSize::LargeInput,
    ));
    group.finish();
}

pub fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("p2p_in");
    group.sample_size(20);
    let cell = Cell::init(
        (2_000, 2_000),
        (1e30, 1e32),
        (0.0, 1e17),
        (0.0, 1e17),
        &mut StdRng::seed_from_u64(7),
    );
    let mut wv = WorkingVecs::new();

    group.bench_function("vectorized", |b| b.iter_batched(
        || cell.clone(),
        |mut c| c.p2p_in(GRAVITATIONAL_CONSTANT, &mut wv),
        BatchSize::LargeInput,
    ));
    group.bench_function("reference", |b| b.iter_batched(
        || cell.clone(),
        |mut c| c.p2p_in_ref(GRAVITATIONAL_CONSTANT),
        BatchSize::LargeInput,
    ));
    group.finish();
}

criterion_group!(benches, bench_tree_phases, bench_kernel);
criterion_main!(benches);
