//! Gram matrix benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability of stationary kernels (100 to 1K points)
//! - Input dimension with ARD lengthscales
//! - Combination kernels
//! - Graph kernels on random graphs
//! - Factorization of jittered Gram matrices
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gp_kernels::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Uniform inputs in `[0, 10)^dim`.
fn generate_uniform_inputs(n: usize, dim: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new(0.0, 10.0).unwrap();
    let data: Vec<f64> = (0..n * dim).map(|_| dist.sample(&mut rng)).collect();
    Matrix::from_vec(n, dim, data).unwrap()
}

/// Standard normal inputs.
fn generate_normal_inputs(n: usize, dim: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(0.0, 1.0).unwrap();
    let data: Vec<f64> = (0..n * dim).map(|_| dist.sample(&mut rng)).collect();
    Matrix::from_vec(n, dim, data).unwrap()
}

/// Laplacian of a random graph with `n` vertices and `m` edges.
fn generate_graph_laplacian(n: usize, m: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lap = Matrix::zeros(n, n);
    let mut edges = 0;
    while edges < m {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        if i == j || lap[(i, j)] != 0.0 {
            continue;
        }
        lap[(i, j)] = -1.0;
        lap[(j, i)] = -1.0;
        lap[(i, i)] += 1.0;
        lap[(j, j)] += 1.0;
        edges += 1;
    }
    lap
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(20);

    for size in [100, 250, 500, 1_000] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let x = generate_uniform_inputs(size, 1, 42);

        let rbf = RBF::<f64>::new();
        let rbf_params = rbf.init_params(PrngKey::new(0));
        group.bench_with_input(BenchmarkId::new("rbf", size), &size, |b, _| {
            b.iter(|| rbf.gram(black_box(&x), &rbf_params).unwrap())
        });

        let matern = Matern52::<f64>::new();
        let matern_params = matern.init_params(PrngKey::new(0));
        group.bench_with_input(BenchmarkId::new("matern52", size), &size, |b, _| {
            b.iter(|| matern.gram(black_box(&x), &matern_params).unwrap())
        });
    }
    group.finish();
}

fn bench_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("dimensions");
    group.sample_size(50);

    for dim in [1, 2, 5, 10] {
        let x = generate_normal_inputs(250, dim, 7);
        let kernel = Matern32::<f64>::new().active_dims((0..dim).collect::<Vec<_>>());
        let params = kernel.init_params(PrngKey::new(0));

        group.bench_with_input(BenchmarkId::new("matern32_ard", dim), &dim, |b, _| {
            b.iter(|| kernel.gram(black_box(&x), &params).unwrap())
        });
    }
    group.finish();
}

fn bench_combination(c: &mut Criterion) {
    let mut group = c.benchmark_group("combination");
    group.sample_size(50);

    let x = generate_uniform_inputs(250, 2, 11);
    let sum = RBF::<f64>::new().active_dims([0]) + Matern12::new().active_dims([1]);
    let sum_params = sum.init_params(PrngKey::new(0));
    group.bench_function("sum", |b| {
        b.iter(|| sum.gram(black_box(&x), &sum_params).unwrap())
    });

    let prod = RBF::<f64>::new().active_dims([0, 1]) * Polynomial::new().degree(2).active_dims([0, 1]);
    let prod_params = prod.init_params(PrngKey::new(0));
    group.bench_function("product", |b| {
        b.iter(|| prod.gram(black_box(&x), &prod_params).unwrap())
    });
    group.finish();
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    group.sample_size(20);

    for n_vertices in [20, 100, 200] {
        let lap = generate_graph_laplacian(n_vertices, 2 * n_vertices, 123);

        group.bench_with_input(
            BenchmarkId::new("construct", n_vertices),
            &n_vertices,
            |b, _| b.iter(|| GraphKernel::new(black_box(lap.clone())).unwrap()),
        );

        let kernel = GraphKernel::new(lap).unwrap();
        let params = kernel.init_params(PrngKey::new(0));
        let x = Matrix::column(&(0..n_vertices).map(|i| i as f64).collect::<Vec<_>>());
        group.bench_with_input(BenchmarkId::new("gram", n_vertices), &n_vertices, |b, _| {
            b.iter(|| kernel.gram(black_box(&x), &params).unwrap())
        });
    }
    group.finish();
}

fn bench_factorization(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorization");
    group.sample_size(20);

    for size in [100, 250, 500] {
        let x = generate_uniform_inputs(size, 1, 3);
        let kernel = Matern52::<f64>::new();
        let params = kernel.init_params(PrngKey::new(0));
        let kxx = kernel.gram(&x, &params).unwrap() + identity(size) * DEFAULT_JITTER;

        group.bench_with_input(BenchmarkId::new("cholesky", size), &size, |b, _| {
            b.iter(|| black_box(&kxx).to_root().unwrap())
        });
        group.bench_with_input(BenchmarkId::new("log_det", size), &size, |b, _| {
            b.iter(|| black_box(&kxx).log_det().unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_dimensions,
    bench_combination,
    bench_graph,
    bench_factorization,
);
criterion_main!(benches);
