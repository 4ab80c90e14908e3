/*!
# Performance Benchmarks for Sensegraph

Criterion benchmarks for the two hot paths: the blocked similarity kernel
and per-token Chinese Whispers induction.
*/

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nalgebra::DMatrix;
use rand::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use sensegraph::core::graph::TokenGraph;
use sensegraph::induction::{InductionParams, induce_token_senses};
use sensegraph::similarity::{nearest_neighbor_edges, normalize_rows};
use std::hint::black_box;

fn random_unit_matrix(tokens: usize, dims: usize, seed: u64) -> DMatrix<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f32> = (0..tokens * dims).map(|_| rng.random::<f32>() - 0.5).collect();
    let mut matrix = DMatrix::from_row_slice(tokens, dims, &data);
    normalize_rows(&mut matrix);
    matrix
}

fn clustered_graph(tokens: i32, degree: usize, seed: u64) -> TokenGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = TokenGraph::with_capacity(tokens as usize, degree);
    for u in 0..tokens {
        for _ in 0..degree {
            let v = rng.random_range(0..tokens);
            graph.add_edge(u, v, rng.random::<f32>());
        }
    }
    graph.sort_edges();
    graph
}

fn bench_nearest_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbor_edges");

    for &tokens in [200usize, 500, 1000].iter() {
        let matrix = random_unit_matrix(tokens, 64, 42);
        group.throughput(Throughput::Elements(tokens as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tokens), &matrix, |b, m| {
            b.iter(|| {
                let edges = nearest_neighbor_edges(m, 20, 100).unwrap();
                black_box(edges)
            });
        });
    }
    group.finish();
}

fn bench_token_induction(c: &mut Criterion) {
    let mut group = c.benchmark_group("induce_token_senses");

    for &degree in [20usize, 50, 100].iter() {
        let graph = clustered_graph(500, degree, 7);
        let params = InductionParams::default();
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(degree), &graph, |b, g| {
            b.iter(|| {
                let clusters = induce_token_senses(g, 0, &params, Some(11));
                black_box(clusters)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_neighbors, bench_token_induction);
criterion_main!(benches);
