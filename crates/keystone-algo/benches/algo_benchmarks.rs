// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Centrality Algorithm Benchmarks
//!
//! Run with:
//! cargo bench --bench algo_benchmarks

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use keystone_algo::{
    Algorithm, Betweenness, BetweennessConfig, Closeness, ClosenessConfig, EigenvectorCentrality,
    EigenvectorCentralityConfig, Graph, GraphBuilder, Hits, HitsConfig, KatzCentrality,
    KatzCentralityConfig, PageRank, PageRankConfig, degree_centrality,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;

#[derive(Clone, Debug)]
struct AlgoBenchConfig {
    nodes: usize,
    edges_per_node: usize,
}

impl AlgoBenchConfig {
    fn from_env() -> Self {
        let nodes = env::var("BENCH_NODES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);
        let edges_per_node = env::var("BENCH_EDGES_PER_NODE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        Self {
            nodes,
            edges_per_node,
        }
    }

    fn label(&self) -> String {
        format!("{}n_{}deg", self.nodes, self.edges_per_node)
    }
}

fn random_graph(config: &AlgoBenchConfig, directed: bool) -> Graph<u32> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut b = if directed {
        GraphBuilder::directed()
    } else {
        GraphBuilder::undirected()
    };
    let n = config.nodes as u32;
    b.add_nodes(0..n);
    for src in 0..n {
        for _ in 0..config.edges_per_node {
            b.add_edge(src, rng.gen_range(0..n));
        }
    }
    b.build().unwrap()
}

fn bench_power_iteration(c: &mut Criterion) {
    let config = AlgoBenchConfig::from_env();
    let directed = random_graph(&config, true);
    let undirected = random_graph(&config, false);
    let label = config.label();

    let mut group = c.benchmark_group("power_iteration");
    group.bench_with_input(BenchmarkId::new("pagerank", &label), &directed, |b, g| {
        b.iter(|| PageRank::run(g, PageRankConfig::default()).unwrap())
    });
    group.bench_with_input(BenchmarkId::new("katz", &label), &directed, |b, g| {
        let config = KatzCentralityConfig {
            alpha: 0.01,
            ..Default::default()
        };
        b.iter(|| KatzCentrality::run(g, config.clone()).unwrap())
    });
    group.bench_with_input(BenchmarkId::new("eigenvector", &label), &undirected, |b, g| {
        b.iter(|| EigenvectorCentrality::run(g, EigenvectorCentralityConfig::default()).unwrap())
    });
    group.bench_with_input(BenchmarkId::new("hits", &label), &directed, |b, g| {
        b.iter(|| Hits::run(g, HitsConfig::default()).unwrap())
    });
    group.finish();
}

fn bench_shortest_paths(c: &mut Criterion) {
    let config = AlgoBenchConfig::from_env();
    let graph = random_graph(&config, false);
    let label = config.label();

    let mut group = c.benchmark_group("shortest_paths");
    group.sample_size(10);
    group.bench_with_input(BenchmarkId::new("closeness", &label), &graph, |b, g| {
        b.iter(|| Closeness::run(g, ClosenessConfig::default()).unwrap())
    });
    group.bench_with_input(BenchmarkId::new("betweenness", &label), &graph, |b, g| {
        b.iter(|| Betweenness::run(g, BetweennessConfig::default()).unwrap())
    });
    group.bench_with_input(BenchmarkId::new("betweenness_sampled", &label), &graph, |b, g| {
        let config = BetweennessConfig {
            sample_size: Some(g.node_count().min(64)),
            seed: Some(1),
            ..Default::default()
        };
        b.iter(|| Betweenness::run(g, config.clone()).unwrap())
    });
    group.finish();
}

fn bench_degree(c: &mut Criterion) {
    let config = AlgoBenchConfig::from_env();
    let graph = random_graph(&config, true);
    c.bench_function(&format!("degree_{}", config.label()), |b| {
        b.iter(|| degree_centrality(&graph).unwrap())
    });
}

criterion_group!(benches, bench_power_iteration, bench_shortest_paths, bench_degree);
criterion_main!(benches);
