// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Betweenness Centrality Algorithm (Brandes').

use crate::algo::algorithms::Algorithm;
use crate::algo::shortest_paths::{ShortestPathAccumulator, ShortestPathTree, TraversalDirection};
use keystone_common::{CentralityError, Graph, NodeId, Result, Scores};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub struct Betweenness;

#[derive(Debug, Clone)]
pub struct BetweennessConfig {
    pub normalized: bool,
    /// Count the path endpoints as lying on the path.
    pub endpoints: bool,
    pub weighted: bool,
    /// Number of sampled sources. If None, exact computation (all nodes).
    pub sample_size: Option<usize>,
    /// Seed for source sampling; drawn from the OS when `None`.
    pub seed: Option<u64>,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            normalized: true,
            endpoints: false,
            weighted: true,
            sample_size: None,
            seed: None,
        }
    }
}

impl<N: NodeId> Algorithm<N> for Betweenness {
    type Config = BetweennessConfig;
    type Output = Scores<N>;

    fn name() -> &'static str {
        "betweenness"
    }

    fn run(graph: &Graph<N>, config: Self::Config) -> Result<Self::Output> {
        let n = graph.node_count();
        if n == 0 {
            return Err(CentralityError::invalid_graph(
                "betweenness centrality of an empty graph",
            ));
        }

        let sources = select_sources(n, config.sample_size, config.seed)?;
        let paths =
            ShortestPathAccumulator::new(graph, config.weighted, TraversalDirection::Outgoing)?;

        let endpoints = config.endpoints;
        let mut scores = paths.accumulate(&sources, |tree, acc| {
            add_dependencies(tree, endpoints, acc);
        });

        if let Some(scale) = rescale_factor(n, sources.len(), graph.is_directed(), &config) {
            for score in scores.iter_mut() {
                *score *= scale;
            }
        }
        log::debug!(
            "betweenness: {} sources over {} nodes (weighted: {})",
            sources.len(),
            n,
            paths.is_weighted()
        );

        Ok(graph.label(scores))
    }
}

fn select_sources(n: usize, sample_size: Option<usize>, seed: Option<u64>) -> Result<Vec<u32>> {
    let mut sources: Vec<u32> = (0..n as u32).collect();
    let Some(k) = sample_size else {
        return Ok(sources);
    };
    if k == 0 || k > n {
        return Err(CentralityError::invalid_argument(
            "sample_size",
            format!("must lie in 1..={n}, got {k}"),
        ));
    }
    if k < n {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        sources.shuffle(&mut rng);
        sources.truncate(k);
        sources.sort_unstable();
    }
    Ok(sources)
}

fn add_dependencies(tree: &ShortestPathTree, endpoints: bool, acc: &mut [f64]) {
    let delta = tree.dependencies();
    let s = tree.source;
    if endpoints {
        acc[s as usize] += (tree.reached() - 1) as f64;
    }
    for &w in &tree.order {
        if w != s {
            acc[w as usize] += if endpoints {
                delta[w as usize] + 1.0
            } else {
                delta[w as usize]
            };
        }
    }
}

/// Undirected pairs are seen from both ends, so raw undirected sums are
/// halved. Normalizing by the ordered pair count covers both kinds.
fn rescale_factor(n: usize, k: usize, directed: bool, config: &BetweennessConfig) -> Option<f64> {
    let scale = if config.normalized {
        let pairs = if config.endpoints {
            n * n.saturating_sub(1)
        } else {
            n.saturating_sub(1) * n.saturating_sub(2)
        };
        (pairs > 0).then(|| 1.0 / pairs as f64)
    } else if directed {
        None
    } else {
        Some(0.5)
    };

    if k < n {
        Some(scale.unwrap_or(1.0) * n as f64 / k as f64)
    } else {
        scale
    }
}
