// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use keystone_algo::{
    Algorithm, Betweenness, BetweennessConfig, Closeness, ClosenessConfig, Graph, GraphBuilder,
    Hits, HitsConfig, KatzCentrality, KatzCentralityConfig, PageRank, PageRankConfig,
    degree_centrality,
};
use proptest::prelude::*;

const MAX_NODES: usize = 20;

fn edge_list_strategy() -> impl Strategy<Value = (usize, Vec<(u32, u32)>)> {
    (2..MAX_NODES).prop_flat_map(|n| {
        let node = 0..n as u32;
        (Just(n), prop::collection::vec((node.clone(), node), 0..60))
    })
}

fn build(n: usize, edges: &[(u32, u32)], directed: bool) -> Graph<u32> {
    let mut b = if directed {
        GraphBuilder::directed()
    } else {
        GraphBuilder::undirected()
    };
    b.add_nodes(0..n as u32).add_edges(edges.iter().copied());
    b.build().expect("finite weights")
}

fn l2(values: &[f64]) -> f64 {
    values.iter().map(|x| x * x).sum::<f64>().sqrt()
}

// ----------------------------------------------------------------------------
// Power iteration
// ----------------------------------------------------------------------------

proptest! {
    #[test]
    fn pagerank_sums_to_one((n, edges) in edge_list_strategy()) {
        let g = build(n, &edges, true);
        let result = PageRank::run(&g, PageRankConfig::default()).unwrap();
        prop_assert!((result.scores.sum() - 1.0).abs() < 1e-9);
        prop_assert!(result.scores.values().iter().all(|&s| s > 0.0));
    }

    #[test]
    fn hits_blocks_have_unit_norm((n, edges) in edge_list_strategy()) {
        prop_assume!(!edges.is_empty());
        let g = build(n, &edges, true);
        match Hits::run(&g, HitsConfig::default()) {
            Ok(result) => {
                prop_assert!((l2(result.hubs.values()) - 1.0).abs() < 1e-9);
                prop_assert!((l2(result.authorities.values()) - 1.0).abs() < 1e-9);
            }
            Err(e) => prop_assert!(e.is_not_converged(), "unexpected error: {}", e),
        }
    }

    #[test]
    fn katz_is_strictly_positive((n, edges) in edge_list_strategy()) {
        // In-degree stays below MAX_NODES, so 0.04 is under 1 / lambda_max.
        let g = build(n, &edges, true);
        let config = KatzCentralityConfig {
            alpha: 0.04,
            ..Default::default()
        };
        let result = KatzCentrality::run(&g, config).unwrap();
        prop_assert!(result.scores.values().iter().all(|&s| s > 0.0));
        prop_assert!((l2(result.scores.values()) - 1.0).abs() < 1e-9);
    }
}

// ----------------------------------------------------------------------------
// Degree and shortest paths
// ----------------------------------------------------------------------------

proptest! {
    #[test]
    fn degree_sum_matches_edge_count((n, edges) in edge_list_strategy()) {
        let g = build(n, &edges, false);
        let scores = degree_centrality(&g).unwrap();
        let expected = 2.0 * g.edge_count() as f64 / (n - 1) as f64;
        prop_assert!((scores.sum() - expected).abs() < 1e-9);
    }

    #[test]
    fn closeness_is_bounded((n, edges) in edge_list_strategy()) {
        let g = build(n, &edges, false);
        let scores = Closeness::run(&g, ClosenessConfig::default()).unwrap();
        for (_, s) in scores.iter() {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&s));
        }
    }

    #[test]
    fn betweenness_ignores_isolated_nodes(
        (n, edges) in edge_list_strategy(),
        directed in any::<bool>(),
    ) {
        let mut b = if directed {
            GraphBuilder::directed()
        } else {
            GraphBuilder::undirected()
        };
        b.add_nodes(0..n as u32).add_edges(edges.iter().copied()).add_node(MAX_NODES as u32);
        let g = b.build().unwrap();

        let scores = Betweenness::run(&g, BetweennessConfig::default()).unwrap();
        prop_assert_eq!(scores[&(MAX_NODES as u32)], 0.0);
        for (_, s) in scores.iter() {
            prop_assert!((0.0..=1.0 + 1e-9).contains(&s));
        }
    }

    #[test]
    fn betweenness_is_deterministic((n, edges) in edge_list_strategy()) {
        let g = build(n, &edges, false);
        let a = Betweenness::run(&g, BetweennessConfig::default()).unwrap();
        let b = Betweenness::run(&g, BetweennessConfig::default()).unwrap();
        prop_assert_eq!(a.values(), b.values());
    }
}
