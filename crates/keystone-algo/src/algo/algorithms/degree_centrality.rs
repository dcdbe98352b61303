// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Degree Centrality Algorithm.
//!
//! Fraction of the other nodes a node is adjacent to: `degree / (N - 1)`.
//! Directed graphs can count incoming, outgoing, or both kinds of edges.

use crate::algo::algorithms::Algorithm;
use keystone_common::{CentralityError, Graph, GraphKind, NodeId, Result, Scores};

pub struct DegreeCentrality;

#[derive(Debug, Clone)]
pub struct DegreeCentralityConfig {
    /// Ignored for undirected graphs, where every edge is incident both ways.
    pub direction: DegreeDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeDirection {
    Incoming,
    Outgoing,
    Both,
}

impl Default for DegreeCentralityConfig {
    fn default() -> Self {
        Self {
            direction: DegreeDirection::Both,
        }
    }
}

impl<N: NodeId> Algorithm<N> for DegreeCentrality {
    type Config = DegreeCentralityConfig;
    type Output = Scores<N>;

    fn name() -> &'static str {
        "degree_centrality"
    }

    fn run(graph: &Graph<N>, config: Self::Config) -> Result<Self::Output> {
        let n = graph.node_count();
        if n == 0 {
            return Err(CentralityError::invalid_graph(
                "degree centrality of an empty graph",
            ));
        }

        // A single node has nobody to be adjacent to.
        let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };

        let scores = (0..n as u32)
            .map(|slot| {
                let degree = match (graph.kind(), config.direction) {
                    (GraphKind::Undirected, _) => graph.out_degree(slot) + graph.self_loops(slot),
                    (GraphKind::Directed, DegreeDirection::Outgoing) => graph.out_degree(slot),
                    (GraphKind::Directed, DegreeDirection::Incoming) => graph.in_degree(slot),
                    (GraphKind::Directed, DegreeDirection::Both) => {
                        graph.out_degree(slot) + graph.in_degree(slot)
                    }
                };
                degree as f64 * scale
            })
            .collect();

        Ok(graph.label(scores))
    }
}

/// Degree centrality: total degree for directed graphs.
pub fn degree_centrality<N: NodeId>(graph: &Graph<N>) -> Result<Scores<N>> {
    DegreeCentrality::run(graph, DegreeCentralityConfig::default())
}

pub fn in_degree_centrality<N: NodeId>(graph: &Graph<N>) -> Result<Scores<N>> {
    DegreeCentrality::run(
        graph,
        DegreeCentralityConfig {
            direction: DegreeDirection::Incoming,
        },
    )
}

pub fn out_degree_centrality<N: NodeId>(graph: &Graph<N>) -> Result<Scores<N>> {
    DegreeCentrality::run(
        graph,
        DegreeCentralityConfig {
            direction: DegreeDirection::Outgoing,
        },
    )
}
