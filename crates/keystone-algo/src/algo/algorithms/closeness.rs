// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Closeness Centrality Algorithm.

use crate::algo::algorithms::Algorithm;
use crate::algo::shortest_paths::{ShortestPathAccumulator, ShortestPathTree, TraversalDirection};
use keystone_common::{CentralityError, Graph, NodeId, Result, Scores};

pub struct Closeness;

#[derive(Debug, Clone)]
pub struct ClosenessConfig {
    /// Wasserman-Faust scaling by the reached fraction, for disconnected graphs.
    pub wf_improved: bool,
    /// `Outgoing` measures distances from the node, `Incoming` distances to it.
    pub direction: TraversalDirection,
    pub weighted: bool,
}

impl Default for ClosenessConfig {
    fn default() -> Self {
        Self {
            wf_improved: true,
            direction: TraversalDirection::Outgoing,
            weighted: true,
        }
    }
}

impl<N: NodeId> Algorithm<N> for Closeness {
    type Config = ClosenessConfig;
    type Output = Scores<N>;

    fn name() -> &'static str {
        "closeness"
    }

    fn run(graph: &Graph<N>, config: Self::Config) -> Result<Self::Output> {
        let n = graph.node_count();
        if n == 0 {
            return Err(CentralityError::invalid_graph(
                "closeness centrality of an empty graph",
            ));
        }

        let paths = ShortestPathAccumulator::new(graph, config.weighted, config.direction)?;
        let sources: Vec<u32> = (0..n as u32).collect();
        let scores = paths.map_sources(&sources, |tree| score(tree, n, config.wf_improved));

        Ok(graph.label(scores))
    }
}

fn score(tree: &ShortestPathTree, n: usize, wf_improved: bool) -> f64 {
    let total = tree.total_distance();
    if total <= 0.0 || n <= 1 {
        return 0.0;
    }
    // Other nodes reached from the source.
    let others = (tree.reached() - 1) as f64;
    let closeness = others / total;
    if wf_improved {
        closeness * others / (n - 1) as f64
    } else {
        closeness
    }
}
