// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Eigenvector Centrality Algorithm.
//!
//! Measures the influence of a node in a network: a node is important when
//! its in-neighbors are important. Uses power iteration on `A^T + I`; the
//! identity shift has the same dominant eigenvector as `A^T` but keeps
//! bipartite graphs from oscillating.
//!
//! On a disconnected graph the vector is only well defined when one
//! component holds the dominant eigenvalue; a tie between components fails
//! with `NonConvergence::Degenerate` instead of returning a start-dependent
//! mix.

use crate::algo::algorithms::Algorithm;
use crate::algo::power_iteration::{
    IterationConfig, Normalization, PowerIteration, UpdateRule, ensure_unique_limit, pull_sum,
};
use keystone_common::{CentralityError, Graph, NodeId, NonConvergence, Result, Scores};
use rayon::prelude::*;

pub struct EigenvectorCentrality;

#[derive(Debug, Clone)]
pub struct EigenvectorCentralityConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Use edge weights as adjacency values.
    pub weighted: bool,
}

impl Default for EigenvectorCentralityConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            weighted: true,
        }
    }
}

#[derive(Debug)]
pub struct EigenvectorCentralityResult<N: NodeId> {
    pub scores: Scores<N>,
    pub iterations: usize,
}

struct EigenvectorRule<'g, N: NodeId> {
    graph: &'g Graph<N>,
    weighted: bool,
}

impl<N: NodeId> UpdateRule for EigenvectorRule<'_, N> {
    fn name(&self) -> &'static str {
        "eigenvector_centrality"
    }

    fn apply(&self, prev: &[f64], next: &mut [f64]) {
        next.par_iter_mut().enumerate().for_each(|(v, x)| {
            *x = prev[v] + pull_sum(self.graph, v as u32, prev, self.weighted);
        });
    }
}

impl<N: NodeId> Algorithm<N> for EigenvectorCentrality {
    type Config = EigenvectorCentralityConfig;
    type Output = EigenvectorCentralityResult<N>;

    fn name() -> &'static str {
        "eigenvector_centrality"
    }

    fn run(graph: &Graph<N>, config: Self::Config) -> Result<Self::Output> {
        let n = graph.node_count();
        if n == 0 {
            return Err(CentralityError::invalid_graph(
                "eigenvector centrality of an empty graph",
            ));
        }
        if graph.edge_count() == 0 {
            // The zero matrix has no dominant eigenvector.
            return Err(CentralityError::PowerIterationNotConverged {
                iterations: 0,
                delta: f64::INFINITY,
                reason: NonConvergence::ZeroNorm,
                last_iterate: vec![1.0 / (n as f64).sqrt(); n],
            });
        }

        let rule = EigenvectorRule {
            graph,
            weighted: config.weighted,
        };
        let engine = PowerIteration::new(IterationConfig {
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            normalization: Normalization::L2,
        });
        let converged = engine.run(&rule, n)?;
        let converged = ensure_unique_limit(graph, &rule, converged, config.tolerance)?;

        Ok(EigenvectorCentralityResult {
            scores: graph.label(converged.vector),
            iterations: converged.iterations,
        })
    }
}
