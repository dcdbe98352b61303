// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Katz Centrality Algorithm.
//!
//! Measures influence by taking into account the total number of walks
//! between nodes, attenuated by `alpha` per hop:
//! x = alpha * A^T * x + beta.
//!
//! The base term `beta` gives every node, including nodes without incoming
//! edges, a non-zero floor. The iteration only converges when
//! `alpha < 1 / lambda_max`; choosing such an `alpha` is up to the caller.

use crate::algo::algorithms::Algorithm;
use crate::algo::power_iteration::{
    IterationConfig, Normalization, PowerIteration, UpdateRule, pull_sum,
};
use fxhash::FxHashMap;
use keystone_common::{CentralityError, Graph, NodeId, NonConvergence, Result, Scores};
use rayon::prelude::*;

pub struct KatzCentrality;

#[derive(Debug, Clone)]
pub struct KatzCentralityConfig<N: NodeId> {
    pub alpha: f64,
    pub beta: f64,
    /// Per-node base centrality; nodes not listed use `beta`.
    pub node_beta: Option<FxHashMap<N, f64>>,
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Scale the result to unit L2 norm.
    pub normalized: bool,
    pub weighted: bool,
}

impl<N: NodeId> Default for KatzCentralityConfig<N> {
    fn default() -> Self {
        Self {
            alpha: 0.1, // Should be < 1/lambda_max
            beta: 1.0,
            node_beta: None,
            max_iterations: 1000,
            tolerance: 1e-6,
            normalized: true,
            weighted: true,
        }
    }
}

#[derive(Debug)]
pub struct KatzCentralityResult<N: NodeId> {
    pub scores: Scores<N>,
    pub iterations: usize,
}

struct KatzRule<'g, N: NodeId> {
    graph: &'g Graph<N>,
    alpha: f64,
    beta: Vec<f64>,
    weighted: bool,
}

impl<N: NodeId> UpdateRule for KatzRule<'_, N> {
    fn name(&self) -> &'static str {
        "katz_centrality"
    }

    fn apply(&self, prev: &[f64], next: &mut [f64]) {
        next.par_iter_mut().enumerate().for_each(|(v, x)| {
            *x = self.alpha * pull_sum(self.graph, v as u32, prev, self.weighted) + self.beta[v];
        });
    }
}

impl<N: NodeId> Algorithm<N> for KatzCentrality {
    type Config = KatzCentralityConfig<N>;
    type Output = KatzCentralityResult<N>;

    fn name() -> &'static str {
        "katz_centrality"
    }

    fn run(graph: &Graph<N>, config: Self::Config) -> Result<Self::Output> {
        let n = graph.node_count();
        if n == 0 {
            return Err(CentralityError::invalid_graph(
                "katz centrality of an empty graph",
            ));
        }
        if !config.alpha.is_finite() {
            return Err(CentralityError::invalid_argument(
                "alpha",
                "must be finite",
            ));
        }

        let mut beta = vec![config.beta; n];
        if let Some(overrides) = &config.node_beta {
            for (node, &b) in overrides {
                if let Some(slot) = graph.to_slot(node) {
                    beta[slot as usize] = b;
                }
            }
        }
        if beta.iter().any(|b| !b.is_finite()) {
            return Err(CentralityError::invalid_argument(
                "beta",
                "must be finite",
            ));
        }

        let rule = KatzRule {
            graph,
            alpha: config.alpha,
            beta,
            weighted: config.weighted,
        };
        // The fixed point is not scale-free, so the iterate is left
        // unnormalized and only the converged vector is rescaled.
        let engine = PowerIteration::new(IterationConfig {
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            normalization: Normalization::None,
        });
        let converged = engine.run(&rule, n)?;
        let mut scores = converged.vector;

        if config.normalized {
            let norm = scores.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm == 0.0 {
                return Err(CentralityError::PowerIterationNotConverged {
                    iterations: converged.iterations,
                    delta: converged.delta,
                    reason: NonConvergence::ZeroNorm,
                    last_iterate: scores,
                });
            }
            for x in scores.iter_mut() {
                *x /= norm;
            }
        }

        Ok(KatzCentralityResult {
            scores: graph.label(scores),
            iterations: converged.iterations,
        })
    }
}
