// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! HITS (Hyperlink-Induced Topic Search).
//!
//! A good hub points at good authorities and a good authority is pointed at
//! by good hubs. Each round computes authorities from the previous hubs and
//! then hubs from the fresh authorities; both vectors are L2-normalized.
//! Disconnected graphs whose components tie for the dominant eigenvalue
//! fail with `NonConvergence::Degenerate`.

use crate::algo::algorithms::Algorithm;
use crate::algo::power_iteration::{
    IterationConfig, Normalization, PowerIteration, UpdateRule, ensure_unique_limit, pull_sum,
    push_sum,
};
use keystone_common::{CentralityError, Graph, NodeId, Result, Scores};
use rayon::prelude::*;

pub struct Hits;

#[derive(Debug, Clone)]
pub struct HitsConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub weighted: bool,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
            weighted: true,
        }
    }
}

#[derive(Debug)]
pub struct HitsResult<N: NodeId> {
    pub hubs: Scores<N>,
    pub authorities: Scores<N>,
    pub iterations: usize,
}

/// State layout: `[hubs | authorities]`.
struct HitsRule<'g, N: NodeId> {
    graph: &'g Graph<N>,
    weighted: bool,
}

impl<N: NodeId> UpdateRule for HitsRule<'_, N> {
    fn name(&self) -> &'static str {
        "hits"
    }

    fn blocks(&self) -> usize {
        2
    }

    fn apply(&self, prev: &[f64], next: &mut [f64]) {
        let n = self.graph.node_count();
        let hub_prev = &prev[..n];
        let (hubs, authorities) = next.split_at_mut(n);

        authorities.par_iter_mut().enumerate().for_each(|(v, a)| {
            *a = pull_sum(self.graph, v as u32, hub_prev, self.weighted);
        });

        let fresh: &[f64] = authorities;
        hubs.par_iter_mut().enumerate().for_each(|(v, h)| {
            *h = push_sum(self.graph, v as u32, fresh, self.weighted);
        });
    }
}

impl<N: NodeId> Algorithm<N> for Hits {
    type Config = HitsConfig;
    type Output = HitsResult<N>;

    fn name() -> &'static str {
        "hits"
    }

    fn run(graph: &Graph<N>, config: Self::Config) -> Result<Self::Output> {
        let n = graph.node_count();
        if n == 0 {
            return Err(CentralityError::invalid_graph("hits of an empty graph"));
        }

        let rule = HitsRule {
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

        let mut hubs = converged.vector;
        let authorities = hubs.split_off(n);

        Ok(HitsResult {
            hubs: graph.label(hubs),
            authorities: graph.label(authorities),
            iterations: converged.iterations,
        })
    }
}
