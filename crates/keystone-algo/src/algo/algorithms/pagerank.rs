// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! PageRank Centrality Algorithm.

use crate::algo::algorithms::Algorithm;
use crate::algo::power_iteration::{IterationConfig, Normalization, PowerIteration, UpdateRule};
use fxhash::FxHashMap;
use keystone_common::{CentralityError, Graph, NodeId, Result, Scores};
use rayon::prelude::*;

pub struct PageRank;

#[derive(Debug, Clone)]
pub struct PageRankConfig<N: NodeId> {
    pub damping_factor: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Divide by out-strength instead of out-degree.
    pub weighted: bool,
    /// Teleport distribution. Missing nodes get 0; uniform when `None`.
    pub personalization: Option<FxHashMap<N, f64>>,
    /// Where dangling nodes send their rank. Defaults to the teleport distribution.
    pub dangling: Option<FxHashMap<N, f64>>,
}

impl<N: NodeId> Default for PageRankConfig<N> {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 1000,
            tolerance: 1e-6,
            weighted: true,
            personalization: None,
            dangling: None,
        }
    }
}

pub struct PageRankResult<N: NodeId> {
    pub scores: Scores<N>,
    pub iterations: usize,
}

struct PageRankRule<'g, N: NodeId> {
    graph: &'g Graph<N>,
    damping: f64,
    weighted: bool,
    /// 1 / W(m), or 0 for dangling nodes.
    inv_strength: Vec<f64>,
    dangling_nodes: Vec<u32>,
    teleport: Vec<f64>,
    dangling_dist: Vec<f64>,
}

impl<N: NodeId> UpdateRule for PageRankRule<'_, N> {
    fn name(&self) -> &'static str {
        "pagerank"
    }

    fn apply(&self, prev: &[f64], next: &mut [f64]) {
        let d = self.damping;
        let dangling_mass = self
            .dangling_nodes
            .iter()
            .fold(0.0, |acc, &u| acc + prev[u as usize]);

        next.par_iter_mut().enumerate().for_each(|(v, score)| {
            let slot = v as u32;
            let neighbors = self.graph.in_slots(slot);
            let sum = if self.weighted {
                neighbors
                    .iter()
                    .zip(self.graph.in_weights(slot))
                    .fold(0.0, |acc, (&u, &w)| {
                        acc + prev[u as usize] * w * self.inv_strength[u as usize]
                    })
            } else {
                neighbors
                    .iter()
                    .fold(0.0, |acc, &u| acc + prev[u as usize] * self.inv_strength[u as usize])
            };
            *score = d * sum
                + d * dangling_mass * self.dangling_dist[v]
                + (1.0 - d) * self.teleport[v];
        });
    }
}

impl<N: NodeId> Algorithm<N> for PageRank {
    type Config = PageRankConfig<N>;
    type Output = PageRankResult<N>;

    fn name() -> &'static str {
        "pagerank"
    }

    fn run(graph: &Graph<N>, config: Self::Config) -> Result<Self::Output> {
        if !graph.is_directed() {
            return Err(CentralityError::invalid_graph(
                "pagerank requires a directed graph",
            ));
        }
        let n = graph.node_count();
        if n == 0 {
            return Err(CentralityError::invalid_graph("pagerank of an empty graph"));
        }
        let d = config.damping_factor;
        if !(0.0..=1.0).contains(&d) {
            return Err(CentralityError::invalid_argument(
                "damping_factor",
                format!("must lie in [0, 1], got {d}"),
            ));
        }

        let teleport = distribution(graph, config.personalization.as_ref(), "personalization")?;
        let dangling_dist = match &config.dangling {
            Some(_) => distribution(graph, config.dangling.as_ref(), "dangling")?,
            None => teleport.clone(),
        };

        let mut inv_strength = vec![0.0; n];
        let mut dangling_nodes = Vec::new();
        for slot in 0..n as u32 {
            let strength = if config.weighted {
                let weights = graph.out_weights(slot);
                if let Some((&dst, &w)) = graph
                    .out_slots(slot)
                    .iter()
                    .zip(weights)
                    .find(|(_, w)| **w < 0.0)
                {
                    return Err(CentralityError::NegativeWeight {
                        src: format!("{:?}", graph.node_at(slot)),
                        dst: format!("{:?}", graph.node_at(dst)),
                        weight: w,
                    });
                }
                weights.iter().sum::<f64>()
            } else {
                graph.out_degree(slot) as f64
            };
            if strength > 0.0 {
                inv_strength[slot as usize] = 1.0 / strength;
            } else {
                dangling_nodes.push(slot);
            }
        }

        let rule = PageRankRule {
            graph,
            damping: d,
            weighted: config.weighted,
            inv_strength,
            dangling_nodes,
            teleport,
            dangling_dist,
        };
        let engine = PowerIteration::new(IterationConfig {
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            normalization: Normalization::L1,
        });
        let converged = engine.run(&rule, n)?;

        Ok(PageRankResult {
            scores: graph.label(converged.vector),
            iterations: converged.iterations,
        })
    }
}

/// Slot-ordered probability vector from an optional node map.
fn distribution<N: NodeId>(
    graph: &Graph<N>,
    map: Option<&FxHashMap<N, f64>>,
    arg: &'static str,
) -> Result<Vec<f64>> {
    let n = graph.node_count();
    let Some(map) = map else {
        return Ok(vec![1.0 / n as f64; n]);
    };

    let mut values = vec![0.0; n];
    for (node, &value) in map {
        if !(value.is_finite() && value >= 0.0) {
            return Err(CentralityError::invalid_argument(
                arg,
                format!("value for {node:?} must be finite and non-negative, got {value}"),
            ));
        }
        if let Some(slot) = graph.to_slot(node) {
            values[slot as usize] = value;
        }
    }
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return Err(CentralityError::invalid_argument(
            arg,
            "must give positive weight to at least one node of the graph",
        ));
    }
    for v in values.iter_mut() {
        *v /= total;
    }
    Ok(values)
}
