// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Shortest-Path Accumulator (Brandes).
//!
//! One single-source traversal per source node, recording distances, the
//! number of shortest paths σ, shortest-path predecessors and the order in
//! which nodes were settled. Closeness reads only the distances; Betweenness
//! runs the reverse dependency pass on the same tree.
//!
//! Unweighted graphs use BFS. Weighted graphs use Dijkstra, which requires
//! every weight to be non-negative.

use keystone_common::{CentralityError, Graph, NodeId, Result};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// Sources handed to one rayon task by `accumulate`.
const SOURCE_CHUNK: usize = 32;

/// Which adjacency a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalDirection {
    /// Follow edges source -> target.
    #[default]
    Outgoing,
    /// Follow edges target -> source (traverse the reversed graph).
    Incoming,
}

/// Single-source shortest-path DAG.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub source: u32,
    /// Reached nodes in non-decreasing distance order, source first.
    pub order: Vec<u32>,
    /// Distance from the source; `INFINITY` when unreachable.
    pub dist: Vec<f64>,
    /// Number of distinct shortest paths from the source.
    pub sigma: Vec<f64>,
    /// Predecessors on some shortest path.
    pub preds: Vec<Vec<u32>>,
}

impl ShortestPathTree {
    /// Reached node count, source included.
    #[inline]
    pub fn reached(&self) -> usize {
        self.order.len()
    }

    /// Sum of distances to every reached node.
    pub fn total_distance(&self) -> f64 {
        self.order.iter().map(|&v| self.dist[v as usize]).sum()
    }

    /// Reverse accumulation pass.
    ///
    /// `δ(v) = Σ_{w : v ∈ pred(w)} σ(v) / σ(w) · (1 + δ(w))`
    pub fn dependencies(&self) -> Vec<f64> {
        let mut delta = vec![0.0; self.dist.len()];
        for &w in self.order.iter().rev() {
            let w = w as usize;
            let coeff = (1.0 + delta[w]) / self.sigma[w];
            for &v in &self.preds[w] {
                delta[v as usize] += self.sigma[v as usize] * coeff;
            }
        }
        delta
    }
}

pub struct ShortestPathAccumulator<'g, N: NodeId> {
    graph: &'g Graph<N>,
    weighted: bool,
    direction: TraversalDirection,
}

impl<'g, N: NodeId> ShortestPathAccumulator<'g, N> {
    /// Prepare traversals over `graph`.
    ///
    /// With `weighted` set and a weighted graph, traversals use Dijkstra and
    /// any negative weight fails with `NegativeWeight`.
    pub fn new(graph: &'g Graph<N>, weighted: bool, direction: TraversalDirection) -> Result<Self> {
        let weighted = weighted && graph.is_weighted();
        if weighted
            && let Some((src, dst, weight)) = graph.edges().find(|(_, _, w)| *w < 0.0)
        {
            return Err(CentralityError::NegativeWeight {
                src: format!("{src:?}"),
                dst: format!("{dst:?}"),
                weight,
            });
        }
        Ok(Self {
            graph,
            weighted,
            direction,
        })
    }

    /// Whether traversals run Dijkstra rather than BFS.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    #[inline]
    fn adjacency(&self, slot: u32) -> (&'g [u32], &'g [f64]) {
        match self.direction {
            TraversalDirection::Outgoing => {
                (self.graph.out_slots(slot), self.graph.out_weights(slot))
            }
            TraversalDirection::Incoming => {
                (self.graph.in_slots(slot), self.graph.in_weights(slot))
            }
        }
    }

    /// Shortest-path tree rooted at `source`.
    pub fn tree(&self, source: u32) -> ShortestPathTree {
        if self.weighted {
            self.dijkstra(source)
        } else {
            self.bfs(source)
        }
    }

    fn bfs(&self, source: u32) -> ShortestPathTree {
        let n = self.graph.node_count();
        let mut order = Vec::with_capacity(n);
        let mut q = VecDeque::with_capacity(n);
        let mut dist = vec![f64::INFINITY; n];
        let mut sigma = vec![0.0; n];
        let mut preds: Vec<Vec<u32>> = vec![Vec::new(); n];

        dist[source as usize] = 0.0;
        sigma[source as usize] = 1.0;
        q.push_back(source);

        while let Some(v) = q.pop_front() {
            order.push(v);
            let next_dist = dist[v as usize] + 1.0;

            let (neighbors, _) = self.adjacency(v);
            for &w in neighbors {
                // Path discovery
                if dist[w as usize].is_infinite() {
                    dist[w as usize] = next_dist;
                    q.push_back(w);
                }
                // Path counting
                if dist[w as usize] == next_dist {
                    sigma[w as usize] += sigma[v as usize];
                    preds[w as usize].push(v);
                }
            }
        }

        ShortestPathTree {
            source,
            order,
            dist,
            sigma,
            preds,
        }
    }

    fn dijkstra(&self, source: u32) -> ShortestPathTree {
        let n = self.graph.node_count();
        let mut order = Vec::with_capacity(n);
        let mut dist = vec![f64::INFINITY; n];
        let mut sigma = vec![0.0; n];
        let mut preds: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();
        // Insertion counter: equal distances pop in discovery order.
        let mut seq = 0u64;

        dist[source as usize] = 0.0;
        sigma[source as usize] = 1.0;
        heap.push(Reverse((0.0f64.to_bits(), seq, source)));

        while let Some(Reverse((d_bits, _, v))) = heap.pop() {
            let d = f64::from_bits(d_bits);
            if settled[v as usize] || d > dist[v as usize] {
                continue;
            }
            settled[v as usize] = true;
            order.push(v);

            let (neighbors, weights) = self.adjacency(v);
            for (&w, &weight) in neighbors.iter().zip(weights) {
                if settled[w as usize] {
                    continue;
                }
                let new_dist = d + weight;
                if new_dist < dist[w as usize] {
                    dist[w as usize] = new_dist;
                    sigma[w as usize] = sigma[v as usize];
                    preds[w as usize].clear();
                    preds[w as usize].push(v);
                    seq += 1;
                    heap.push(Reverse((new_dist.to_bits(), seq, w)));
                } else if new_dist == dist[w as usize] {
                    sigma[w as usize] += sigma[v as usize];
                    preds[w as usize].push(v);
                }
            }
        }

        ShortestPathTree {
            source,
            order,
            dist,
            sigma,
            preds,
        }
    }

    /// Run `f` on the tree of every source, in parallel. Output order
    /// follows `sources`.
    pub fn map_sources<T, F>(&self, sources: &[u32], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&ShortestPathTree) -> T + Sync + Send,
    {
        sources.par_iter().map(|&s| f(&self.tree(s))).collect()
    }

    /// Sum per-node contributions over all sources.
    ///
    /// `f` adds the contribution of one source tree into an accumulator of
    /// `node_count()` values. Sources are processed in parallel chunks and
    /// the partial sums are added in chunk order, so the result does not
    /// depend on thread scheduling.
    pub fn accumulate<F>(&self, sources: &[u32], f: F) -> Vec<f64>
    where
        F: Fn(&ShortestPathTree, &mut [f64]) + Sync + Send,
    {
        let n = self.graph.node_count();
        let partials: Vec<Vec<f64>> = sources
            .par_chunks(SOURCE_CHUNK)
            .map(|chunk| {
                let mut acc = vec![0.0; n];
                for &s in chunk {
                    f(&self.tree(s), &mut acc);
                }
                acc
            })
            .collect();

        let mut total = vec![0.0; n];
        for partial in partials {
            for (x, y) in total.iter_mut().zip(partial) {
                *x += y;
            }
        }
        total
    }
}
