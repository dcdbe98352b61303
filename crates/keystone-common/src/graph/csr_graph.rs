// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Immutable CSR graph read by the centrality algorithms.
//!
//! A `Graph` is built once through `GraphBuilder` and never changes afterwards.
//! It provides:
//! - Dense node indexing (0..N) for array-based algorithm state
//! - CSR adjacency for cache-friendly neighbor iteration, outbound and inbound
//! - Edge weights aligned with the CSR neighbor arrays
//! - O(1) edge weight lookup by endpoint pair

use crate::api::error::{CentralityError, Result};
use crate::core::id_map::{IdMap, NodeId};
use crate::core::scores::Scores;
use fxhash::FxHashMap;
use std::sync::Arc;

/// Edge list for CSR construction: (source_slot, destination_slot, weight).
type WeightedEdgeList = Vec<(u32, u32, f64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphKind {
    Directed,
    Undirected,
}

/// Builder collecting nodes and edges before freezing them into a `Graph`.
///
/// Adding an edge that already exists replaces its weight. For undirected
/// graphs `{u, v}` and `{v, u}` are the same edge.
#[derive(Debug, Clone)]
pub struct GraphBuilder<N: NodeId> {
    kind: GraphKind,
    ids: IdMap<N>,
    edges: WeightedEdgeList,
    edge_index: FxHashMap<(u32, u32), usize>,
    weighted: bool,
}

impl<N: NodeId> GraphBuilder<N> {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            ids: IdMap::new(),
            edges: Vec::new(),
            edge_index: FxHashMap::default(),
            weighted: false,
        }
    }

    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    /// Add a node without edges. Re-adding a node is a no-op.
    pub fn add_node(&mut self, node: N) -> &mut Self {
        self.ids.insert(node);
        self
    }

    pub fn add_nodes<I: IntoIterator<Item = N>>(&mut self, nodes: I) -> &mut Self {
        for node in nodes {
            self.ids.insert(node);
        }
        self
    }

    /// Add an edge of weight 1.0. Endpoints are created if missing.
    pub fn add_edge(&mut self, src: N, dst: N) -> &mut Self {
        self.insert_edge(src, dst, 1.0);
        self
    }

    /// Add an edge with an explicit weight and mark the graph as weighted.
    pub fn add_weighted_edge(&mut self, src: N, dst: N, weight: f64) -> &mut Self {
        self.weighted = true;
        self.insert_edge(src, dst, weight);
        self
    }

    pub fn add_edges<I: IntoIterator<Item = (N, N)>>(&mut self, edges: I) -> &mut Self {
        for (src, dst) in edges {
            self.insert_edge(src, dst, 1.0);
        }
        self
    }

    pub fn add_weighted_edges<I: IntoIterator<Item = (N, N, f64)>>(
        &mut self,
        edges: I,
    ) -> &mut Self {
        self.weighted = true;
        for (src, dst, weight) in edges {
            self.insert_edge(src, dst, weight);
        }
        self
    }

    fn insert_edge(&mut self, src: N, dst: N, weight: f64) {
        let u = self.ids.insert(src);
        let v = self.ids.insert(dst);
        let key = edge_key(self.kind, u, v);
        match self.edge_index.get(&key) {
            Some(&idx) => self.edges[idx].2 = weight,
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push((u, v, weight));
            }
        }
    }

    /// Freeze into an immutable `Graph`.
    ///
    /// Fails with `InvalidGraph` if any weight is NaN or infinite.
    pub fn build(self) -> Result<Graph<N>> {
        if let Some(&(u, v, w)) = self.edges.iter().find(|(_, _, w)| !w.is_finite()) {
            return Err(CentralityError::invalid_graph(format!(
                "edge {:?} -> {:?} has non-finite weight {}",
                self.ids.to_node_unchecked(u),
                self.ids.to_node_unchecked(v),
                w
            )));
        }

        let n = self.ids.len();
        let mut self_loops = vec![0u32; n];
        for &(u, v, _) in &self.edges {
            if u == v {
                self_loops[u as usize] += 1;
            }
        }

        let (out_csr, in_csr) = match self.kind {
            GraphKind::Directed => {
                let reversed: WeightedEdgeList =
                    self.edges.iter().map(|&(u, v, w)| (v, u, w)).collect();
                (build_csr(n, &self.edges), Some(build_csr(n, &reversed)))
            }
            GraphKind::Undirected => {
                let mut both = Vec::with_capacity(self.edges.len() * 2);
                for &(u, v, w) in &self.edges {
                    both.push((u, v, w));
                    if u != v {
                        both.push((v, u, w));
                    }
                }
                (build_csr(n, &both), None)
            }
        };

        Ok(Graph {
            kind: self.kind,
            ids: Arc::new(self.ids),
            out_csr,
            in_csr,
            self_loops,
            edges: self.edges,
            edge_index: self.edge_index,
            weighted: self.weighted,
        })
    }
}

#[inline]
fn edge_key(kind: GraphKind, u: u32, v: u32) -> (u32, u32) {
    match kind {
        GraphKind::Directed => (u, v),
        GraphKind::Undirected => (u.min(v), u.max(v)),
    }
}

/// One direction of adjacency in CSR form.
#[derive(Debug, Clone)]
struct Csr {
    offsets: Vec<u32>,   // [N+1] slot -> edge start
    neighbors: Vec<u32>, // [E] neighbor slots
    weights: Vec<f64>,   // [E] aligned with neighbors
}

impl Csr {
    #[inline]
    fn range(&self, slot: u32) -> std::ops::Range<usize> {
        self.offsets[slot as usize] as usize..self.offsets[slot as usize + 1] as usize
    }
}

/// Build CSR from edge list. Neighbor order follows edge insertion order.
fn build_csr(vertex_count: usize, edges: &[(u32, u32, f64)]) -> Csr {
    // Count degrees
    let mut degrees = vec![0u32; vertex_count];
    for &(src, _, _) in edges {
        degrees[src as usize] += 1;
    }

    // Build offsets (prefix sum)
    let mut offsets = vec![0u32; vertex_count + 1];
    for i in 0..vertex_count {
        offsets[i + 1] = offsets[i] + degrees[i];
    }

    // Fill neighbors
    let mut neighbors = vec![0u32; edges.len()];
    let mut weights = vec![0.0; edges.len()];
    let mut current = offsets.clone();

    for &(src, dst, w) in edges {
        let idx = current[src as usize] as usize;
        neighbors[idx] = dst;
        weights[idx] = w;
        current[src as usize] += 1;
    }

    Csr {
        offsets,
        neighbors,
        weights,
    }
}

/// Immutable adjacency graph, directed or undirected.
///
/// Node-level accessors take caller identifiers. Slot-level accessors
/// (`out_slots`, `in_weights`, ...) take the dense index from `to_slot` and
/// are what the algorithms iterate over. For undirected graphs the inbound
/// and outbound views are the same neighbor lists.
#[derive(Debug, Clone)]
pub struct Graph<N: NodeId> {
    kind: GraphKind,
    ids: Arc<IdMap<N>>,
    out_csr: Csr,
    /// Inbound adjacency; `None` for undirected graphs.
    in_csr: Option<Csr>,
    self_loops: Vec<u32>,
    edges: WeightedEdgeList,
    edge_index: FxHashMap<(u32, u32), usize>,
    weighted: bool,
}

impl<N: NodeId> Graph<N> {
    #[inline]
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of distinct edges (an undirected edge counts once).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether any edge was added with an explicit weight.
    #[inline]
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Nodes in insertion order. Call again to restart.
    pub fn nodes(&self) -> std::slice::Iter<'_, N> {
        self.ids.nodes()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.ids.contains(node)
    }

    /// Shared node mapping, used to label score vectors.
    pub fn ids(&self) -> &Arc<IdMap<N>> {
        &self.ids
    }

    /// Edges as (source, target, weight) in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, f64)> + '_ {
        self.edges.iter().map(move |&(u, v, w)| {
            (
                self.ids.to_node_unchecked(u),
                self.ids.to_node_unchecked(v),
                w,
            )
        })
    }

    /// Out-neighbors of `node`. For undirected graphs, all neighbors.
    pub fn successors(&self, node: &N) -> Result<impl Iterator<Item = &N> + '_> {
        let slot = self.require_slot(node)?;
        Ok(self.label_slots(self.out_slots(slot)))
    }

    /// In-neighbors of `node`. For undirected graphs, all neighbors.
    pub fn predecessors(&self, node: &N) -> Result<impl Iterator<Item = &N> + '_> {
        let slot = self.require_slot(node)?;
        Ok(self.label_slots(self.in_slots(slot)))
    }

    /// Adjacent nodes of `node` (successors for directed graphs).
    pub fn neighbors(&self, node: &N) -> Result<impl Iterator<Item = &N> + '_> {
        self.successors(node)
    }

    /// Weight of the edge `src -> dst` (`{src, dst}` for undirected graphs).
    pub fn edge_weight(&self, src: &N, dst: &N) -> Result<f64> {
        let no_edge = || CentralityError::NoSuchEdge {
            src: format!("{src:?}"),
            dst: format!("{dst:?}"),
        };
        let u = self.ids.to_slot(src).ok_or_else(no_edge)?;
        let v = self.ids.to_slot(dst).ok_or_else(no_edge)?;
        self.edge_index
            .get(&edge_key(self.kind, u, v))
            .map(|&idx| self.edges[idx].2)
            .ok_or_else(no_edge)
    }

    pub fn has_edge(&self, src: &N, dst: &N) -> bool {
        self.edge_weight(src, dst).is_ok()
    }

    /// Incident edge count; an undirected self-loop counts twice.
    pub fn degree(&self, node: &N) -> Result<usize> {
        let slot = self.require_slot(node)?;
        Ok(match self.kind {
            GraphKind::Undirected => self.out_degree(slot) + self.self_loops(slot),
            GraphKind::Directed => self.out_degree(slot) + self.in_degree(slot),
        })
    }

    /// Weakly connected component of every slot, numbered from 0 in slot
    /// order, plus the component count.
    pub fn weak_components(&self) -> (Vec<u32>, usize) {
        let n = self.node_count();
        // Union-Find with path compression
        let mut parent: Vec<u32> = (0..n as u32).collect();
        let mut rank: Vec<u8> = vec![0; n];

        fn find(parent: &mut [u32], mut x: u32) -> u32 {
            while parent[x as usize] != x {
                parent[x as usize] = parent[parent[x as usize] as usize];
                x = parent[x as usize];
            }
            x
        }

        for &(u, v, _) in &self.edges {
            let (pu, pv) = (find(&mut parent, u), find(&mut parent, v));
            if pu == pv {
                continue;
            }
            match rank[pu as usize].cmp(&rank[pv as usize]) {
                std::cmp::Ordering::Less => parent[pu as usize] = pv,
                std::cmp::Ordering::Greater => parent[pv as usize] = pu,
                std::cmp::Ordering::Equal => {
                    parent[pv as usize] = pu;
                    rank[pu as usize] += 1;
                }
            }
        }

        // Assign contiguous component IDs
        let mut ids = vec![u32::MAX; n];
        let mut labels = vec![0u32; n];
        let mut count = 0u32;
        for slot in 0..n as u32 {
            let root = find(&mut parent, slot) as usize;
            if ids[root] == u32::MAX {
                ids[root] = count;
                count += 1;
            }
            labels[slot as usize] = ids[root];
        }
        (labels, count as usize)
    }

    /// Attach node identities to a slot-ordered vector.
    pub fn label(&self, values: Vec<f64>) -> Scores<N> {
        Scores::new(Arc::clone(&self.ids), values)
    }

    fn require_slot(&self, node: &N) -> Result<u32> {
        self.ids
            .to_slot(node)
            .ok_or_else(|| CentralityError::NodeNotFound {
                node: format!("{node:?}"),
            })
    }

    fn label_slots<'a>(&'a self, slots: &'a [u32]) -> impl Iterator<Item = &'a N> + 'a {
        slots.iter().map(move |&s| self.ids.to_node_unchecked(s))
    }

    // Slot-level access

    #[inline]
    pub fn to_slot(&self, node: &N) -> Option<u32> {
        self.ids.to_slot(node)
    }

    #[inline]
    pub fn node_at(&self, slot: u32) -> &N {
        self.ids.to_node_unchecked(slot)
    }

    #[inline]
    pub fn out_slots(&self, slot: u32) -> &[u32] {
        &self.out_csr.neighbors[self.out_csr.range(slot)]
    }

    #[inline]
    pub fn out_weights(&self, slot: u32) -> &[f64] {
        &self.out_csr.weights[self.out_csr.range(slot)]
    }

    #[inline]
    pub fn out_degree(&self, slot: u32) -> usize {
        self.out_csr.range(slot).len()
    }

    #[inline]
    pub fn in_slots(&self, slot: u32) -> &[u32] {
        let csr = self.in_csr.as_ref().unwrap_or(&self.out_csr);
        &csr.neighbors[csr.range(slot)]
    }

    #[inline]
    pub fn in_weights(&self, slot: u32) -> &[f64] {
        let csr = self.in_csr.as_ref().unwrap_or(&self.out_csr);
        &csr.weights[csr.range(slot)]
    }

    #[inline]
    pub fn in_degree(&self, slot: u32) -> usize {
        let csr = self.in_csr.as_ref().unwrap_or(&self.out_csr);
        csr.range(slot).len()
    }

    /// Number of self-loops on `slot` (0 or 1 in a simple graph).
    #[inline]
    pub fn self_loops(&self, slot: u32) -> usize {
        self.self_loops[slot as usize] as usize
    }

    /// Sum of outbound edge weights.
    #[inline]
    pub fn out_strength(&self, slot: u32) -> f64 {
        self.out_weights(slot).iter().sum()
    }
}
