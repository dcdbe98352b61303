// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Per-node score container returned by every centrality algorithm.

use crate::core::id_map::{IdMap, NodeId};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Index;
use std::sync::Arc;

/// One `f64` per node of the graph it was computed on.
///
/// Iteration follows node insertion order. Lookup by node is O(1).
#[derive(Debug, Clone)]
pub struct Scores<N: NodeId> {
    ids: Arc<IdMap<N>>,
    values: Vec<f64>,
}

impl<N: NodeId> Scores<N> {
    /// Wrap slot-ordered values.
    ///
    /// Panics if `values` does not have one entry per mapped node.
    pub fn new(ids: Arc<IdMap<N>>, values: Vec<f64>) -> Self {
        assert_eq!(
            ids.len(),
            values.len(),
            "score vector length must match node count"
        );
        Self { ids, values }
    }

    #[inline]
    pub fn get(&self, node: &N) -> Option<f64> {
        self.ids.to_slot(node).map(|slot| self.values[slot as usize])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Slot-ordered raw values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// (node, score) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, f64)> + '_ {
        self.ids.nodes().zip(self.values.iter().copied())
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Highest-scoring node; the first inserted wins ties.
    pub fn max(&self) -> Option<(&N, f64)> {
        self.iter()
            .fold(None, |best: Option<(&N, f64)>, (node, score)| match best {
                Some((_, b)) if b >= score => best,
                _ => Some((node, score)),
            })
    }

    /// Nodes in descending score order. Equal scores keep insertion order.
    pub fn ranked(&self) -> Vec<(&N, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Copy into an owned vector of pairs.
    pub fn to_vec(&self) -> Vec<(N, f64)> {
        self.iter().map(|(n, s)| (n.clone(), s)).collect()
    }
}

impl<N: NodeId> Index<&N> for Scores<N> {
    type Output = f64;

    fn index(&self, node: &N) -> &f64 {
        let slot = self
            .ids
            .to_slot(node)
            .unwrap_or_else(|| panic!("node {node:?} is not in the score set"));
        &self.values[slot as usize]
    }
}

impl<N: NodeId + Serialize> Serialize for Scores<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (node, score) in self.iter() {
            map.serialize_entry(node, &score)?;
        }
        map.end()
    }
}
