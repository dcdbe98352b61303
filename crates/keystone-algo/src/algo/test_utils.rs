// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use keystone_common::{Graph, GraphBuilder};

pub fn directed(edges: &[(u32, u32)]) -> Graph<u32> {
    let mut b = GraphBuilder::directed();
    b.add_edges(edges.iter().copied());
    b.build().expect("test graph")
}

pub fn undirected(edges: &[(u32, u32)]) -> Graph<u32> {
    let mut b = GraphBuilder::undirected();
    b.add_edges(edges.iter().copied());
    b.build().expect("test graph")
}

/// Undirected path 0 - 1 - ... - (n-1).
pub fn path(n: u32) -> Graph<u32> {
    let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
    undirected(&edges)
}

/// Undirected star with center 0 and leaves 1..=k.
pub fn star(k: u32) -> Graph<u32> {
    let edges: Vec<_> = (1..=k).map(|i| (0, i)).collect();
    undirected(&edges)
}

pub fn complete(n: u32) -> Graph<u32> {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push((i, j));
        }
    }
    undirected(&edges)
}

/// Undirected cycle 0 - 1 - ... - (n-1) - 0.
pub fn cycle(n: u32) -> Graph<u32> {
    let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    undirected(&edges)
}
