// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

#![allow(dead_code)]

use keystone_algo::{Graph, GraphBuilder};

/// Zachary's karate club, 34 members and 78 friendships.
#[rustfmt::skip]
pub const KARATE_EDGES: [(u32, u32); 78] = [
    (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (0, 7), (0, 8),
    (0, 10), (0, 11), (0, 12), (0, 13), (0, 17), (0, 19), (0, 21), (0, 31),
    (1, 2), (1, 3), (1, 7), (1, 13), (1, 17), (1, 19), (1, 21), (1, 30),
    (2, 3), (2, 7), (2, 8), (2, 9), (2, 13), (2, 27), (2, 28), (2, 32),
    (3, 7), (3, 12), (3, 13),
    (4, 6), (4, 10),
    (5, 6), (5, 10), (5, 16),
    (6, 16),
    (8, 30), (8, 32), (8, 33),
    (9, 33),
    (13, 33),
    (14, 32), (14, 33),
    (15, 32), (15, 33),
    (18, 32), (18, 33),
    (19, 33),
    (20, 32), (20, 33),
    (22, 32), (22, 33),
    (23, 25), (23, 27), (23, 29), (23, 32), (23, 33),
    (24, 25), (24, 27), (24, 31),
    (25, 31),
    (26, 29), (26, 33),
    (27, 33),
    (28, 31), (28, 33),
    (29, 32), (29, 33),
    (30, 32), (30, 33),
    (31, 32), (31, 33),
    (32, 33),
];

/// Link graph of 11 pages; page 1 has no outgoing links and 7..=11 have no
/// incoming ones.
pub const LINK_EDGES: [(u32, u32); 17] = [
    (2, 3),
    (3, 2),
    (4, 1),
    (4, 2),
    (5, 2),
    (5, 4),
    (5, 6),
    (6, 2),
    (6, 5),
    (7, 2),
    (7, 5),
    (8, 2),
    (8, 5),
    (9, 2),
    (9, 5),
    (10, 5),
    (11, 5),
];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn karate() -> anyhow::Result<Graph<u32>> {
    let mut b = GraphBuilder::undirected();
    b.add_nodes(0..34).add_edges(KARATE_EDGES);
    Ok(b.build()?)
}

/// Karate club with every friendship as a pair of opposite arcs.
pub fn karate_directed() -> anyhow::Result<Graph<u32>> {
    let mut b = GraphBuilder::directed();
    b.add_nodes(0..34);
    for (u, v) in KARATE_EDGES {
        b.add_edge(u, v).add_edge(v, u);
    }
    Ok(b.build()?)
}

pub fn link_graph() -> anyhow::Result<Graph<u32>> {
    let mut b = GraphBuilder::directed();
    b.add_nodes(1..=11).add_edges(LINK_EDGES);
    Ok(b.build()?)
}
