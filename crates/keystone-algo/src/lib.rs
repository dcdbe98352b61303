// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod algo;

pub use algo::algorithms::{
    Algorithm, Betweenness, BetweennessConfig, Closeness, ClosenessConfig, DegreeCentrality,
    DegreeCentralityConfig, DegreeDirection, EigenvectorCentrality, EigenvectorCentralityConfig,
    EigenvectorCentralityResult, Hits, HitsConfig, HitsResult, KatzCentrality,
    KatzCentralityConfig, KatzCentralityResult, PageRank, PageRankConfig, PageRankResult,
    degree_centrality, in_degree_centrality, out_degree_centrality,
};
pub use algo::power_iteration::{
    Convergence, IterationConfig, Normalization, PowerIteration, UpdateRule,
};
pub use algo::shortest_paths::{ShortestPathAccumulator, ShortestPathTree, TraversalDirection};
pub use keystone_common::{
    CentralityError, Graph, GraphBuilder, GraphKind, IdMap, NodeId, NonConvergence, Result,
    Scores,
};
