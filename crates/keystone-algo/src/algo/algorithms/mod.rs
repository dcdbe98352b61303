// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Core algorithm trait and the centrality implementations.

use keystone_common::{Graph, NodeId, Result};

/// Core trait for all centrality algorithms.
pub trait Algorithm<N: NodeId> {
    /// Algorithm parameters.
    type Config: Default + Clone + Send;
    /// Result type.
    type Output: Send;

    /// Algorithm identifier.
    fn name() -> &'static str;

    /// Execute the algorithm on an immutable graph.
    fn run(graph: &Graph<N>, config: Self::Config) -> Result<Self::Output>;
}

mod degree_centrality;
pub use degree_centrality::{
    DegreeCentrality, DegreeCentralityConfig, DegreeDirection, degree_centrality,
    in_degree_centrality, out_degree_centrality,
};

mod eigenvector_centrality;
pub use eigenvector_centrality::{
    EigenvectorCentrality, EigenvectorCentralityConfig, EigenvectorCentralityResult,
};

mod katz_centrality;
pub use katz_centrality::{KatzCentrality, KatzCentralityConfig, KatzCentralityResult};

mod pagerank;
pub use pagerank::{PageRank, PageRankConfig, PageRankResult};

mod hits;
pub use hits::{Hits, HitsConfig, HitsResult};

mod closeness;
pub use closeness::{Closeness, ClosenessConfig};

mod betweenness;
pub use betweenness::{Betweenness, BetweennessConfig};
