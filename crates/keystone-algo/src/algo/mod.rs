// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Centrality Algorithm Engine
//!
//! # Architecture
//!
//! Every metric is a configuration of one of two shared engines:
//!
//! - **PowerIteration**: fixed-point solver behind Eigenvector, Katz,
//!   PageRank and HITS. Each algorithm contributes an `UpdateRule`.
//!
//! - **ShortestPathAccumulator**: Brandes-style single-source traversals
//!   (BFS or Dijkstra) behind Closeness and Betweenness.
//!
//! Degree centrality reads the CSR degrees directly.
//!
//! # Example
//!
//! ```
//! use keystone_algo::{Algorithm, GraphBuilder, PageRank, PageRankConfig};
//!
//! let mut builder = GraphBuilder::directed();
//! builder.add_edge("a", "b").add_edge("b", "c").add_edge("c", "a");
//! let graph = builder.build()?;
//!
//! let result = PageRank::run(&graph, PageRankConfig::default())?;
//! assert!((result.scores.sum() - 1.0).abs() < 1e-9);
//! # Ok::<(), keystone_algo::CentralityError>(())
//! ```

pub mod algorithms;
pub mod power_iteration;
pub mod shortest_paths;

#[cfg(test)]
pub mod test_utils;
