// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod api {
    pub mod error;
}

pub mod core {
    pub mod id_map;
    pub mod scores;
}

pub mod graph {
    pub mod csr_graph;
}

// Re-exports for convenience
pub use api::error::{CentralityError, NonConvergence, Result};
pub use core::id_map::{IdMap, NodeId};
pub use core::scores::Scores;
pub use graph::csr_graph::{Graph, GraphBuilder, GraphKind};
