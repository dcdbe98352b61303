// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use thiserror::Error;

/// Why a power iteration stopped without reaching its tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonConvergence {
    /// `max_iterations` was exhausted.
    #[error("iteration limit reached")]
    IterationLimit,
    /// An iterate had zero norm, so it could not be renormalized.
    #[error("iterate collapsed to the zero vector")]
    ZeroNorm,
    /// An iterate contained an infinite or NaN value.
    #[error("iterate became non-finite")]
    Diverged,
    /// Several connected components share the dominant eigenvalue, so the
    /// limit depends on the starting vector.
    #[error("dominant eigenvector is not unique")]
    Degenerate,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CentralityError {
    #[error("Invalid graph: {message}")]
    InvalidGraph { message: String },

    #[error("Node {node} is not in the graph")]
    NodeNotFound { node: String },

    /// Weight lookup on an edge that is not in the graph.
    #[error("No edge from {src} to {dst}")]
    NoSuchEdge { src: String, dst: String },

    /// Shortest-path algorithms require non-negative weights.
    #[error("Edge from {src} to {dst} has negative weight {weight}")]
    NegativeWeight {
        src: String,
        dst: String,
        weight: f64,
    },

    /// The iteration cap ran out (or the iterate degenerated) before the
    /// tolerance was met.
    ///
    /// `last_iterate` is slot ordered and can be labelled with
    /// `Graph::label`. For HITS it holds the hub block followed by the
    /// authority block.
    #[error(
        "Power iteration did not converge after {iterations} iterations ({reason}, delta {delta:e})"
    )]
    PowerIterationNotConverged {
        iterations: usize,
        delta: f64,
        reason: NonConvergence,
        last_iterate: Vec<f64>,
    },

    #[error("Argument '{arg}' is invalid: {message}")]
    InvalidArgument { arg: String, message: String },
}

impl CentralityError {
    pub fn invalid_graph(message: impl Into<String>) -> Self {
        CentralityError::InvalidGraph {
            message: message.into(),
        }
    }

    pub fn invalid_argument(arg: impl Into<String>, message: impl Into<String>) -> Self {
        CentralityError::InvalidArgument {
            arg: arg.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a convergence failure the caller may choose to
    /// accept by reading `last_iterate`.
    pub fn is_not_converged(&self) -> bool {
        matches!(self, CentralityError::PowerIterationNotConverged { .. })
    }
}

pub type Result<T> = std::result::Result<T, CentralityError>;
