// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Power-Iteration Engine.
//!
//! Shared fixed-point solver behind Eigenvector, Katz, PageRank and HITS.
//! Each algorithm supplies an `UpdateRule`; the engine owns the state
//! vectors, renormalization, convergence test and failure reporting.
//!
//! The state may be split into equally sized blocks that are normalized
//! independently (HITS keeps hubs and authorities side by side). Convergence
//! is always measured on the whole state: iteration stops once the L1
//! distance between successive iterates drops below the tolerance.

use keystone_common::{CentralityError, Graph, NodeId, NonConvergence, Result};
use std::time::Instant;

/// How each block of the iterate is rescaled after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Divide by the sum of absolute values.
    L1,
    /// Divide by the Euclidean norm.
    L2,
    /// Leave the iterate as computed.
    None,
}

#[derive(Debug, Clone, Copy)]
pub struct IterationConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub normalization: Normalization,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            normalization: Normalization::L2,
        }
    }
}

impl IterationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(CentralityError::invalid_argument(
                "max_iterations",
                "must be at least 1",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CentralityError::invalid_argument(
                "tolerance",
                format!("must be a positive finite number, got {}", self.tolerance),
            ));
        }
        Ok(())
    }
}

/// One step of a fixed-point iteration.
pub trait UpdateRule: Sync {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Number of independently normalized blocks in the state.
    fn blocks(&self) -> usize {
        1
    }

    /// Write the next iterate into `next` (zeroed on entry) from `prev`.
    ///
    /// Both slices hold `blocks() * n` values, block-major.
    fn apply(&self, prev: &[f64], next: &mut [f64]);
}

/// A converged iterate.
#[derive(Debug, Clone)]
pub struct Convergence {
    pub vector: Vec<f64>,
    pub iterations: usize,
    /// L1 distance between the last two iterates.
    pub delta: f64,
}

pub struct PowerIteration {
    config: IterationConfig,
    initial: Option<Vec<f64>>,
}

impl PowerIteration {
    pub fn new(config: IterationConfig) -> Self {
        Self {
            config,
            initial: None,
        }
    }

    /// Start from `initial` instead of the uniform `1/n` vector.
    pub fn with_initial(mut self, initial: Vec<f64>) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Iterate `rule` over a state of `rule.blocks() * n` values.
    pub fn run<R: UpdateRule>(&self, rule: &R, n: usize) -> Result<Convergence> {
        self.config.validate()?;
        if n == 0 {
            return Err(CentralityError::invalid_graph("graph has no nodes"));
        }

        let blocks = rule.blocks();
        let len = blocks * n;
        let norm = self.config.normalization;

        let mut prev = match &self.initial {
            Some(v) if v.len() != len => {
                return Err(CentralityError::invalid_argument(
                    "initial",
                    format!("expected {} values, got {}", len, v.len()),
                ));
            }
            Some(v) if v.iter().any(|x| !x.is_finite()) => {
                return Err(CentralityError::invalid_argument(
                    "initial",
                    "values must be finite",
                ));
            }
            Some(v) => v.clone(),
            None => vec![1.0 / n as f64; len],
        };
        if !normalize_blocks(&mut prev, n, norm) {
            return Err(CentralityError::invalid_argument(
                "initial",
                "vector has zero norm",
            ));
        }

        let mut next = vec![0.0; len];
        let started = Instant::now();
        let mut delta = f64::INFINITY;

        for iter in 1..=self.config.max_iterations {
            next.fill(0.0);
            rule.apply(&prev, &mut next);

            if next.iter().any(|x| !x.is_finite()) {
                log::warn!("{}: iterate became non-finite at iteration {}", rule.name(), iter);
                return Err(not_converged(iter, delta, NonConvergence::Diverged, prev));
            }
            if !normalize_blocks(&mut next, n, norm) {
                log::warn!("{}: iterate collapsed to zero at iteration {}", rule.name(), iter);
                return Err(not_converged(iter, delta, NonConvergence::ZeroNorm, prev));
            }

            delta = l1_distance(&prev, &next);
            std::mem::swap(&mut prev, &mut next);
            log::trace!("{}: iteration {} delta {:e}", rule.name(), iter, delta);

            if delta < self.config.tolerance {
                log::debug!(
                    "{}: converged after {} iterations in {:?}",
                    rule.name(),
                    iter,
                    started.elapsed()
                );
                return Ok(Convergence {
                    vector: prev,
                    iterations: iter,
                    delta,
                });
            }
        }

        log::warn!(
            "{}: no convergence within {} iterations (delta {:e})",
            rule.name(),
            self.config.max_iterations,
            delta
        );
        Err(not_converged(
            self.config.max_iterations,
            delta,
            NonConvergence::IterationLimit,
            prev,
        ))
    }
}

fn not_converged(
    iterations: usize,
    delta: f64,
    reason: NonConvergence,
    last_iterate: Vec<f64>,
) -> CentralityError {
    CentralityError::PowerIterationNotConverged {
        iterations,
        delta,
        reason,
        last_iterate,
    }
}

/// Rescale each block in place. Returns false if a block has zero norm.
fn normalize_blocks(values: &mut [f64], n: usize, norm: Normalization) -> bool {
    if norm == Normalization::None {
        return true;
    }
    for block in values.chunks_mut(n) {
        let scale = match norm {
            Normalization::L1 => block.iter().map(|x| x.abs()).sum::<f64>(),
            Normalization::L2 => block.iter().map(|x| x * x).sum::<f64>().sqrt(),
            Normalization::None => 1.0,
        };
        if scale == 0.0 {
            return false;
        }
        for x in block.iter_mut() {
            *x /= scale;
        }
    }
    true
}

/// Sequential so that iterates are reproducible bit for bit.
pub(crate) fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Checks that a converged limit does not depend on the starting vector.
///
/// When the graph splits into components, the limit is only unique if a
/// single component holds the dominant eigenvalue. Each component that
/// still carries more than `tolerance` of the first block gets a Rayleigh
/// quotient estimate of its eigenvalue from one more application of `rule`.
/// Two or more components tied at the top fail with `Degenerate`. Weaker
/// components are left alone: their share decays as the iteration proceeds.
pub(crate) fn ensure_unique_limit<N: NodeId, R: UpdateRule>(
    graph: &Graph<N>,
    rule: &R,
    converged: Convergence,
    tolerance: f64,
) -> Result<Convergence> {
    let (labels, count) = graph.weak_components();
    if count < 2 {
        return Ok(converged);
    }

    let n = graph.node_count();
    let mut image = vec![0.0; converged.vector.len()];
    rule.apply(&converged.vector, &mut image);

    let mut mass = vec![0.0; count];
    let mut num = vec![0.0; count];
    let mut den = vec![0.0; count];
    for v in 0..n {
        let c = labels[v] as usize;
        let x = converged.vector[v];
        mass[c] += x.abs();
        num[c] += x * image[v];
        den[c] += x * x;
    }

    let eigenvalues: Vec<f64> = (0..count)
        .filter(|&c| mass[c] > tolerance)
        .map(|c| num[c] / den[c])
        .collect();
    if eigenvalues.len() < 2 {
        return Ok(converged);
    }
    let top = eigenvalues.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let slack = tolerance.sqrt() * top.abs();
    let tied = eigenvalues.iter().filter(|&&l| top - l <= slack).count();
    if tied < 2 {
        return Ok(converged);
    }

    log::warn!(
        "{}: {} components share the dominant eigenvalue {:.6}",
        rule.name(),
        tied,
        top
    );
    Err(not_converged(
        converged.iterations,
        converged.delta,
        NonConvergence::Degenerate,
        converged.vector,
    ))
}

/// Σ w(u, v) · x[u] over the in-neighbors u of `slot`.
#[inline]
pub(crate) fn pull_sum<N: NodeId>(graph: &Graph<N>, slot: u32, x: &[f64], weighted: bool) -> f64 {
    weighted_sum(graph.in_slots(slot), graph.in_weights(slot), x, weighted)
}

/// Σ w(v, u) · x[u] over the out-neighbors u of `slot`.
#[inline]
pub(crate) fn push_sum<N: NodeId>(graph: &Graph<N>, slot: u32, x: &[f64], weighted: bool) -> f64 {
    weighted_sum(graph.out_slots(slot), graph.out_weights(slot), x, weighted)
}

/// Starts from +0.0 so that nodes without neighbors score a positive zero.
#[inline]
fn weighted_sum(neighbors: &[u32], weights: &[f64], x: &[f64], weighted: bool) -> f64 {
    if weighted {
        neighbors
            .iter()
            .zip(weights)
            .fold(0.0, |acc, (&u, &w)| acc + w * x[u as usize])
    } else {
        neighbors.iter().fold(0.0, |acc, &u| acc + x[u as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// next = M · prev for a small dense matrix.
    struct Dense(Vec<Vec<f64>>);

    impl UpdateRule for Dense {
        fn name(&self) -> &'static str {
            "dense"
        }

        fn apply(&self, prev: &[f64], next: &mut [f64]) {
            for (i, row) in self.0.iter().enumerate() {
                next[i] = row.iter().zip(prev).map(|(a, b)| a * b).sum();
            }
        }
    }

    #[test]
    fn test_converges_to_dominant_eigenvector() {
        // [[2, 1], [1, 2]] has dominant eigenvector (1, 1) / sqrt(2).
        let rule = Dense(vec![vec![2.0, 1.0], vec![1.0, 2.0]]);
        let engine = PowerIteration::new(IterationConfig::default())
            .with_initial(vec![1.0, 0.0]);
        let result = engine.run(&rule, 2).unwrap();

        let expected = 1.0 / 2f64.sqrt();
        assert!((result.vector[0] - expected).abs() < 1e-6);
        assert!((result.vector[1] - expected).abs() < 1e-6);
        assert!(result.delta < 1e-6);
        assert!(result.iterations > 1);
    }

    #[test]
    fn test_zero_norm_is_reported() {
        let rule = Dense(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        let err = PowerIteration::new(IterationConfig::default())
            .run(&rule, 2)
            .unwrap_err();
        match err {
            CentralityError::PowerIterationNotConverged {
                iterations,
                reason,
                last_iterate,
                ..
            } => {
                assert_eq!(iterations, 1);
                assert_eq!(reason, NonConvergence::ZeroNorm);
                assert_eq!(last_iterate.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_iteration_limit_carries_last_iterate() {
        // A permutation oscillates forever from a non-uniform start.
        let rule = Dense(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let config = IterationConfig {
            max_iterations: 7,
            ..Default::default()
        };
        let err = PowerIteration::new(config)
            .with_initial(vec![1.0, 0.0])
            .run(&rule, 2)
            .unwrap_err();
        match err {
            CentralityError::PowerIterationNotConverged {
                iterations,
                reason,
                last_iterate,
                delta,
            } => {
                assert_eq!(iterations, 7);
                assert_eq!(reason, NonConvergence::IterationLimit);
                assert_eq!(last_iterate, vec![0.0, 1.0]);
                assert!((delta - 2.0).abs() < 1e-12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_divergence_without_normalization() {
        let rule = Dense(vec![vec![1e200, 0.0], vec![0.0, 1e200]]);
        let config = IterationConfig {
            normalization: Normalization::None,
            ..Default::default()
        };
        let err = PowerIteration::new(config).run(&rule, 2).unwrap_err();
        assert!(matches!(
            err,
            CentralityError::PowerIterationNotConverged {
                reason: NonConvergence::Diverged,
                ..
            }
        ));
    }

    #[test]
    fn test_blocks_are_normalized_independently() {
        struct Scale;
        impl UpdateRule for Scale {
            fn name(&self) -> &'static str {
                "scale"
            }
            fn blocks(&self) -> usize {
                2
            }
            fn apply(&self, prev: &[f64], next: &mut [f64]) {
                next[0] = prev[0];
                next[1] = 3.0 * prev[1];
                next[2] = 5.0 * prev[2];
                next[3] = 5.0 * prev[3];
            }
        }
        let config = IterationConfig {
            normalization: Normalization::L1,
            max_iterations: 200,
            ..Default::default()
        };
        let result = PowerIteration::new(config).run(&Scale, 2).unwrap();
        let (a, b) = result.vector.split_at(2);
        assert!((a.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((b.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(a[1] > 0.999);
        assert!((b[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let rule = Dense(vec![vec![1.0]]);
        let config = IterationConfig {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            PowerIteration::new(config).run(&rule, 1),
            Err(CentralityError::InvalidArgument { .. })
        ));

        let err = PowerIteration::new(IterationConfig::default())
            .with_initial(vec![1.0, 2.0])
            .run(&rule, 1)
            .unwrap_err();
        assert!(matches!(err, CentralityError::InvalidArgument { .. }));
    }

    #[test]
    fn test_empty_state_is_invalid_graph() {
        let rule = Dense(Vec::new());
        assert!(matches!(
            PowerIteration::new(IterationConfig::default()).run(&rule, 0),
            Err(CentralityError::InvalidGraph { .. })
        ));
    }
}
