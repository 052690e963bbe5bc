//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores a note highly when it is linked *from*
//! highly scored notes. It is the dominant eigenvector of the transposed
//! adjacency matrix.
//!
//! # Algorithm
//!
//! Power iteration on the **directed** adjacency:
//!
//! 1. Initialize scores uniformly at `1/N`.
//! 2. For each node `v`: `score(v) = Σ score(u)` over all `u → v`.
//! 3. Normalize the score vector to unit L2 norm.
//! 4. Repeat until the largest per-node change is below `tolerance`, or
//!    `max_iter` iterations have run.
//!
//! Unlike PageRank there is no teleport term, so on acyclic link graphs
//! every score drains to zero. Once the vector's norm reaches zero the
//! iteration stops and all scores are 0.0.
//!
//! # Output
//!
//! [`EigenvectorResult`] carries the scores together with the Rayleigh-style
//! growth factor `‖Ax‖ / ‖x‖` from the last iteration, which estimates the
//! spectral radius of the adjacency matrix. Katz centrality uses it to
//! flag divergent `alpha` values.

use std::collections::HashMap;

use notegraph_core::config::EigenvectorSection;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::KnowledgeGraph;

/// Configuration for eigenvector centrality.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenvectorConfig {
    /// Maximum number of power iterations. Default: 100.
    pub max_iter: usize,
    /// Stop when the max absolute per-node change is below this value.
    /// Default: 1e-6.
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tolerance: 1e-6,
        }
    }
}

impl From<&EigenvectorSection> for EigenvectorConfig {
    fn from(section: &EigenvectorSection) -> Self {
        Self {
            max_iter: section.max_iter,
            tolerance: section.tolerance,
        }
    }
}

/// Result of an eigenvector centrality computation.
#[derive(Debug, Clone, Serialize)]
pub struct EigenvectorResult {
    /// Unit-norm scores (or all zeros): note id → score.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the iteration settled before `max_iter`.
    pub converged: bool,
    /// Growth factor of the last iteration; approximates the spectral radius.
    pub eigenvalue: f64,
}

/// Compute eigenvector centrality for every note.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(g: &KnowledgeGraph, config: &EigenvectorConfig) -> EigenvectorResult {
    let n = g.node_count();
    if n == 0 {
        return EigenvectorResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
            eigenvalue: 0.0,
        };
    }

    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;
    let mut eigenvalue = 0.0;

    for _ in 0..config.max_iter {
        iterations += 1;

        for (v, slot) in next.iter_mut().enumerate() {
            *slot = g.predecessors(v).map(|u| scores[u]).sum();
        }

        let prev_norm = l2_norm(&scores);
        let norm = l2_norm(&next);
        eigenvalue = if prev_norm > 0.0 { norm / prev_norm } else { 0.0 };

        if norm <= 0.0 {
            // Acyclic graphs drain to the zero vector, which is a fixed point.
            scores.fill(0.0);
            converged = true;
            break;
        }
        for x in &mut next {
            *x /= norm;
        }

        let delta = scores
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (old - new).abs())
            .fold(0.0_f64, f64::max);

        std::mem::swap(&mut scores, &mut next);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, eigenvalue, "eigenvector iteration finished");

    EigenvectorResult {
        scores: g.scores_by_id(&scores),
        iterations,
        converged,
        eigenvalue,
    }
}

/// Estimate the spectral radius of the directed adjacency matrix.
#[must_use]
pub fn spectral_radius_estimate(g: &KnowledgeGraph, config: &EigenvectorConfig) -> f64 {
    eigenvector_centrality(g, config).eigenvalue
}

fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph() {
        let g = KnowledgeGraph::from_edges(&[], &[]);
        let result = eigenvector_centrality(&g, &EigenvectorConfig::default());
        assert!(result.scores.is_empty());
        assert!(result.converged);
    }

    #[test]
    fn cycle_is_uniform_unit_vector() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let result = eigenvector_centrality(&g, &EigenvectorConfig::default());
        let expected = 1.0 / 3.0_f64.sqrt();
        for id in ["a", "b", "c"] {
            assert!((result.scores[id] - expected).abs() < 1e-9, "{id}");
        }
        assert!(result.converged);
        assert!((result.eigenvalue - 1.0).abs() < 1e-9);
    }

    #[test]
    fn acyclic_graph_drains_to_zero() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c")]);
        let result = eigenvector_centrality(&g, &EigenvectorConfig::default());
        for id in ["a", "b", "c"] {
            assert!((result.scores[id] - 0.0).abs() < f64::EPSILON, "{id}");
        }
        assert!(result.converged);
        assert!((result.eigenvalue - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn node_linked_from_cycle_scores_higher() {
        // a ↔ b, both link to hub; hub links back to a.
        let g = KnowledgeGraph::from_edges(
            &[],
            &[("a", "b"), ("b", "a"), ("a", "hub"), ("b", "hub"), ("hub", "a")],
        );
        let result = eigenvector_centrality(&g, &EigenvectorConfig::default());
        assert!(result.scores["hub"] > result.scores["b"]);
        assert!(result.eigenvalue > 1.0);
    }

    #[test]
    fn max_iter_cutoff_reports_not_converged() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "a"), ("a", "c"), ("c", "a")]);
        let config = EigenvectorConfig {
            max_iter: 1,
            tolerance: 0.0,
        };
        let result = eigenvector_centrality(&g, &config);
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
    }
}
