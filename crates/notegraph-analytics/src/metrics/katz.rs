//! Katz centrality.
//!
//! `score(n) = β + α · Σ score(p)` over all `p → n`, iterated a fixed
//! `max_iter` times from `score = β`, with **no normalization**. Each
//! iteration adds one more hop of damped incoming paths.
//!
//! The series only converges when `α < 1 / ρ(A)`, where `ρ(A)` is the
//! spectral radius of the adjacency matrix. The computation does not reject
//! larger `α`; it logs a warning using the power-iteration estimate from
//! [`super::eigenvector::spectral_radius_estimate`] and runs anyway.

use std::collections::HashMap;

use notegraph_core::config::KatzSection;
use tracing::{instrument, warn};

use crate::graph::KnowledgeGraph;
use crate::metrics::eigenvector::{EigenvectorConfig, spectral_radius_estimate};

/// Configuration for Katz centrality.
#[derive(Debug, Clone, PartialEq)]
pub struct KatzConfig {
    /// Attenuation per hop. Default: 0.1.
    pub alpha: f64,
    /// Baseline score every note receives. Default: 1.0.
    pub beta: f64,
    /// Number of iterations (always all of them). Default: 100.
    pub max_iter: usize,
}

impl Default for KatzConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            beta: 1.0,
            max_iter: 100,
        }
    }
}

impl From<&KatzSection> for KatzConfig {
    fn from(section: &KatzSection) -> Self {
        Self {
            alpha: section.alpha,
            beta: section.beta,
            max_iter: section.max_iter,
        }
    }
}

/// Compute Katz centrality for every note.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count(), alpha = config.alpha))]
pub fn katz_centrality(g: &KnowledgeGraph, config: &KatzConfig) -> HashMap<String, f64> {
    let n = g.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let rho = spectral_radius_estimate(g, &EigenvectorConfig::default());
    if config.alpha * rho >= 1.0 {
        warn!(
            alpha = config.alpha,
            spectral_radius = rho,
            "katz alpha is at or above 1/spectral radius; scores will diverge"
        );
    }

    let mut scores = vec![config.beta; n];
    let mut next = vec![0.0_f64; n];

    for _ in 0..config.max_iter {
        for (v, slot) in next.iter_mut().enumerate() {
            let incoming: f64 = g.predecessors(v).map(|p| scores[p]).sum();
            *slot = config.alpha.mul_add(incoming, config.beta);
        }
        std::mem::swap(&mut scores, &mut next);
    }

    g.scores_by_id(&scores)
}
