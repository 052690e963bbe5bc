//! Bottleneck notes: high betweenness with a removal-impact estimate.
//!
//! A note is a bottleneck when its normalized betweenness is at least the
//! threshold. Its `impact` is `degree²` using total (in + out) degree.
//! That is a heuristic stand-in for how much removing the note would hurt
//! connectivity; no cut or component recomputation is done.

use std::collections::HashMap;

use serde::Serialize;

use crate::graph::KnowledgeGraph;
use crate::metrics::{betweenness::betweenness_centrality, degree::total_degrees};

/// A note that many shortest paths run through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub id: String,
    /// Normalized betweenness.
    pub betweenness: f64,
    /// Total degree (in + out).
    pub degree: usize,
    /// `degree²`.
    pub impact: usize,
}

/// Compute betweenness and return every note at or above `threshold`.
#[must_use]
pub fn find_bottlenecks(g: &KnowledgeGraph, threshold: f64) -> Vec<Bottleneck> {
    bottlenecks_from_scores(g, &betweenness_centrality(g), threshold)
}

/// Bottlenecks from already computed betweenness scores.
///
/// Sorted by betweenness descending, then id.
#[must_use]
pub fn bottlenecks_from_scores(
    g: &KnowledgeGraph,
    betweenness: &HashMap<String, f64>,
    threshold: f64,
) -> Vec<Bottleneck> {
    let degrees = total_degrees(g);
    let mut found: Vec<Bottleneck> = g
        .ids()
        .enumerate()
        .filter_map(|(i, id)| {
            let score = betweenness.get(id).copied().unwrap_or(0.0);
            (score >= threshold).then(|| Bottleneck {
                id: id.to_string(),
                betweenness: score,
                degree: degrees[i],
                impact: degrees[i] * degrees[i],
            })
        })
        .collect();

    found.sort_by(|a, b| {
        b.betweenness
            .total_cmp(&a.betweenness)
            .then_with(|| a.id.cmp(&b.id))
    });
    found
}
