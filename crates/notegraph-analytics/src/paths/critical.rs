//! Critical paths between hub notes.
//!
//! # Algorithm
//!
//! 1. Take the `top_n` notes with the highest total degree as hubs (ties by
//!    id, zero-degree notes never qualify).
//! 2. For every hub pair, find the shortest undirected path.
//! 3. Score each path by the mean total degree of its *intermediate* notes.
//!    Pairs that are unreachable or directly linked have no intermediates
//!    and are skipped.
//! 4. Rank ascending: a hub-to-hub route that squeezes through low-degree
//!    notes is fragile, so it ranks first. Keep the first `top_n`.

use serde::Serialize;
use tracing::instrument;

use crate::graph::KnowledgeGraph;
use crate::metrics::degree::total_degrees;
use crate::paths::shortest::shortest_path;

/// A shortest hub-to-hub path and its fragility score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalPath {
    pub source: String,
    pub target: String,
    /// Full node sequence, endpoints included.
    pub path: Vec<String>,
    /// Number of edges.
    pub length: usize,
    /// Mean total degree of the intermediate notes.
    pub avg_intermediate_degree: f64,
}

/// Rank shortest paths between the `top_n` hubs, most fragile first.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn critical_paths(g: &KnowledgeGraph, top_n: usize) -> Vec<CriticalPath> {
    let degrees = total_degrees(g);

    let mut hubs: Vec<usize> = (0..g.node_count()).filter(|&i| degrees[i] > 0).collect();
    hubs.sort_by(|&a, &b| degrees[b].cmp(&degrees[a]).then_with(|| a.cmp(&b)));
    hubs.truncate(top_n);
    // Pair endpoints in id order.
    hubs.sort_unstable();

    let mut found = Vec::new();
    for (k, &a) in hubs.iter().enumerate() {
        for &b in &hubs[k + 1..] {
            let (source, target) = (g.id(a), g.id(b));
            let Some(path) = shortest_path(g, source, target) else {
                continue;
            };
            if path.len() < 3 {
                continue;
            }

            let inner = &path[1..path.len() - 1];
            let total: usize = inner
                .iter()
                .filter_map(|id| g.index_of(id))
                .map(|i| degrees[i])
                .sum();

            found.push(CriticalPath {
                source: source.to_string(),
                target: target.to_string(),
                length: path.len() - 1,
                avg_intermediate_degree: total as f64 / inner.len() as f64,
                path,
            });
        }
    }

    found.sort_by(|x, y| {
        x.avg_intermediate_degree
            .total_cmp(&y.avg_intermediate_degree)
            .then_with(|| x.source.cmp(&y.source))
            .then_with(|| x.target.cmp(&y.target))
    });
    found.truncate(top_n);
    found
}
