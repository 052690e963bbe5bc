//! Closeness and harmonic centrality on the undirected view.
//!
//! Both run one BFS per note.
//!
//! - **Closeness** is *local*: `(k - 1) / Σ d(n, v)` where `k` counts the
//!   note's reachable set including itself. Normalizing by the reachable set
//!   instead of `N - 1` keeps the score meaningful on disconnected graphs; a
//!   note in a tight two-note island scores as high as a hub of a large
//!   connected graph.
//! - **Harmonic** is `Σ 1 / d(n, v)` over reachable `v ≠ n`. Unreachable
//!   pairs add zero instead of breaking the sum.

use std::collections::HashMap;

use tracing::instrument;

use crate::graph::{KnowledgeGraph, UndirectedView};

/// Compute local closeness centrality for every note.
///
/// Isolated notes score 0.0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn closeness_centrality(g: &KnowledgeGraph) -> HashMap<String, f64> {
    let view = g.undirected();
    g.scores_by_id(&per_node(view, |s| closeness_of(view, s)))
}

/// Compute harmonic centrality for every note.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn harmonic_centrality(g: &KnowledgeGraph) -> HashMap<String, f64> {
    let view = g.undirected();
    g.scores_by_id(&per_node(view, |s| harmonic_of(view, s)))
}

#[allow(clippy::cast_precision_loss)]
fn closeness_of(view: &UndirectedView, s: usize) -> f64 {
    let mut reachable = 0usize;
    let mut total = 0usize;
    for d in view.bfs_distances(s).into_iter().flatten() {
        reachable += 1;
        total += d;
    }
    if total == 0 {
        0.0
    } else {
        (reachable - 1) as f64 / total as f64
    }
}

#[allow(clippy::cast_precision_loss)]
fn harmonic_of(view: &UndirectedView, s: usize) -> f64 {
    view.bfs_distances(s)
        .into_iter()
        .flatten()
        .filter(|&d| d > 0)
        .map(|d| 1.0 / d as f64)
        .sum()
}

#[cfg(feature = "parallel")]
fn per_node<F>(view: &UndirectedView, f: F) -> Vec<f64>
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    use rayon::prelude::*;
    (0..view.len()).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn per_node<F>(view: &UndirectedView, f: F) -> Vec<f64>
where
    F: Fn(usize) -> f64,
{
    per_node_sequential(view, f)
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn per_node_sequential<F>(view: &UndirectedView, f: F) -> Vec<f64>
where
    F: Fn(usize) -> f64,
{
    (0..view.len()).map(f).collect()
}
