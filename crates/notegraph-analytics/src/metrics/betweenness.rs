//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a note lies on shortest paths
//! between other pairs of notes. High-betweenness notes are "bridges"
//! between topics. Removing them lengthens or cuts many reading paths.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs, on the **undirected** view:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    `σ` and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes
//!    first): `δ[v] += (σ[v] / σ[w]) · (1 + δ[w])` for each predecessor `v`
//!    of `w`.
//! 3. Sum `δ` across all source nodes (excluding the source itself).
//!
//! When several shortest paths exist, credit is split in proportion to
//! `σ`, never assigned to one arbitrarily.
//!
//! Complexity: O(V · (V + E)). Each source pass is independent; with the
//! `parallel` feature they run on the rayon pool with per-thread
//! accumulators summed at the end.
//!
//! # Output
//!
//! Scores are normalized by `1 / ((N-1)(N-2))` when `N > 2`; smaller graphs
//! are returned unnormalized. Because the view is undirected every pair is
//! counted from both ends, so on a path `A–B–C` the middle node scores
//! `2 / (2·1) = 1.0`.

use std::collections::{HashMap, VecDeque};

use tracing::instrument;

use crate::graph::{KnowledgeGraph, UndirectedView};

/// Compute normalized betweenness centrality for every note.
///
/// Isolated notes and notes that never sit between two others score 0.0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn betweenness_centrality(g: &KnowledgeGraph) -> HashMap<String, f64> {
    let raw = betweenness_raw(g.undirected());
    g.scores_by_id(&normalize(raw))
}

/// Unnormalized Brandes sums per dense node index.
#[must_use]
pub fn betweenness_raw(view: &UndirectedView) -> Vec<f64> {
    let n = view.len();
    if n == 0 {
        return Vec::new();
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        (0..n)
            .into_par_iter()
            .fold(
                || vec![0.0_f64; n],
                |mut acc, s| {
                    accumulate_source(view, s, &mut acc);
                    acc
                },
            )
            .reduce(
                || vec![0.0_f64; n],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            )
    }

    #[cfg(not(feature = "parallel"))]
    {
        betweenness_sequential(view)
    }
}

/// Single-threaded Brandes sums, one source at a time.
#[cfg_attr(feature = "parallel", allow(dead_code))]
fn betweenness_sequential(view: &UndirectedView) -> Vec<f64> {
    let mut cb = vec![0.0_f64; view.len()];
    for s in 0..view.len() {
        accumulate_source(view, s, &mut cb);
    }
    cb
}

/// One Brandes pass from source `s`, adding dependencies into `cb`.
fn accumulate_source(view: &UndirectedView, s: usize, cb: &mut [f64]) {
    let n = view.len();

    // Stack: nodes in order of discovery (farthest popped first).
    let mut stack: Vec<usize> = Vec::with_capacity(n);

    // predecessors[w] = nodes immediately preceding w on shortest paths from s.
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

    // sigma[t]: number of shortest paths from s to t.
    let mut sigma: Vec<f64> = vec![0.0; n];
    sigma[s] = 1.0;

    // dist[t]: distance from s to t (-1 = unvisited).
    let mut dist: Vec<i64> = vec![-1; n];
    dist[s] = 0;

    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(s);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for &w in view.neighbors(v) {
            // First visit to w?
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }

            // Shortest path to w via v?
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    // Accumulate dependencies in reverse BFS order.
    let mut delta: Vec<f64> = vec![0.0; n];

    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            if sigma[w] > 0.0 {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
        }

        if w != s {
            cb[w] += delta[w];
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn normalize(mut raw: Vec<f64>) -> Vec<f64> {
    let n = raw.len();
    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for x in &mut raw {
            *x *= scale;
        }
    }
    raw
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_returns_empty() {
        let g = KnowledgeGraph::from_edges(&[], &[]);
        assert!(betweenness_centrality(&g).is_empty());
    }

    #[test]
    fn single_node_zero_betweenness() {
        let g = KnowledgeGraph::from_edges(&["a"], &[]);
        assert_eq!(betweenness_centrality(&g).get("a"), Some(&0.0));
    }

    #[test]
    fn two_nodes_stay_unnormalized() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b")]);
        let bc = betweenness_centrality(&g);
        assert!((bc["a"] - 0.0).abs() < 1e-10);
        assert!((bc["b"] - 0.0).abs() < 1e-10);
    }

    #[test]
    fn three_chain_middle_node() {
        // a → b → c, undirected: b lies on a–c both ways → raw 2, norm 2/(2·1)
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c")]);
        let bc = betweenness_centrality(&g);
        assert!((bc["a"] - 0.0).abs() < 1e-10);
        assert!((bc["b"] - 1.0).abs() < 1e-10, "got {}", bc["b"]);
        assert!((bc["c"] - 0.0).abs() < 1e-10);
    }

    #[test]
    fn direction_does_not_matter() {
        // a ← b → c behaves like a – b – c.
        let g = KnowledgeGraph::from_edges(&[], &[("b", "a"), ("b", "c")]);
        let bc = betweenness_centrality(&g);
        assert!((bc["b"] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn diamond_splits_credit() {
        // a – b – d, a – c – d: b and c each carry half of a–d.
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        let raw = betweenness_raw(g.undirected());
        let b = g.index_of("b").expect("b");
        let c = g.index_of("c").expect("c");
        // a–d counted from both ends: 2 × 0.5 = 1.0
        assert!((raw[b] - 1.0).abs() < 1e-10, "got {}", raw[b]);
        assert!((raw[c] - 1.0).abs() < 1e-10, "got {}", raw[c]);
    }

    #[test]
    fn star_center_carries_all_pairs() {
        // center linked with 4 leaves: C(4,2) = 6 pairs, ×2 = 12 raw.
        let g = KnowledgeGraph::from_edges(
            &[],
            &[("hub", "l1"), ("hub", "l2"), ("hub", "l3"), ("hub", "l4")],
        );
        let bc = betweenness_centrality(&g);
        // Normalized: 12 / (4·3) = 1.0
        assert!((bc["hub"] - 1.0).abs() < 1e-10);
        assert!((bc["l1"] - 0.0).abs() < 1e-10);
    }

    #[test]
    fn disconnected_components_no_cross_betweenness() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("c", "d")]);
        let bc = betweenness_centrality(&g);
        for id in ["a", "b", "c", "d"] {
            assert!((bc[id] - 0.0).abs() < 1e-10, "{id}");
        }
    }

    #[test]
    fn pool_and_sequential_sums_agree() {
        let g = KnowledgeGraph::from_edges(
            &["solo"],
            &[
                ("a", "b"),
                ("a", "c"),
                ("b", "d"),
                ("c", "d"),
                ("d", "e"),
                ("e", "f"),
                ("x", "y"),
            ],
        );
        let pooled = betweenness_raw(g.undirected());
        let sequential = betweenness_sequential(g.undirected());
        assert_eq!(pooled.len(), sequential.len());
        for (p, q) in pooled.iter().zip(&sequential) {
            assert!((p - q).abs() < 1e-9, "{p} != {q}");
        }
    }
}
