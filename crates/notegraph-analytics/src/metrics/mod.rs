//! Centrality and clustering metrics for the link graph.
//!
//! # Overview
//!
//! Each metric answers a different question about note importance:
//!
//! | Metric | View | Question |
//! |--------|------|----------|
//! | [`degree`] | directed | How many links in and out? |
//! | [`pagerank`] | directed | Where does a random reader end up? |
//! | [`betweenness`] | undirected | Which notes bridge otherwise distant notes? |
//! | [`closeness`] | undirected | How near is everything reachable? (closeness, harmonic) |
//! | [`eigenvector`] | directed | Is the note linked from important notes? |
//! | [`katz`] | directed | How many damped paths lead here? |
//! | [`clustering`] | undirected | Do a note's neighbors link to each other? |
//!
//! # Usage
//!
//! All metrics take a [`KnowledgeGraph`] reference and return scores keyed
//! by note id. Nodes with no links get zero scores, never errors.
//!
//! ```rust,ignore
//! use notegraph_analytics::metrics::{betweenness, pagerank};
//!
//! let pr = pagerank::pagerank(&graph, &pagerank::PageRankConfig::default());
//! let bc = betweenness::betweenness_centrality(&graph);
//! let top = notegraph_analytics::metrics::top_n(&bc, 10);
//! ```

use std::collections::HashMap;

pub mod betweenness;
pub mod closeness;
pub mod clustering;
pub mod degree;
pub mod eigenvector;
pub mod katz;
pub mod pagerank;

/// The `n` highest-scoring `(id, score)` pairs, highest first.
///
/// Equal scores are ordered by id so the ranking is stable.
#[must_use]
pub fn top_n(scores: &HashMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = scores.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_n_orders_by_score_then_id() {
        let scores: HashMap<String, f64> = [("b", 1.0), ("a", 1.0), ("c", 2.0), ("d", 0.5)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let top = top_n(&scores, 3);
        let ids: Vec<&str> = top.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn top_n_larger_than_len_returns_all() {
        let scores: HashMap<String, f64> = [("a".to_string(), 1.0)].into_iter().collect();
        assert_eq!(top_n(&scores, 10).len(), 1);
    }
}
