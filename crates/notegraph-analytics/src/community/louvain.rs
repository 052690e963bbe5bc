//! Louvain-style greedy local moving.
//!
//! # Algorithm
//!
//! 1. Every note starts in its own community (its index).
//! 2. For each note in index order, count its undirected links into each
//!    community held by its neighbors.
//! 3. Move the note to the neighboring community with the most links if
//!    that beats the links it has into its current community:
//!
//!    ```text
//!    gain = links_to(candidate) - links_to(current)
//!    ```
//!
//!    Equal link counts resolve to the lowest community id. A move needs
//!    `gain > 0`.
//! 4. Repeat full passes until one makes no move, or `max_iter` passes.
//!
//! This is a link-count heuristic. It does not use the modularity-gain
//! formula and has no aggregation phase, so partitions differ from
//! textbook Louvain. Changing the gain function changes every result.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::{CommunityDetection, Partition};
use crate::graph::KnowledgeGraph;

/// Louvain-style community detector.
#[derive(Debug, Clone)]
pub struct Louvain {
    max_iter: usize,
}

impl Louvain {
    /// Create a detector with `max_iter = 100`.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_iter: 100 }
    }

    /// Set the maximum number of passes.
    #[must_use]
    pub const fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for Louvain {
    #[instrument(skip(self, g), fields(nodes = g.node_count(), max_iter = self.max_iter))]
    fn detect(&self, g: &KnowledgeGraph) -> Partition {
        let view = g.undirected();
        let n = view.len();
        let mut community: Vec<usize> = (0..n).collect();
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..self.max_iter {
            iterations += 1;
            let mut moved = 0usize;

            for node in 0..n {
                let current = community[node];

                // BTreeMap: iteration in community id order gives the
                // lowest-id tie-break below.
                let mut links: BTreeMap<usize, usize> = BTreeMap::new();
                for &nb in view.neighbors(node) {
                    *links.entry(community[nb]).or_insert(0) += 1;
                }

                let current_links = links.get(&current).copied().unwrap_or(0);
                let best = links
                    .iter()
                    .filter(|&(&c, _)| c != current)
                    .fold(None::<(usize, usize)>, |best, (&c, &count)| match best {
                        Some((_, best_count)) if best_count >= count => best,
                        _ => Some((c, count)),
                    });

                if let Some((candidate, _)) = best.filter(|&(_, l)| l > current_links) {
                    community[node] = candidate;
                    moved += 1;
                }
            }

            if moved == 0 {
                converged = true;
                break;
            }
        }

        debug!(iterations, converged, "louvain local moving finished");
        Partition::from_labels(g, &community, iterations, converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn triangle_collapses_to_one_community() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let p = Louvain::new().detect(&g);
        assert_eq!(p.communities, vec![ids(&["a", "b", "c"])]);
        assert!(p.converged);
        assert_eq!(p.iterations, 2);
    }

    #[test]
    fn components_never_merge() {
        let g = KnowledgeGraph::from_edges(&["solo"], &[("a", "b"), ("c", "d"), ("d", "e")]);
        let p = Louvain::new().detect(&g);
        assert_eq!(p.len(), 3);
        assert_eq!(p.communities[0], ids(&["c", "d", "e"]));
        assert_eq!(p.communities[1], ids(&["a", "b"]));
        assert_eq!(p.communities[2], ids(&["solo"]));
    }

    #[test]
    fn max_iter_one_stops_early() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let p = Louvain::new().with_max_iter(1).detect(&g);
        assert_eq!(p.iterations, 1);
        assert!(!p.converged);
    }

    #[test]
    fn every_node_assigned_once() {
        let g = KnowledgeGraph::from_edges(
            &[],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e"), ("e", "f"), ("f", "d")],
        );
        let p = Louvain::new().detect(&g);
        let mut all: Vec<String> = p.communities.concat();
        all.sort();
        assert_eq!(all, ids(&["a", "b", "c", "d", "e", "f"]));
    }
}
