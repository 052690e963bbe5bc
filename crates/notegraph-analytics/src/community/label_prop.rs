//! Label propagation for community detection.
//!
//! O(E) per pass. Every note starts with a unique label (its index); in
//! each pass, visited in sorted id order, a note adopts the most common
//! label among its undirected neighbors, ties going to the smallest label.
//! Updates are applied in place, so later notes in the same pass see them.
//! Stops after a pass with no change, or `max_iter` passes. Notes without
//! neighbors keep their own label.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::{CommunityDetection, Partition};
use crate::graph::KnowledgeGraph;

/// Label propagation community detector.
#[derive(Debug, Clone)]
pub struct LabelPropagation {
    max_iter: usize,
}

impl LabelPropagation {
    /// Create a detector with `max_iter = 100`.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_iter: 100 }
    }

    /// Set maximum passes.
    #[must_use]
    pub const fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

impl Default for LabelPropagation {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for LabelPropagation {
    #[instrument(skip(self, g), fields(nodes = g.node_count(), max_iter = self.max_iter))]
    fn detect(&self, g: &KnowledgeGraph) -> Partition {
        let view = g.undirected();
        let n = view.len();
        let mut labels: Vec<usize> = (0..n).collect();
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..self.max_iter {
            iterations += 1;
            let mut changed = false;

            for node in 0..n {
                let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
                for &nb in view.neighbors(node) {
                    *counts.entry(labels[nb]).or_insert(0) += 1;
                }

                // First maximum in label order wins.
                let majority = counts
                    .iter()
                    .fold(None::<(usize, usize)>, |best, (&label, &count)| match best {
                        Some((_, best_count)) if best_count >= count => best,
                        _ => Some((label, count)),
                    });

                if let Some((label, _)) = majority
                    .filter(|&(label, _)| label != labels[node])
                {
                    labels[node] = label;
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }
        }

        debug!(iterations, converged, "label propagation finished");
        Partition::from_labels(g, &labels, iterations, converged)
    }
}
