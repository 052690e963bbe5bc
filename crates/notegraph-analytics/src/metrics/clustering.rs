//! Local and global clustering coefficients on the undirected view.
//!
//! For a note `n` with `k` neighbors:
//!
//! ```text
//! local(n) = |{(u, v) : u, v ∈ N(n), u ≠ v, u – v}| / (k · (k - 1))
//! ```
//!
//! The numerator counts *ordered* neighbor pairs, so a fully linked
//! neighborhood scores 1.0. Notes with fewer than two neighbors score 0.0.
//! `global` is the plain mean of `local` over all notes, isolated ones
//! included.

use std::collections::HashMap;

use fixedbitset::FixedBitSet;
use serde::Serialize;
use tracing::instrument;

use crate::graph::KnowledgeGraph;

/// Clustering coefficients for a graph.
#[derive(Debug, Clone, Serialize)]
pub struct ClusteringResult {
    /// Local coefficient per note id, in `[0, 1]`.
    pub local: HashMap<String, f64>,
    /// Mean of all local coefficients (0.0 for an empty graph).
    pub global: f64,
}

/// Compute local and global clustering coefficients.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn clustering_coefficients(g: &KnowledgeGraph) -> ClusteringResult {
    let view = g.undirected();
    let n = view.len();
    let mut local = vec![0.0_f64; n];
    let mut marked = FixedBitSet::with_capacity(n);

    for (node, slot) in local.iter_mut().enumerate() {
        let neighbors = view.neighbors(node);
        let k = neighbors.len();
        if k < 2 {
            continue;
        }

        marked.clear();
        for &u in neighbors {
            marked.insert(u);
        }

        let ordered_pairs: usize = neighbors
            .iter()
            .map(|&u| view.neighbors(u).iter().filter(|&&w| marked.contains(w)).count())
            .sum();

        *slot = ordered_pairs as f64 / (k * (k - 1)) as f64;
    }

    let global = if n == 0 {
        0.0
    } else {
        local.iter().sum::<f64>() / n as f64
    };

    ClusteringResult {
        local: g.scores_by_id(&local),
        global,
    }
}
