//! Degree centrality.
//!
//! `out_degree(n) = |successors(n)|`, `in_degree(n) = |predecessors(n)|`,
//! `total = in + out`. O(V+E).

use std::collections::HashMap;

use serde::Serialize;

use crate::graph::KnowledgeGraph;

/// Per-note degree counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeCentrality {
    /// In-degree per note id (how many notes link here).
    pub in_degree: HashMap<String, usize>,
    /// Out-degree per note id (how many notes this one links to).
    pub out_degree: HashMap<String, usize>,
    /// Total degree per note id (in + out).
    pub total_degree: HashMap<String, usize>,
}

impl DegreeCentrality {
    /// Total degree as `f64` scores, for use with [`super::top_n`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_scores(&self) -> HashMap<String, f64> {
        self.total_degree
            .iter()
            .map(|(k, v)| (k.clone(), *v as f64))
            .collect()
    }
}

/// Compute degree centrality for every note.
#[must_use]
pub fn degree_centrality(g: &KnowledgeGraph) -> DegreeCentrality {
    let n = g.node_count();
    let mut in_degree = HashMap::with_capacity(n);
    let mut out_degree = HashMap::with_capacity(n);
    let mut total_degree = HashMap::with_capacity(n);

    for (i, &total) in total_degrees(g).iter().enumerate() {
        let id = g.id(i).to_string();
        let out_d = g.out_degree(i);
        in_degree.insert(id.clone(), total - out_d);
        out_degree.insert(id.clone(), out_d);
        total_degree.insert(id, total);
    }

    DegreeCentrality {
        in_degree,
        out_degree,
        total_degree,
    }
}

/// Total (in + out) degree per dense node index.
#[must_use]
pub fn total_degrees(g: &KnowledgeGraph) -> Vec<usize> {
    (0..g.node_count())
        .map(|i| g.out_degree(i) + g.in_degree(i))
        .collect()
}
