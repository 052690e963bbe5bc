//! Per-community statistics.

use serde::Serialize;

use crate::graph::KnowledgeGraph;

/// Size and connectivity of one community.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityStats {
    /// Position of the community in the analyzed list.
    pub id: usize,
    pub size: usize,
    /// Undirected edges with both endpoints inside.
    pub internal_edges: usize,
    /// Undirected edges with exactly one endpoint inside.
    pub external_edges: usize,
    /// `internal / (n(n-1)/2)`, 0.0 for communities under two notes.
    pub density: f64,
    pub members: Vec<String>,
}

/// Compute [`CommunityStats`] for each community, in input order.
///
/// Ids that are not graph nodes are kept in `members` and `size` but have
/// no edges.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn analyze_communities(g: &KnowledgeGraph, communities: &[Vec<String>]) -> Vec<CommunityStats> {
    let view = g.undirected();
    let mut label: Vec<Option<usize>> = vec![None; view.len()];
    for (c, members) in communities.iter().enumerate() {
        for id in members {
            if let Some(i) = g.index_of(id) {
                label[i] = Some(c);
            }
        }
    }

    communities
        .iter()
        .enumerate()
        .map(|(c, members)| {
            let mut internal = 0usize;
            let mut external = 0usize;
            for i in members.iter().filter_map(|id| g.index_of(id)) {
                for &j in view.neighbors(i) {
                    if label[j] == Some(c) {
                        if j > i {
                            internal += 1;
                        }
                    } else {
                        external += 1;
                    }
                }
            }

            let size = members.len();
            let density = if size < 2 {
                0.0
            } else {
                internal as f64 / (size * (size - 1) / 2) as f64
            };

            CommunityStats {
                id: c,
                size,
                internal_edges: internal,
                external_edges: external,
                density,
                members: members.clone(),
            }
        })
        .collect()
}
