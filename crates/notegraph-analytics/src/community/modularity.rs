//! Newman modularity of a partition on the undirected view.
//!
//! ```text
//! Q = Σ_c [ L_c / m - (d_c / 2m)² ]
//! ```
//!
//! where `m` is the number of undirected edges, `L_c` the edges with both
//! endpoints in community `c`, and `d_c` the summed degree of its members.
//! This is the per-community form of `1/(2m) Σ_ij [A_ij - k_i k_j / 2m] δ(c_i, c_j)`.
//!
//! Putting every note into one community gives `Q = 0` exactly. A graph
//! without edges scores 0.

use std::collections::HashMap;

use crate::graph::KnowledgeGraph;

/// Modularity of `communities` over `g`.
///
/// Unknown ids are ignored. Notes not listed in any community contribute
/// nothing. If an id is listed twice, the later community wins.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn modularity(g: &KnowledgeGraph, communities: &[Vec<String>]) -> f64 {
    let view = g.undirected();
    let m = view.edge_count();
    if m == 0 || communities.is_empty() {
        return 0.0;
    }

    let mut label: Vec<Option<usize>> = vec![None; view.len()];
    for (c, members) in communities.iter().enumerate() {
        for id in members {
            if let Some(i) = g.index_of(id) {
                label[i] = Some(c);
            }
        }
    }

    let mut internal: HashMap<usize, usize> = HashMap::new();
    let mut degree_sum: HashMap<usize, usize> = HashMap::new();
    for (i, own) in label.iter().enumerate() {
        let Some(c) = *own else { continue };
        *degree_sum.entry(c).or_insert(0) += view.degree(i);
        // Each undirected edge once: only count j > i.
        let inside = view
            .neighbors(i)
            .iter()
            .filter(|&&j| j > i && label[j] == Some(c))
            .count();
        *internal.entry(c).or_insert(0) += inside;
    }

    let m = m as f64;
    degree_sum
        .iter()
        .map(|(c, &d)| {
            let l = internal.get(c).copied().unwrap_or(0) as f64;
            let share = d as f64 / (2.0 * m);
            l / m - share * share
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn community(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn single_community_scores_zero() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);
        let q = modularity(&g, &[community(&["a", "b", "c", "d"])]);
        assert!(q.abs() < 1e-12, "got {q}");
    }

    #[test]
    fn two_disjoint_triangles() {
        let g = KnowledgeGraph::from_edges(
            &[],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("d", "e"), ("e", "f"), ("f", "d")],
        );
        let q = modularity(&g, &[community(&["a", "b", "c"]), community(&["d", "e", "f"])]);
        // 2 × (3/6 - (6/12)²) = 0.5
        assert!((q - 0.5).abs() < 1e-12, "got {q}");
    }

    #[test]
    fn singletons_score_negative() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let q = modularity(&g, &[community(&["a"]), community(&["b"]), community(&["c"])]);
        // 3 × (0 - (2/6)²) = -1/3
        assert!((q + 1.0 / 3.0).abs() < 1e-12, "got {q}");
    }

    #[test]
    fn edgeless_graph_is_zero() {
        let g = KnowledgeGraph::from_edges(&["a", "b"], &[]);
        let q = modularity(&g, &[community(&["a", "b"])]);
        assert!(q.abs() < f64::EPSILON);
    }

    #[test]
    fn reciprocal_links_count_once() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "a")]);
        let q = modularity(&g, &[community(&["a", "b"])]);
        assert!(q.abs() < 1e-12, "got {q}");
    }
}
