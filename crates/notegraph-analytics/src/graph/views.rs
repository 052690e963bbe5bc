//! Undirected view of the link graph.
//!
//! `neighbors(n) = successors(n) ∪ predecessors(n)`, stored as sorted,
//! deduplicated adjacency lists indexed by dense node index. The view is
//! computed once in [`crate::graph::GraphBuilder::build`] and never changes.

use std::collections::VecDeque;

use petgraph::graph::DiGraph;

/// Symmetric closure of a directed graph as adjacency lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndirectedView {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl UndirectedView {
    /// Build the symmetric closure of `graph`. Self-loops are skipped.
    #[must_use]
    pub fn from_digraph<N>(graph: &DiGraph<N, ()>) -> Self {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); graph.node_count()];
        for edge in graph.raw_edges() {
            let (a, b) = (edge.source().index(), edge.target().index());
            if a != b {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }
        let edge_count = adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        Self {
            adjacency,
            edge_count,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges. A reciprocal pair `A → B`, `B → A`
    /// counts once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Sorted neighbors of node `index`.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Undirected degree of node `index`.
    #[must_use]
    pub fn degree(&self, index: usize) -> usize {
        self.adjacency[index].len()
    }

    /// Hop distances from `source` to every node; `None` when unreachable.
    #[must_use]
    pub fn bfs_distances(&self, source: usize) -> Vec<Option<usize>> {
        let mut dist: Vec<Option<usize>> = vec![None; self.len()];
        dist[source] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            let next = dist[v].map_or(0, |d| d + 1);
            for &w in &self.adjacency[v] {
                if dist[w].is_none() {
                    dist[w] = Some(next);
                    queue.push_back(w);
                }
            }
        }
        dist
    }
}
