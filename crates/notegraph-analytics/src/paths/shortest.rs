//! Shortest paths and bounded simple-path enumeration.
//!
//! Both walk neighbors in ascending index (= sorted id) order, so when
//! several shortest paths exist the one through the smallest ids is
//! returned, and enumerated paths come out in a stable order.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use tracing::instrument;

use crate::graph::KnowledgeGraph;

/// Shortest undirected path from `from` to `to`, endpoints included.
///
/// Returns `Some([from])` when `from == to`, and `None` when either id is
/// unknown or `to` is unreachable.
#[must_use]
pub fn shortest_path(g: &KnowledgeGraph, from: &str, to: &str) -> Option<Vec<String>> {
    let s = g.index_of(from)?;
    let t = g.index_of(to)?;
    if s == t {
        return Some(vec![from.to_string()]);
    }

    let view = g.undirected();
    let mut parent: Vec<Option<usize>> = vec![None; view.len()];
    let mut seen = FixedBitSet::with_capacity(view.len());
    seen.insert(s);
    let mut queue = VecDeque::from([s]);

    while let Some(v) = queue.pop_front() {
        for &w in view.neighbors(v) {
            if seen.put(w) {
                continue;
            }
            parent[w] = Some(v);
            if w == t {
                let mut path = vec![t];
                let mut cur = t;
                while let Some(p) = parent[cur] {
                    path.push(p);
                    cur = p;
                }
                path.reverse();
                return Some(path.into_iter().map(|i| g.id(i).to_string()).collect());
            }
            queue.push_back(w);
        }
    }

    None
}

/// Hop distance between two notes on the undirected view.
#[must_use]
pub fn distance(g: &KnowledgeGraph, from: &str, to: &str) -> Option<usize> {
    let s = g.index_of(from)?;
    let t = g.index_of(to)?;
    g.undirected().bfs_distances(s)[t]
}

/// Every simple path from `from` to `to` with at most `max_length` edges.
///
/// Uses an explicit stack, so deep graphs cannot overflow the call stack.
/// The result can still grow combinatorially with `max_length`. Unknown
/// ids and `from == to` give an empty list.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn all_simple_paths(
    g: &KnowledgeGraph,
    from: &str,
    to: &str,
    max_length: usize,
) -> Vec<Vec<String>> {
    let (Some(s), Some(t)) = (g.index_of(from), g.index_of(to)) else {
        return Vec::new();
    };
    if s == t || max_length == 0 {
        return Vec::new();
    }

    let view = g.undirected();
    let mut found: Vec<Vec<usize>> = Vec::new();
    let mut on_path = FixedBitSet::with_capacity(view.len());
    on_path.insert(s);
    let mut path: Vec<usize> = vec![s];
    // cursor[k]: next neighbor position to try from path[k]
    let mut cursor: Vec<usize> = vec![0];

    while let Some(&node) = path.last() {
        let top = cursor.len() - 1;
        let neighbors = view.neighbors(node);
        let depth = path.len() - 1;

        if depth < max_length && cursor[top] < neighbors.len() {
            let next = neighbors[cursor[top]];
            cursor[top] += 1;

            if next == t {
                let mut hit = path.clone();
                hit.push(t);
                found.push(hit);
            } else if !on_path.contains(next) {
                on_path.insert(next);
                path.push(next);
                cursor.push(0);
            }
        } else {
            on_path.set(node, false);
            path.pop();
            cursor.pop();
        }
    }

    found
        .into_iter()
        .map(|p| p.into_iter().map(|i| g.id(i).to_string()).collect())
        .collect()
}
