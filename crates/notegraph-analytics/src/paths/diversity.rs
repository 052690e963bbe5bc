//! Path diversity between two notes.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::graph::KnowledgeGraph;
use crate::paths::shortest::all_simple_paths;

/// How many distinct routes connect two notes, and how long they are.
///
/// Lengths count edges. When no path exists every field is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathDiversity {
    pub path_count: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub avg_length: f64,
    /// Notes used by at least one path, endpoints included.
    pub distinct_nodes: usize,
}

impl PathDiversity {
    /// Summarize an already enumerated set of paths.
    ///
    /// Each path is a node sequence including both endpoints.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_paths(paths: &[Vec<String>]) -> Self {
        if paths.is_empty() {
            return Self {
                path_count: 0,
                min_length: 0,
                max_length: 0,
                avg_length: 0.0,
                distinct_nodes: 0,
            };
        }

        let lengths: Vec<usize> = paths.iter().map(|p| p.len().saturating_sub(1)).collect();
        let nodes: BTreeSet<&str> = paths.iter().flatten().map(String::as_str).collect();

        Self {
            path_count: paths.len(),
            min_length: lengths.iter().copied().min().unwrap_or(0),
            max_length: lengths.iter().copied().max().unwrap_or(0),
            avg_length: lengths.iter().sum::<usize>() as f64 / lengths.len() as f64,
            distinct_nodes: nodes.len(),
        }
    }
}

/// Summarize [`all_simple_paths`] from `from` to `to` up to `max_length`.
#[must_use]
pub fn path_diversity(g: &KnowledgeGraph, from: &str, to: &str, max_length: usize) -> PathDiversity {
    PathDiversity::from_paths(&all_simple_paths(g, from, to, max_length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_has_two_routes() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);
        let d = path_diversity(&g, "a", "b", 5);
        assert_eq!(d.path_count, 2);
        assert_eq!(d.min_length, 1);
        assert_eq!(d.max_length, 3);
        assert!((d.avg_length - 2.0).abs() < 1e-12);
        assert_eq!(d.distinct_nodes, 4);
    }

    #[test]
    fn no_route_is_all_zero() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("c", "d")]);
        let d = path_diversity(&g, "a", "d", 5);
        assert_eq!(d.path_count, 0);
        assert_eq!(d.distinct_nodes, 0);
        assert!((d.avg_length - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_paths_matches_enumeration() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);
        let paths = all_simple_paths(&g, "a", "c", 5);
        assert_eq!(PathDiversity::from_paths(&paths), path_diversity(&g, "a", "c", 5));
        assert_eq!(PathDiversity::from_paths(&paths).path_count, 2);
    }
}
