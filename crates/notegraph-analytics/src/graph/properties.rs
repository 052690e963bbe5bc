//! Global properties of the link graph.
//!
//! # Properties Provided
//!
//! - **node_count** / **edge_count**: notes and directed links.
//! - **density**: ratio of actual links to maximum possible links for a
//!   directed graph: `density = edge_count / (node_count * (node_count - 1))`.
//!   An empty or single-node graph has density 0.0.
//! - **diameter**: longest shortest-path distance between any two mutually
//!   reachable notes, on the undirected view. Unreachable pairs are skipped.
//! - **average_path_length**: mean of the same distance set.
//! - **components**: undirected connected components, largest first.
//! - **isolated_node_count**: notes with no links in either direction.

use fixedbitset::FixedBitSet;
use serde::Serialize;
use tracing::instrument;

use crate::graph::KnowledgeGraph;

// ---------------------------------------------------------------------------
// GraphProperties
// ---------------------------------------------------------------------------

/// Summary properties for a link graph.
///
/// Computed by [`GraphProperties::compute`]. Distance-based fields use the
/// undirected view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphProperties {
    /// Number of notes (nodes) in the graph.
    pub node_count: usize,
    /// Number of directed links.
    pub edge_count: usize,
    /// Number of undirected edges (reciprocal links count once).
    pub undirected_edge_count: usize,
    /// Graph density: `edge_count / (node_count * (node_count - 1))`.
    pub density: f64,
    /// Largest finite pairwise distance. Zero when no pair is connected.
    pub diameter: usize,
    /// Mean finite pairwise distance over ordered pairs of distinct nodes.
    /// Zero when no pair is connected.
    pub average_path_length: f64,
    /// Number of connected components.
    pub component_count: usize,
    /// Size of the largest connected component.
    pub largest_component: usize,
    /// Number of nodes with no in-links and no out-links.
    pub isolated_node_count: usize,
    /// Component membership, largest first; members sorted by id.
    pub components: Vec<Vec<String>>,
}

impl GraphProperties {
    /// Compute all properties. Cost is one BFS per node: O(V·(V+E)).
    #[must_use]
    #[instrument(skip(g), fields(nodes = g.node_count()))]
    pub fn compute(g: &KnowledgeGraph) -> Self {
        let view = g.undirected();
        let components = connected_components(g);
        let (diameter, average_path_length) = distance_summary(g);

        Self {
            node_count: g.node_count(),
            edge_count: g.edge_count(),
            undirected_edge_count: view.edge_count(),
            density: density(g),
            diameter,
            average_path_length,
            component_count: components.len(),
            largest_component: components.first().map_or(0, Vec::len),
            isolated_node_count: (0..view.len()).filter(|&i| view.degree(i) == 0).count(),
            components,
        }
    }

    /// Return `true` if every node is reachable from every other node
    /// (ignoring direction). An empty graph is not connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count == 1
    }
}

/// Directed density: `m / (n(n-1))`, 0.0 when `n < 2`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density(g: &KnowledgeGraph) -> f64 {
    let n = g.node_count();
    if n < 2 {
        return 0.0_f64;
    }
    let max_edges = (n * (n - 1)) as f64;
    g.edge_count() as f64 / max_edges
}

/// Partition nodes into undirected connected components.
///
/// Components are sorted largest first, ties broken by smallest member id;
/// members within a component are sorted by id. Iterative BFS, so deep
/// chains cannot overflow the stack.
#[must_use]
pub fn connected_components(g: &KnowledgeGraph) -> Vec<Vec<String>> {
    let view = g.undirected();
    let n = view.len();
    let mut seen = FixedBitSet::with_capacity(n);
    let mut components: Vec<Vec<usize>> = Vec::new();

    for start in 0..n {
        if seen.contains(start) {
            continue;
        }
        seen.insert(start);
        let mut members = vec![start];
        let mut cursor = 0;
        while cursor < members.len() {
            let v = members[cursor];
            cursor += 1;
            for &w in view.neighbors(v) {
                if !seen.contains(w) {
                    seen.insert(w);
                    members.push(w);
                }
            }
        }
        members.sort_unstable();
        components.push(members);
    }

    // Index order is id order, so comparing first members compares ids.
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));
    components
        .into_iter()
        .map(|c| c.into_iter().map(|i| g.id(i).to_string()).collect())
        .collect()
}

/// `(diameter, average_path_length)` over all reachable ordered pairs.
#[allow(clippy::cast_precision_loss)]
fn distance_summary(g: &KnowledgeGraph) -> (usize, f64) {
    let view = g.undirected();
    let mut diameter = 0usize;
    let mut total = 0usize;
    let mut pairs = 0usize;

    for s in 0..view.len() {
        for d in view.bfs_distances(s).into_iter().flatten() {
            if d > 0 {
                diameter = diameter.max(d);
                total += d;
                pairs += 1;
            }
        }
    }

    let average = if pairs == 0 {
        0.0
    } else {
        total as f64 / pairs as f64
    };
    (diameter, average)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_properties() {
        let g = KnowledgeGraph::from_edges(&[], &[]);
        let p = GraphProperties::compute(&g);
        assert_eq!(p.node_count, 0);
        assert!((p.density - 0.0).abs() < f64::EPSILON);
        assert_eq!(p.diameter, 0);
        assert_eq!(p.component_count, 0);
        assert_eq!(p.largest_component, 0);
        assert!(!p.is_connected());
    }

    #[test]
    fn single_node_density_is_zero() {
        let g = KnowledgeGraph::from_edges(&["a"], &[]);
        let p = GraphProperties::compute(&g);
        assert!((p.density - 0.0).abs() < f64::EPSILON);
        assert_eq!(p.isolated_node_count, 1);
        assert!(p.is_connected());
    }

    #[test]
    fn chain_density_and_diameter() {
        // a → b → c: 2 edges, max 6
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c")]);
        let p = GraphProperties::compute(&g);
        assert!((p.density - 2.0 / 6.0).abs() < 1e-10);
        assert_eq!(p.diameter, 2);
        // Ordered pairs: (a,b)=1 (a,c)=2 (b,c)=1, doubled → 8 / 6
        assert!((p.average_path_length - 8.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn cycle_plus_isolated_node() {
        let g = KnowledgeGraph::from_edges(&["d"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let p = GraphProperties::compute(&g);
        assert_eq!(p.component_count, 2);
        assert_eq!(p.largest_component, 3);
        assert_eq!(p.components[0], vec!["a", "b", "c"]);
        assert_eq!(p.components[1], vec!["d"]);
        assert_eq!(p.diameter, 1);
        assert!((p.average_path_length - 1.0).abs() < 1e-10);
        assert_eq!(p.isolated_node_count, 1);
    }

    #[test]
    fn components_sorted_by_size_then_id() {
        let g = KnowledgeGraph::from_edges(&["z"], &[("m", "n"), ("x", "y"), ("y", "w")]);
        let comps = connected_components(&g);
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0], vec!["w", "x", "y"]);
        assert_eq!(comps[1], vec!["m", "n"]);
        assert_eq!(comps[2], vec!["z"]);
    }
}
