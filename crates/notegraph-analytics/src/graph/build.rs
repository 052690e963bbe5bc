//! Graph construction from a note corpus.
//!
//! # Overview
//!
//! [`GraphBuilder`] collects nodes, titles and directed links, then freezes
//! them into a [`KnowledgeGraph`]. The builder enforces the graph contract:
//!
//! - Edges are deduplicated (no multi-edges).
//! - Self-links (`A → A`) are dropped.
//! - Every edge endpoint is a node, even if it was never added explicitly.
//! - Node indices follow sorted id order.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "note A links to note B".
//!
//! ## Cache Invalidation
//!
//! The graph carries a BLAKE3 hash of its sorted node list and sorted edge
//! list, so two graphs with the same structure hash equal regardless of the
//! order notes were loaded in.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet, HashMap};

use notegraph_core::Corpus;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};
use tracing::{debug, instrument};

use crate::graph::views::UndirectedView;

// ---------------------------------------------------------------------------
// KnowledgeGraph
// ---------------------------------------------------------------------------

/// An immutable directed link graph with a cached undirected view.
///
/// Node `i` in the petgraph graph is the `i`-th id in sorted order, so
/// `NodeIndex::index()` doubles as a dense array index for every metric.
#[derive(Debug, Clone)]
pub struct KnowledgeGraph {
    /// Directed graph: nodes = note ids, edges = links.
    graph: DiGraph<String, ()>,
    /// Mapping from note id to petgraph `NodeIndex`.
    node_map: HashMap<String, NodeIndex>,
    /// Display titles. Nodes without an entry display their id.
    titles: HashMap<String, String>,
    /// Symmetric closure of `graph`.
    undirected: UndirectedView,
    /// BLAKE3 hash of the node and edge sets.
    content_hash: String,
}

impl KnowledgeGraph {
    /// Build a graph from a node list and an edge list.
    ///
    /// Edge endpoints missing from `nodes` are added as nodes.
    #[must_use]
    pub fn from_edges(nodes: &[&str], edges: &[(&str, &str)]) -> Self {
        let mut builder = GraphBuilder::new();
        for id in nodes {
            builder.add_node(*id);
        }
        for (a, b) in edges {
            builder.add_edge(*a, *b);
        }
        builder.build()
    }

    /// Build a graph from every note in `corpus`. See
    /// [`GraphBuilder::from_corpus`].
    #[must_use]
    pub fn from_corpus(corpus: &Corpus) -> Self {
        GraphBuilder::from_corpus(corpus).build()
    }

    /// Return the number of nodes (notes) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of directed edges (links) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The underlying petgraph graph.
    #[must_use]
    pub fn digraph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// The cached undirected view.
    #[must_use]
    pub fn undirected(&self) -> &UndirectedView {
        &self.undirected
    }

    /// Look up the dense index for a note id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_map.get(id).map(|idx| idx.index())
    }

    /// Return `true` if `id` is a node of this graph.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Return the note id for a dense index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= node_count()`.
    #[must_use]
    pub fn id(&self, index: usize) -> &str {
        &self.graph[NodeIndex::new(index)]
    }

    /// All note ids in sorted (= index) order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Display title for a note, falling back to its id.
    #[must_use]
    pub fn title<'a>(&'a self, id: &'a str) -> &'a str {
        self.titles.get(id).map_or(id, String::as_str)
    }

    /// Directed successors of node `index` (notes it links to).
    pub fn successors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(index), Direction::Outgoing)
            .map(|n| n.index())
    }

    /// Directed predecessors of node `index` (notes linking to it).
    pub fn predecessors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(index), Direction::Incoming)
            .map(|n| n.index())
    }

    /// Number of outgoing links from node `index`.
    #[must_use]
    pub fn out_degree(&self, index: usize) -> usize {
        self.successors(index).count()
    }

    /// Number of incoming links to node `index`.
    #[must_use]
    pub fn in_degree(&self, index: usize) -> usize {
        self.predecessors(index).count()
    }

    /// All directed edges as `(source, target)` id pairs, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .raw_edges()
            .iter()
            .map(|e| {
                (
                    self.graph[e.source()].as_str(),
                    self.graph[e.target()].as_str(),
                )
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Return the content hash of the node and edge sets.
    ///
    /// Used for cache invalidation. If this changes, recompute.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Map a dense score vector back to note ids.
    #[must_use]
    pub fn scores_by_id(&self, scores: &[f64]) -> HashMap<String, f64> {
        self.ids()
            .zip(scores.iter().copied())
            .map(|(id, s)| (id.to_string(), s))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Accumulates nodes and links before freezing them into a
/// [`KnowledgeGraph`].
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    titles: BTreeMap<String, Option<String>>,
    edges: BTreeSet<(String, String)>,
    self_links: usize,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder with every note in `corpus` and every link that
    /// resolves to another note in the same corpus.
    ///
    /// Isolated notes are kept as nodes. Links that resolve nowhere are
    /// dropped; they never create nodes.
    #[must_use]
    #[instrument(skip(corpus), fields(notes = corpus.len()))]
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut builder = Self::new();
        for item in corpus.items() {
            builder.add_titled_node(item.id.as_str(), item.title.as_str());
        }
        for item in corpus.items() {
            for target in corpus.resolved_links(item) {
                builder.add_edge(item.id.as_str(), target);
            }
        }
        builder
    }

    /// Add a node without a title. Re-adding an existing node is a no-op.
    pub fn add_node(&mut self, id: impl Into<String>) -> &mut Self {
        self.titles.entry(id.into()).or_insert(None);
        self
    }

    /// Add a node with a display title, replacing any earlier title.
    pub fn add_titled_node(&mut self, id: impl Into<String>, title: impl Into<String>) -> &mut Self {
        self.titles.insert(id.into(), Some(title.into()));
        self
    }

    /// Add a directed link. Endpoints become nodes; duplicates and
    /// self-links are ignored.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        let source = source.into();
        let target = target.into();
        self.titles.entry(source.clone()).or_insert(None);
        self.titles.entry(target.clone()).or_insert(None);
        if source == target {
            self.self_links += 1;
        } else {
            self.edges.insert((source, target));
        }
        self
    }

    /// Freeze into an immutable [`KnowledgeGraph`].
    #[must_use]
    pub fn build(self) -> KnowledgeGraph {
        let content_hash = compute_content_hash(self.titles.keys(), &self.edges);

        let mut graph = DiGraph::<String, ()>::with_capacity(self.titles.len(), self.edges.len());
        let mut node_map = HashMap::with_capacity(self.titles.len());
        let mut titles = HashMap::new();

        // BTreeMap iteration is sorted, so NodeIndex order == id order.
        for (id, title) in self.titles {
            let idx = graph.add_node(id.clone());
            if let Some(title) = title {
                titles.insert(id.clone(), title);
            }
            node_map.insert(id, idx);
        }

        for (source, target) in &self.edges {
            let (Some(&a), Some(&b)) = (node_map.get(source), node_map.get(target)) else {
                continue;
            };
            graph.add_edge(a, b, ());
        }

        if self.self_links > 0 {
            debug!(self_links = self.self_links, "dropped self-links");
        }

        let undirected = UndirectedView::from_digraph(&graph);

        KnowledgeGraph {
            graph,
            node_map,
            titles,
            undirected,
            content_hash,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash of the sorted node and edge lists.
fn compute_content_hash<'a>(
    nodes: impl Iterator<Item = &'a String>,
    edges: &BTreeSet<(String, String)>,
) -> String {
    let mut hasher = blake3::Hasher::new();
    for id in nodes {
        hasher.update(id.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (source, target) in edges {
        hasher.update(source.as_bytes());
        hasher.update(b"\x00");
        hasher.update(target.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use notegraph_core::model::{ContentItem, RawLink};

    #[test]
    fn empty_builder_produces_empty_graph() {
        let g = GraphBuilder::new().build();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        // Hash of empty graph is stable.
        assert!(g.content_hash().starts_with("blake3:"));
    }

    #[test]
    fn edge_endpoints_become_nodes() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b")]);
        assert_eq!(g.node_count(), 2);
        assert!(g.contains("a"));
        assert!(g.contains("b"));
        assert_eq!(g.title("b"), "b", "title falls back to id");
    }

    #[test]
    fn node_indices_follow_sorted_ids() {
        let g = KnowledgeGraph::from_edges(&["zeta", "alpha"], &[("mid", "alpha")]);
        let ids: Vec<&str> = g.ids().collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
        assert_eq!(g.index_of("mid"), Some(1));
        assert_eq!(g.id(2), "zeta");
    }

    #[test]
    fn duplicate_edges_not_added() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("a", "b")]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn self_links_are_dropped_but_node_kept() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "a"), ("a", "b")]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.undirected().neighbors(0), &[1]);
    }

    #[test]
    fn edge_direction_is_preserved() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b")]);
        let a = g.index_of("a").expect("a");
        let b = g.index_of("b").expect("b");
        assert_eq!(g.successors(a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(g.predecessors(a).count(), 0);
        assert_eq!(g.in_degree(b), 1);
        assert_eq!(g.out_degree(b), 0);
    }

    #[test]
    fn content_hash_is_order_independent_and_structure_sensitive() {
        let g1 = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c")]);
        let g2 = KnowledgeGraph::from_edges(&[], &[("b", "c"), ("a", "b")]);
        let g3 = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("c", "b")]);
        assert_eq!(g1.content_hash(), g2.content_hash());
        assert_ne!(g1.content_hash(), g3.content_hash());
    }

    #[test]
    fn corpus_links_only_resolve_inside_corpus() {
        let corpus = Corpus::new(vec![
            ContentItem::new("index")
                .with_title("Home")
                .with_link(RawLink::wiki("rust"))
                .with_link(RawLink::wiki("unknown")),
            ContentItem::new("notes/rust").with_link(RawLink::markdown("../index.md")),
            ContentItem::new("orphan"),
        ]);
        let g = KnowledgeGraph::from_corpus(&corpus);

        assert_eq!(g.node_count(), 3, "isolated notes are nodes; unknown links are not");
        assert_eq!(g.edges(), vec![("index", "notes/rust"), ("notes/rust", "index")]);
        assert_eq!(g.title("index"), "Home");
        assert_eq!(g.undirected().edge_count(), 1);
    }
}
