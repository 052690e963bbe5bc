//! Link graph module for knowledge-base analytics.
//!
//! # Overview
//!
//! This module turns a [`notegraph_core::Corpus`] into an immutable,
//! petgraph-backed directed link graph and derives the views every metric
//! consumes.
//!
//! ## Pipeline
//!
//! ```text
//! Corpus (notes + raw links)
//!        ↓  build::GraphBuilder::from_corpus()
//! KnowledgeGraph
//!   ├─ graph:      DiGraph, edge A → B means "A links to B"
//!   └─ undirected: views::UndirectedView, symmetric closure (cached)
//!        ↓  properties::GraphProperties::compute()
//! GraphProperties (density, diameter, components, …)
//! ```
//!
//! ## Directed vs undirected
//!
//! PageRank, eigenvector and Katz centrality read the directed graph.
//! Betweenness, closeness, harmonic, clustering, communities and paths read
//! the undirected view. Both are fixed at construction.
//!
//! ## Cache Invalidation
//!
//! [`KnowledgeGraph::content_hash`] is a BLAKE3 hash of the node and edge
//! sets. Equal hashes mean every metric result can be reused.

pub mod build;
pub mod properties;
pub mod views;

pub use build::{GraphBuilder, KnowledgeGraph};
pub use properties::{GraphProperties, connected_components};
pub use views::UndirectedView;
