#![forbid(unsafe_code)]
//! notegraph-analytics library.
//!
//! Every analysis is a pure function of an immutable [`KnowledgeGraph`]:
//! nothing here mutates the graph, so any number of metrics can run on the
//! same value, in any order, on any thread.
//!
//! # Conventions
//!
//! - **Errors**: Engines never fail on data shape. Empty graphs, isolated
//!   nodes and unknown ids produce zero scores, `None`, or empty results.
//!   `anyhow::Result` is reserved for IO at the export boundary.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Determinism**: Nodes are indexed in sorted id order and every pass
//!   visits them in that order, so results are reproducible run to run.

pub mod community;
pub mod export;
pub mod graph;
pub mod metrics;
pub mod paths;
pub mod report;

pub use graph::{GraphBuilder, GraphProperties, KnowledgeGraph};
pub use report::AnalysisReport;
