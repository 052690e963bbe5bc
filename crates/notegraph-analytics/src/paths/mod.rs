//! Path analysis on the undirected link view.
//!
//! # Overview
//!
//! | Query | Module | Result |
//! |-------|--------|--------|
//! | shortest path / distance | [`shortest`] | `Option<Vec<String>>` / `Option<usize>` |
//! | bounded simple paths | [`shortest`] | every simple path up to `max_length` edges |
//! | bottlenecks | [`bottleneck`] | high-betweenness notes with a `degree²` impact score |
//! | critical paths | [`critical`] | hub-to-hub paths through low-degree notes |
//! | path diversity | [`diversity`] | count and length spread of simple paths |
//!
//! Unknown ids never fail: they give `None` or empty results.

use notegraph_core::config::PathSection;

pub mod bottleneck;
pub mod critical;
pub mod diversity;
pub mod shortest;

pub use bottleneck::{Bottleneck, bottlenecks_from_scores, find_bottlenecks};
pub use critical::{CriticalPath, critical_paths};
pub use diversity::{PathDiversity, path_diversity};
pub use shortest::{all_simple_paths, distance, shortest_path};

/// Parameters for path queries.
#[derive(Debug, Clone, PartialEq)]
pub struct PathConfig {
    /// Maximum edges in an enumerated simple path. Default: 5.
    pub max_length: usize,
    /// Minimum normalized betweenness for a bottleneck. Default: 0.1.
    pub bottleneck_threshold: f64,
    /// Hub count and result count for critical paths. Default: 10.
    pub critical_top_n: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_length: 5,
            bottleneck_threshold: 0.1,
            critical_top_n: 10,
        }
    }
}

impl From<&PathSection> for PathConfig {
    fn from(section: &PathSection) -> Self {
        Self {
            max_length: section.max_length,
            bottleneck_threshold: section.bottleneck_threshold,
            critical_top_n: section.critical_top_n,
        }
    }
}
