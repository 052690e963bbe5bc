//! Community detection on the undirected link view.
//!
//! Given a knowledge graph, find groups of notes that link among
//! themselves more than they link outward.
//!
//! ## Algorithms
//!
//! ### Louvain-style local moving
//!
//! [`Louvain`] starts with every note alone and repeatedly moves each note
//! into the neighboring community it has the most links to. The gain
//! function is the simple link-count difference, not the textbook modularity
//! gain, and there is no aggregation phase. See [`louvain`] for details.
//!
//! ### Label propagation
//!
//! [`LabelPropagation`] lets every note adopt the most common label among
//! its neighbors until labels stop changing. See [`label_prop`].
//!
//! Both process notes in sorted id order and break ties toward the lowest
//! community id / label, so a given graph always yields the same partition.
//!
//! ## Scoring
//!
//! [`modularity`](modularity::modularity) scores any partition;
//! [`analysis`] reports per-community size, edge counts and density.

use notegraph_core::config::{CommunityMethod, CommunitySection};
use serde::Serialize;

use crate::graph::KnowledgeGraph;

pub mod analysis;
pub mod label_prop;
pub mod louvain;
pub mod modularity;

pub use analysis::{CommunityStats, analyze_communities};
pub use label_prop::LabelPropagation;
pub use louvain::Louvain;
pub use modularity::modularity;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for [`detect_communities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommunityConfig {
    /// Maximum number of full passes over all notes. Default: 100.
    pub max_iter: usize,
    /// Algorithm to run. Default: [`CommunityMethod::Louvain`].
    pub method: CommunityMethod,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            max_iter: 100,
            method: CommunityMethod::Louvain,
        }
    }
}

impl From<&CommunitySection> for CommunityConfig {
    fn from(section: &CommunitySection) -> Self {
        Self {
            max_iter: section.max_iter,
            method: section.method,
        }
    }
}

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// A partition of the graph's notes into communities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Communities, largest first (ties by first member id). Members are
    /// sorted ids. Every note appears in exactly one community.
    pub communities: Vec<Vec<String>>,
    /// Passes performed.
    pub iterations: usize,
    /// Whether a pass completed without any change before `max_iter`.
    pub converged: bool,
}

impl Partition {
    /// Group notes by a per-index label vector.
    ///
    /// Labels only need to be equal within a community; their values are
    /// discarded. Empty groups cannot occur.
    #[must_use]
    pub fn from_labels(
        g: &KnowledgeGraph,
        labels: &[usize],
        iterations: usize,
        converged: bool,
    ) -> Self {
        let mut groups: std::collections::BTreeMap<usize, Vec<String>> =
            std::collections::BTreeMap::new();
        for (i, &label) in labels.iter().enumerate() {
            groups.entry(label).or_default().push(g.id(i).to_string());
        }

        let mut communities: Vec<Vec<String>> = groups.into_values().collect();
        // Members were pushed in index order, which is sorted id order.
        communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

        Self {
            communities,
            iterations,
            converged,
        }
    }

    /// Number of communities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// Return `true` if there are no communities (empty graph).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Position of the community containing `id`.
    #[must_use]
    pub fn community_of(&self, id: &str) -> Option<usize> {
        self.communities
            .iter()
            .position(|members| members.binary_search_by(|m| m.as_str().cmp(id)).is_ok())
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// A community detection algorithm over a [`KnowledgeGraph`].
pub trait CommunityDetection {
    /// Partition the graph's notes.
    fn detect(&self, g: &KnowledgeGraph) -> Partition;
}

/// Run the configured community detection algorithm.
#[must_use]
pub fn detect_communities(g: &KnowledgeGraph, config: &CommunityConfig) -> Partition {
    match config.method {
        CommunityMethod::Louvain => Louvain::new().with_max_iter(config.max_iter).detect(g),
        CommunityMethod::LabelPropagation => LabelPropagation::new()
            .with_max_iter(config.max_iter)
            .detect(g),
    }
}
