//! PageRank over the directed link graph.
//!
//! # Overview
//!
//! PageRank identifies notes a reader following links keeps arriving at.
//! Notes with high PageRank are linked from many notes, or from notes that
//! are themselves highly ranked.
//!
//! # Algorithm
//!
//! Power method on the directed adjacency:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / out_degree(u)   for each u → v
//! ```
//!
//! where `d` is the damping factor (default 0.85). Ranks start uniform at
//! `1/N`. Iteration stops when the largest per-node change falls below
//! `tolerance`, or after `max_iter` iterations, whichever comes first.
//! Hitting `max_iter` is not an error; the last iterate is returned with
//! `converged = false`.
//!
//! # Dangling Notes
//!
//! A note with no outgoing links hands its rank to nobody. Under
//! [`DanglingPolicy::Leak`] (the default) that rank is simply lost each
//! iteration, so scores sum to less than 1 whenever dangling notes exist.
//! [`DanglingPolicy::Redistribute`] instead spreads it evenly over all
//! notes, keeping the total at 1. Switching policy changes every score.

use std::collections::HashMap;

use notegraph_core::config::{DanglingPolicy, PageRankSection};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::KnowledgeGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    pub damping: f64,
    /// Convergence threshold: stop when the max absolute per-node change
    /// is below this value. Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iter: usize,
    /// Treatment of rank held by notes without outgoing links.
    /// Default: [`DanglingPolicy::Leak`].
    pub dangling: DanglingPolicy,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
            dangling: DanglingPolicy::Leak,
        }
    }
}

impl From<&PageRankSection> for PageRankConfig {
    fn from(section: &PageRankSection) -> Self {
        Self {
            damping: section.damping,
            tolerance: section.tolerance,
            max_iter: section.max_iter,
            dangling: section.dangling,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone, Serialize)]
pub struct PageRankResult {
    /// PageRank scores: note id → score.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

impl PageRankResult {
    /// Sum of all scores. Equals 1 (within tolerance) only when no rank
    /// leaked through dangling notes.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute PageRank for every note.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(g: &KnowledgeGraph, config: &PageRankConfig) -> PageRankResult {
    let n = g.node_count();

    if n == 0 {
        return PageRankResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;
    let out_degree: Vec<usize> = (0..n).map(|i| g.out_degree(i)).collect();

    // Initialize ranks uniformly.
    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling_share = match config.dangling {
            DanglingPolicy::Leak => 0.0,
            DanglingPolicy::Redistribute => {
                let mass: f64 = (0..n)
                    .filter(|&i| out_degree[i] == 0)
                    .map(|i| ranks[i])
                    .sum();
                config.damping * mass / n_f64
            }
        };

        // Reset new_ranks to the teleportation value.
        for r in &mut new_ranks {
            *r = base + dangling_share;
        }

        // Distribute rank from each note to the notes it links to.
        for (i, &deg) in out_degree.iter().enumerate() {
            if deg == 0 {
                continue;
            }
            let share = config.damping * ranks[i] / deg as f64;
            for j in g.successors(i) {
                new_ranks[j] += share;
            }
        }

        let delta = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .fold(0.0_f64, f64::max);

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        debug!(iterations, "pagerank stopped at max_iter before converging");
    }

    PageRankResult {
        scores: g.scores_by_id(&ranks),
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
