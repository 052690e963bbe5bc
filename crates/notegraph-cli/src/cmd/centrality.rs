//! `notegraph centrality`: rank notes by one centrality measure.

use std::collections::HashMap;
use std::path::Path;

use clap::{Args, ValueEnum};
use notegraph_analytics::KnowledgeGraph;
use notegraph_analytics::metrics::betweenness::betweenness_centrality;
use notegraph_analytics::metrics::closeness::{closeness_centrality, harmonic_centrality};
use notegraph_analytics::metrics::clustering::clustering_coefficients;
use notegraph_analytics::metrics::degree::degree_centrality;
use notegraph_analytics::metrics::eigenvector::{EigenvectorConfig, eigenvector_centrality};
use notegraph_analytics::metrics::katz::{KatzConfig, katz_centrality};
use notegraph_analytics::metrics::pagerank::{PageRankConfig, pagerank};
use notegraph_analytics::report::{RankedNote, rank};
use notegraph_core::AnalysisConfig;
use serde::Serialize;

use super::{CorpusArgs, load_project, write_ranked_pretty, write_ranked_text};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Centrality measure to rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Degree,
    Pagerank,
    Betweenness,
    Closeness,
    Harmonic,
    Eigenvector,
    Katz,
    Clustering,
}

impl Metric {
    const fn label(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Pagerank => "pagerank",
            Self::Betweenness => "betweenness",
            Self::Closeness => "closeness",
            Self::Harmonic => "harmonic",
            Self::Eigenvector => "eigenvector",
            Self::Katz => "katz",
            Self::Clustering => "clustering",
        }
    }
}

#[derive(Args, Debug)]
pub struct CentralityArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Measure to rank by.
    #[arg(long, value_enum, default_value_t = Metric::Pagerank)]
    pub metric: Metric,

    /// Notes to list (overrides `[report] top_n`; 0 lists every note).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Output of `notegraph centrality`.
#[derive(Debug, Serialize)]
pub struct CentralityOutput {
    pub metric: Metric,
    /// Iterations run, for iterative measures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converged: Option<bool>,
    pub scores: Vec<RankedNote>,
}

/// Raw scores for one measure plus convergence info where it applies.
struct Scores {
    values: HashMap<String, f64>,
    iterations: Option<usize>,
    converged: Option<bool>,
}

impl Scores {
    const fn plain(values: HashMap<String, f64>) -> Self {
        Self {
            values,
            iterations: None,
            converged: None,
        }
    }
}

fn compute(g: &KnowledgeGraph, metric: Metric, config: &AnalysisConfig) -> Scores {
    match metric {
        Metric::Degree => Scores::plain(degree_centrality(g).total_scores()),
        Metric::Pagerank => {
            let pr = pagerank(g, &PageRankConfig::from(&config.pagerank));
            Scores {
                values: pr.scores,
                iterations: Some(pr.iterations),
                converged: Some(pr.converged),
            }
        }
        Metric::Betweenness => Scores::plain(betweenness_centrality(g)),
        Metric::Closeness => Scores::plain(closeness_centrality(g)),
        Metric::Harmonic => Scores::plain(harmonic_centrality(g)),
        Metric::Eigenvector => {
            let ev = eigenvector_centrality(g, &EigenvectorConfig::from(&config.eigenvector));
            Scores {
                values: ev.scores,
                iterations: Some(ev.iterations),
                converged: Some(ev.converged),
            }
        }
        Metric::Katz => Scores::plain(katz_centrality(g, &KatzConfig::from(&config.katz))),
        Metric::Clustering => Scores::plain(clustering_coefficients(g).local),
    }
}

/// Execute `notegraph centrality`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or output fails.
pub fn run_centrality(
    args: &CentralityArgs,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let project = load_project(&args.corpus.root, config_path, output)?;
    let g = &project.graph;

    let n = match args.top.unwrap_or(project.config.report.top_n) {
        0 => g.node_count(),
        n => n,
    };

    let scores = compute(g, args.metric, &project.config);
    let result = CentralityOutput {
        metric: args.metric,
        iterations: scores.iterations,
        converged: scores.converged,
        scores: rank(g, &scores.values, n),
    };

    render_mode(
        output,
        &result,
        |r, w| write_ranked_text(w, r.metric.label(), &r.scores),
        |r, w| {
            pretty_section(w, &format!("{} centrality", r.metric.label()))?;
            if let (Some(iterations), Some(converged)) = (r.iterations, r.converged) {
                let status = if converged { "converged" } else { "not converged" };
                writeln!(w, "  {iterations} iterations, {status}")?;
            }
            write_ranked_pretty(w, &r.scores)
        },
    )
}
