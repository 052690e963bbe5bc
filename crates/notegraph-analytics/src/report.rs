//! Full analysis run over one graph.
//!
//! [`AnalysisReport::run`] executes every engine with the configured
//! parameters and keeps the top-ranked notes per measure. The JSON,
//! Markdown and HTML exporters all consume it, as does the CLI `analyze`
//! command.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use notegraph_core::AnalysisConfig;
use notegraph_core::config::CommunityMethod;
use serde::Serialize;
use tracing::{info, instrument};

use crate::community::{self, CommunityConfig, CommunityStats};
use crate::graph::{GraphProperties, KnowledgeGraph};
use crate::metrics::{
    betweenness::betweenness_centrality,
    closeness::{closeness_centrality, harmonic_centrality},
    clustering::clustering_coefficients,
    degree::degree_centrality,
    eigenvector::{EigenvectorConfig, eigenvector_centrality},
    katz::{KatzConfig, katz_centrality},
    pagerank::{PageRankConfig, pagerank},
    top_n,
};
use crate::paths::{Bottleneck, CriticalPath, PathConfig, bottlenecks_from_scores, critical_paths};

/// One entry of a ranked list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNote {
    pub id: String,
    pub title: String,
    pub score: f64,
}

/// Top-ranked notes per centrality measure.
#[derive(Debug, Clone, Serialize)]
pub struct CentralitySummary {
    pub degree: Vec<RankedNote>,
    pub pagerank: Vec<RankedNote>,
    pub pagerank_iterations: usize,
    pub pagerank_converged: bool,
    pub betweenness: Vec<RankedNote>,
    pub closeness: Vec<RankedNote>,
    pub harmonic: Vec<RankedNote>,
    pub eigenvector: Vec<RankedNote>,
    pub eigenvector_converged: bool,
    pub katz: Vec<RankedNote>,
}

/// Clustering coefficients summary.
#[derive(Debug, Clone, Serialize)]
pub struct ClusteringSummary {
    pub global: f64,
    /// Notes with the highest local coefficient.
    pub top: Vec<RankedNote>,
}

/// Detected communities with their quality and statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CommunitySummary {
    pub method: CommunityMethod,
    pub count: usize,
    pub modularity: f64,
    pub iterations: usize,
    pub converged: bool,
    pub communities: Vec<CommunityStats>,
}

/// Everything the engine computes for one graph.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Content hash of the analyzed graph.
    pub graph_hash: String,
    pub generated_at: DateTime<Utc>,
    pub top_n: usize,
    pub properties: GraphProperties,
    pub centrality: CentralitySummary,
    pub clustering: ClusteringSummary,
    pub communities: CommunitySummary,
    pub bottlenecks: Vec<Bottleneck>,
    pub critical_paths: Vec<CriticalPath>,
}

impl AnalysisReport {
    /// Run every analysis on `g`.
    #[must_use]
    #[instrument(skip(g, config), fields(nodes = g.node_count(), edges = g.edge_count()))]
    pub fn run(g: &KnowledgeGraph, config: &AnalysisConfig) -> Self {
        let n = config.report.top_n;
        let ranked = |scores: &HashMap<String, f64>| rank(g, scores, n);

        let properties = GraphProperties::compute(g);

        let degree = degree_centrality(g);
        let pr = pagerank(g, &PageRankConfig::from(&config.pagerank));
        let betweenness = betweenness_centrality(g);
        let eigen = eigenvector_centrality(g, &EigenvectorConfig::from(&config.eigenvector));
        let katz = katz_centrality(g, &KatzConfig::from(&config.katz));

        let centrality = CentralitySummary {
            degree: ranked(&degree.total_scores()),
            pagerank: ranked(&pr.scores),
            pagerank_iterations: pr.iterations,
            pagerank_converged: pr.converged,
            betweenness: ranked(&betweenness),
            closeness: ranked(&closeness_centrality(g)),
            harmonic: ranked(&harmonic_centrality(g)),
            eigenvector: ranked(&eigen.scores),
            eigenvector_converged: eigen.converged,
            katz: ranked(&katz),
        };

        let cc = clustering_coefficients(g);
        let clustering = ClusteringSummary {
            global: cc.global,
            top: ranked(&cc.local),
        };

        let community_config = CommunityConfig::from(&config.community);
        let partition = community::detect_communities(g, &community_config);
        let communities = CommunitySummary {
            method: community_config.method,
            count: partition.len(),
            modularity: community::modularity(g, &partition.communities),
            iterations: partition.iterations,
            converged: partition.converged,
            communities: community::analyze_communities(g, &partition.communities),
        };

        let paths = PathConfig::from(&config.paths);
        let bottlenecks = bottlenecks_from_scores(g, &betweenness, paths.bottleneck_threshold);
        let critical = critical_paths(g, paths.critical_top_n);

        info!(
            communities = communities.count,
            bottlenecks = bottlenecks.len(),
            critical_paths = critical.len(),
            "analysis complete"
        );

        Self {
            graph_hash: g.content_hash().to_string(),
            generated_at: Utc::now(),
            top_n: n,
            properties,
            centrality,
            clustering,
            communities,
            bottlenecks,
            critical_paths: critical,
        }
    }
}

/// Top `n` scores with display titles attached.
#[must_use]
pub fn rank(g: &KnowledgeGraph, scores: &HashMap<String, f64>, n: usize) -> Vec<RankedNote> {
    top_n(scores, n)
        .into_iter()
        .map(|(id, score)| RankedNote {
            title: g.title(&id).to_string(),
            id,
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KnowledgeGraph {
        KnowledgeGraph::from_edges(
            &["orphan"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e"), ("e", "f"), ("f", "d")],
        )
    }

    #[test]
    fn report_covers_every_section() {
        let g = sample();
        let report = AnalysisReport::run(&g, &AnalysisConfig::default());
        assert_eq!(report.graph_hash, g.content_hash());
        assert_eq!(report.properties.node_count, 7);
        assert_eq!(report.properties.component_count, 2);
        assert_eq!(report.centrality.pagerank.len(), 7);
        assert!(report.centrality.pagerank_converged);
        assert!(report.communities.count >= 2);
        let members: usize = report.communities.communities.iter().map(|c| c.size).sum();
        assert_eq!(members, 7);
    }

    #[test]
    fn bridge_nodes_lead_betweenness() {
        let g = sample();
        let report = AnalysisReport::run(&g, &AnalysisConfig::default());
        let top: Vec<&str> = report
            .centrality
            .betweenness
            .iter()
            .take(2)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(top, vec!["c", "d"]);
        let ids: Vec<&str> = report.bottlenecks.iter().map(|b| b.id.as_str()).collect();
        assert!(ids.contains(&"c") && ids.contains(&"d"));
    }

    #[test]
    fn top_n_limits_lists() {
        let g = sample();
        let mut config = AnalysisConfig::default();
        config.report.top_n = 3;
        let report = AnalysisReport::run(&g, &config);
        assert_eq!(report.top_n, 3);
        assert_eq!(report.centrality.degree.len(), 3);
        assert_eq!(report.clustering.top.len(), 3);
    }

    #[test]
    fn rank_attaches_titles() {
        let mut builder = crate::GraphBuilder::new();
        builder.add_titled_node("a", "Alpha");
        builder.add_edge("a", "b");
        let g = builder.build();
        let scores: HashMap<String, f64> =
            [("a".to_string(), 2.0), ("b".to_string(), 1.0)].into_iter().collect();
        let ranked = rank(&g, &scores, 10);
        assert_eq!(ranked[0].title, "Alpha");
        assert_eq!(ranked[1].title, "b");
    }
}
