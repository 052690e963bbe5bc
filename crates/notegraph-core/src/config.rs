//! Project configuration loaded from `notegraph.toml`.
//!
//! Every field has a serde default, so a partial file (or no file at all)
//! yields a usable configuration. Engine-level config structs in
//! `notegraph-analytics` convert from these sections.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the corpus root when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "notegraph.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub pagerank: PageRankSection,
    #[serde(default)]
    pub eigenvector: EigenvectorSection,
    #[serde(default)]
    pub katz: KatzSection,
    #[serde(default)]
    pub community: CommunitySection,
    #[serde(default)]
    pub paths: PathSection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
        }
    }
}

/// What PageRank does with rank held by nodes that link nowhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DanglingPolicy {
    /// Dangling rank is dropped each iteration; totals sum to less than 1.
    #[default]
    Leak,
    /// Dangling rank is spread uniformly over all nodes; totals stay at 1.
    Redistribute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankSection {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub dangling: DanglingPolicy,
}

impl Default for PageRankSection {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
            dangling: DanglingPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorSection {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for EigenvectorSection {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KatzSection {
    #[serde(default = "default_katz_alpha")]
    pub alpha: f64,
    #[serde(default = "default_katz_beta")]
    pub beta: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for KatzSection {
    fn default() -> Self {
        Self {
            alpha: default_katz_alpha(),
            beta: default_katz_beta(),
            max_iter: default_max_iter(),
        }
    }
}

/// Which community detection algorithm the report runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommunityMethod {
    #[default]
    Louvain,
    LabelPropagation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySection {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default)]
    pub method: CommunityMethod,
}

impl Default for CommunitySection {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            method: CommunityMethod::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSection {
    #[serde(default = "default_max_path_length")]
    pub max_length: usize,
    #[serde(default = "default_bottleneck_threshold")]
    pub bottleneck_threshold: f64,
    #[serde(default = "default_top_n")]
    pub critical_top_n: usize,
}

impl Default for PathSection {
    fn default() -> Self {
        Self {
            max_length: default_max_path_length(),
            bottleneck_threshold: default_bottleneck_threshold(),
            critical_top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

/// Load configuration for a corpus.
///
/// An explicit path must exist. Without one, `notegraph.toml` in
/// `corpus_root` is used when present, otherwise defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`AnalysisConfig`].
pub fn load_config(corpus_root: &Path, explicit: Option<&Path>) -> Result<AnalysisConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = corpus_root.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                return Ok(AnalysisConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "target".to_string(),
    ]
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_katz_alpha() -> f64 {
    0.1
}

const fn default_katz_beta() -> f64 {
    1.0
}

const fn default_max_path_length() -> usize {
    5
}

const fn default_bottleneck_threshold() -> f64 {
    0.1
}

const fn default_top_n() -> usize {
    10
}
