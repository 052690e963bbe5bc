//! Subcommand handlers.
//!
//! Every analysis command follows the same shape: load the project
//! ([`load_project`]), run one or more engines on the graph, then hand a
//! serializable result to [`crate::output::render_mode`].

pub mod analyze;
pub mod bottlenecks;
pub mod centrality;
pub mod communities;
pub mod completions;
pub mod critical_paths;
pub mod export;
pub mod path;
pub mod stats;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use notegraph_analytics::KnowledgeGraph;
use notegraph_analytics::report::RankedNote;
use notegraph_core::{AnalysisConfig, Corpus, CorpusError, ErrorCode, load_config, load_corpus};
use tracing::debug;

use crate::output::{CliError, OutputMode, fmt_score, render_error};

/// Positional corpus root shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Directory containing the markdown notes.
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,
}

/// Configuration, notes and the link graph built from them.
pub struct Project {
    pub config: AnalysisConfig,
    pub corpus: Corpus,
    pub graph: KnowledgeGraph,
}

/// Load configuration and corpus for `root` and build its graph.
///
/// Failures are rendered with their error code before being returned.
///
/// # Errors
///
/// Returns an error if the config file is malformed or the corpus root
/// cannot be walked.
pub fn load_project(
    root: &Path,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<Project> {
    let config = match load_config(root, config_path) {
        Ok(c) => c,
        Err(e) => {
            render_error(
                output,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{e:#}")),
            )?;
            return Err(e);
        }
    };

    let corpus = match load_corpus(root, &config.corpus) {
        Ok(c) => c,
        Err(e) => {
            let code = e
                .downcast_ref::<CorpusError>()
                .map_or(ErrorCode::CorpusReadFailed, CorpusError::code);
            render_error(output, &CliError::from_code(code, format!("{e:#}")))?;
            return Err(e);
        }
    };

    let graph = KnowledgeGraph::from_corpus(&corpus);
    debug!(
        notes = graph.node_count(),
        links = graph.edge_count(),
        hash = graph.content_hash(),
        "graph built"
    );

    Ok(Project {
        config,
        corpus,
        graph,
    })
}

/// Render `error` and return it as a failure.
///
/// # Errors
///
/// Always returns an error carrying the message of `error`.
pub fn fail<T>(output: OutputMode, error: &CliError) -> anyhow::Result<T> {
    render_error(output, error)?;
    anyhow::bail!("{}", error.message)
}

/// One `label<TAB>rank<TAB>id<TAB>score` line per entry.
pub fn write_ranked_text(w: &mut dyn Write, label: &str, rows: &[RankedNote]) -> io::Result<()> {
    for (rank, row) in rows.iter().enumerate() {
        writeln!(w, "{label}\t{}\t{}\t{}", rank + 1, row.id, fmt_score(row.score))?;
    }
    Ok(())
}

/// Numbered table of ranked notes for pretty output.
pub fn write_ranked_pretty(w: &mut dyn Write, rows: &[RankedNote]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(w, "  (no notes)");
    }
    let width = rows.iter().map(|r| r.title.len()).max().unwrap_or(0).min(48);
    for (rank, row) in rows.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {:<width$}  {:>12}  {}",
            rank + 1,
            row.title,
            fmt_score(row.score),
            row.id,
        )?;
    }
    Ok(())
}
