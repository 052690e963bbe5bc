//! `notegraph critical-paths`: hub-to-hub routes through weakly linked notes.

use std::path::Path;

use clap::Args;
use notegraph_analytics::paths::{CriticalPath, PathConfig, critical_paths};
use serde::Serialize;

use super::{CorpusArgs, load_project};
use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct CriticalPathsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Hubs considered and paths kept (overrides `[paths] critical_top_n`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Output of `notegraph critical-paths`.
#[derive(Debug, Serialize)]
pub struct CriticalPathsOutput {
    pub top_n: usize,
    pub paths: Vec<CriticalPath>,
}

/// Execute `notegraph critical-paths`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or output fails.
pub fn run_critical_paths(
    args: &CriticalPathsArgs,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let project = load_project(&args.corpus.root, config_path, output)?;
    let top_n = args
        .top
        .unwrap_or_else(|| PathConfig::from(&project.config.paths).critical_top_n);

    let result = CriticalPathsOutput {
        top_n,
        paths: critical_paths(&project.graph, top_n),
    };

    render_mode(
        output,
        &result,
        |r, w| {
            for cp in &r.paths {
                writeln!(
                    w,
                    "{}\t{:.3}\t{}",
                    cp.length,
                    cp.avg_intermediate_degree,
                    cp.path.join(" -> ")
                )?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(w, &format!("Critical paths among the top {} hubs", r.top_n))?;
            if r.paths.is_empty() {
                writeln!(w, "  (none)")?;
            }
            for (rank, cp) in r.paths.iter().enumerate() {
                let route: Vec<&str> = cp.path.iter().map(|id| project.graph.title(id)).collect();
                writeln!(
                    w,
                    "{:>3}. {}  (length {}, avg intermediate degree {:.2})",
                    rank + 1,
                    route.join(" → "),
                    cp.length,
                    cp.avg_intermediate_degree
                )?;
            }
            Ok(())
        },
    )
}
