//! `notegraph path`: how two notes are connected.
//!
//! Always reports the shortest path. With `--all`, also lists every simple
//! path up to `--max-length` edges and summarizes their diversity.

use std::io::Write;
use std::path::Path;

use clap::Args;
use notegraph_analytics::paths::{PathConfig, PathDiversity, all_simple_paths, distance, shortest_path};
use notegraph_core::ErrorCode;
use serde::Serialize;

use super::{CorpusArgs, fail, load_project};
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Source note id (path relative to ROOT, without extension).
    pub from: String,

    /// Target note id.
    pub to: String,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Also enumerate every simple path.
    #[arg(long)]
    pub all: bool,

    /// Longest enumerated path in edges (overrides `[paths] max_length`).
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,
}

/// Output of `notegraph path`.
#[derive(Debug, Serialize)]
pub struct PathOutput {
    pub from: String,
    pub to: String,
    /// Edges on the shortest path; `None` when unreachable.
    pub distance: Option<usize>,
    pub shortest: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversity: Option<PathDiversity>,
}

/// Execute `notegraph path`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded, either note is
/// unknown, `--max-length` is zero, or output fails.
pub fn run_path(
    args: &PathArgs,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let project = load_project(&args.corpus.root, config_path, output)?;
    let g = &project.graph;

    for id in [&args.from, &args.to] {
        if !g.contains(id) {
            return fail(
                output,
                &CliError::from_code(ErrorCode::NodeNotFound, format!("note '{id}' not found")),
            );
        }
    }

    let max_length = args
        .max_length
        .unwrap_or_else(|| PathConfig::from(&project.config.paths).max_length);
    if max_length == 0 {
        return fail(
            output,
            &CliError::from_code(ErrorCode::InvalidParameter, "--max-length must be at least 1"),
        );
    }

    let (paths, diversity) = if args.all {
        let paths = all_simple_paths(g, &args.from, &args.to, max_length);
        let diversity = PathDiversity::from_paths(&paths);
        (Some(paths), Some(diversity))
    } else {
        (None, None)
    };

    let result = PathOutput {
        from: args.from.clone(),
        to: args.to.clone(),
        distance: distance(g, &args.from, &args.to),
        shortest: shortest_path(g, &args.from, &args.to),
        paths,
        diversity,
    };

    render_mode(output, &result, render_path_text, |r, w| {
        pretty_section(w, &format!("{} → {}", g.title(&r.from), g.title(&r.to)))?;
        match (&r.shortest, r.distance) {
            (Some(path), Some(d)) => {
                pretty_kv(w, "distance", d.to_string())?;
                pretty_kv(w, "shortest", path.join(" → "))?;
            }
            _ => writeln!(w, "  not connected")?,
        }
        if let Some(div) = &r.diversity {
            writeln!(w)?;
            pretty_kv(w, "simple paths", div.path_count.to_string())?;
            if div.path_count > 0 {
                pretty_kv(
                    w,
                    "lengths",
                    format!(
                        "{}..={} (avg {:.2})",
                        div.min_length, div.max_length, div.avg_length
                    ),
                )?;
                pretty_kv(w, "notes involved", div.distinct_nodes.to_string())?;
            }
        }
        if let Some(paths) = &r.paths {
            for p in paths {
                writeln!(w, "  {}", p.join(" → "))?;
            }
        }
        Ok(())
    })
}

fn render_path_text(r: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match &r.shortest {
        Some(path) => writeln!(w, "shortest\t{}", path.join(" -> "))?,
        None => writeln!(w, "shortest\tnone")?,
    }
    if let Some(div) = &r.diversity {
        writeln!(
            w,
            "diversity\t{}\t{}\t{}\t{}",
            div.path_count, div.min_length, div.max_length, div.distinct_nodes
        )?;
    }
    if let Some(paths) = &r.paths {
        for p in paths {
            writeln!(w, "path\t{}", p.join(" -> "))?;
        }
    }
    Ok(())
}
