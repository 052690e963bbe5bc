//! `notegraph export`: write the graph as GraphML, GEXF, JSON, Markdown or HTML.
//!
//! Without `--output` the document goes to stdout untouched by the output
//! mode, so it can be piped into other tools. With `--output` the file is
//! written and a short confirmation is rendered instead.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use notegraph_analytics::AnalysisReport;
use notegraph_analytics::export::{ExportFormat, render, write_export};
use notegraph_core::ErrorCode;
use serde::Serialize;

use super::{CorpusArgs, fail, load_project};
use crate::output::{CliError, OutputMode, pretty_kv, render_mode};

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Document format: graphml, gexf, json, markdown or html.
    #[arg(long, value_name = "FORMAT")]
    pub to: ExportFormat,

    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Embed the full analysis report in JSON exports.
    #[arg(long)]
    pub metrics: bool,
}

/// Confirmation rendered after writing an export file.
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub format: String,
    pub path: String,
    pub notes: usize,
    pub links: usize,
}

/// Execute `notegraph export`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded, rendering fails, or
/// the output file cannot be written.
pub fn run_export(
    args: &ExportArgs,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let project = load_project(&args.corpus.root, config_path, output)?;
    let g = &project.graph;

    let report =
        wants_report(args.to, args.metrics).then(|| AnalysisReport::run(g, &project.config));

    let Some(path) = &args.output else {
        let body = match render(args.to, g, report.as_ref()) {
            Ok(body) => body,
            Err(e) => {
                return fail(
                    output,
                    &CliError::from_code(ErrorCode::InternalUnexpected, e.to_string()),
                );
            }
        };
        let mut out = std::io::stdout().lock();
        out.write_all(body.as_bytes())?;
        if !body.ends_with('\n') {
            writeln!(out)?;
        }
        return Ok(());
    };

    if let Err(e) = write_export(args.to, g, report.as_ref(), path) {
        return fail(
            output,
            &CliError::from_code(ErrorCode::ExportWriteFailed, format!("{e:#}")),
        );
    }

    let summary = ExportSummary {
        format: args.to.to_string(),
        path: path.display().to_string(),
        notes: g.node_count(),
        links: g.edge_count(),
    };

    render_mode(
        output,
        &summary,
        |s, w| writeln!(w, "{}\t{}\t{}\t{}", s.format, s.path, s.notes, s.links),
        |s, w| {
            pretty_kv(w, "exported", &s.path)?;
            pretty_kv(w, "format", &s.format)?;
            pretty_kv(w, "graph", format!("{} notes, {} links", s.notes, s.links))
        },
    )
}

/// Markdown and HTML always render a report; JSON embeds one on request.
const fn wants_report(format: ExportFormat, metrics: bool) -> bool {
    format.needs_report() || (metrics && matches!(format, ExportFormat::Json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_metrics_flag_only_matters_for_json() {
        assert!(wants_report(ExportFormat::Markdown, false));
        assert!(wants_report(ExportFormat::Html, false));
        assert!(wants_report(ExportFormat::Json, true));
        assert!(!wants_report(ExportFormat::Json, false));
        assert!(!wants_report(ExportFormat::GraphMl, true));
    }
}
