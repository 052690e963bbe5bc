//! `notegraph stats`: structural properties and degree extremes.

use std::io::Write;
use std::path::Path;

use clap::Args;
use notegraph_analytics::{GraphProperties, KnowledgeGraph};
use serde::Serialize;

use super::{CorpusArgs, load_project};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_rule, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Entries listed for each degree extreme (overrides `[report] top_n`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// A note and one of its degree counts.
#[derive(Debug, Serialize)]
pub struct DegreeEntry {
    pub id: String,
    pub title: String,
    pub degree: usize,
}

/// Output of `notegraph stats`.
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub graph_hash: String,
    /// Links whose target matches no note.
    pub dangling_links: usize,
    pub properties: GraphProperties,
    /// Most linked-to notes (in-degree).
    pub most_linked: Vec<DegreeEntry>,
    /// Notes with the most outgoing links.
    pub most_linking: Vec<DegreeEntry>,
}

/// Execute `notegraph stats`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or output fails.
pub fn run_stats(
    args: &StatsArgs,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let project = load_project(&args.corpus.root, config_path, output)?;
    let g = &project.graph;
    let n = args.top.unwrap_or(project.config.report.top_n);

    let stats = StatsOutput {
        graph_hash: g.content_hash().to_string(),
        dangling_links: project.corpus.dangling_link_count(),
        properties: GraphProperties::compute(g),
        most_linked: extremes(g, n, |i| g.in_degree(i)),
        most_linking: extremes(g, n, |i| g.out_degree(i)),
    };

    render_mode(output, &stats, render_stats_text, render_stats_pretty)
}

/// The `n` nodes with the largest non-zero `degree`, ties by id.
fn extremes(g: &KnowledgeGraph, n: usize, degree: impl Fn(usize) -> usize) -> Vec<DegreeEntry> {
    let mut entries: Vec<(usize, usize)> = (0..g.node_count())
        .map(|i| (i, degree(i)))
        .filter(|&(_, d)| d > 0)
        .collect();
    // Indices follow id order, so a stable sort keeps ties by id.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
        .into_iter()
        .map(|(i, d)| {
            let id = g.id(i);
            DegreeEntry {
                id: id.to_string(),
                title: g.title(id).to_string(),
                degree: d,
            }
        })
        .collect()
}

fn render_stats_text(s: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let p = &s.properties;
    writeln!(w, "graph_hash\t{}", s.graph_hash)?;
    writeln!(w, "notes\t{}", p.node_count)?;
    writeln!(w, "links\t{}", p.edge_count)?;
    writeln!(w, "undirected_links\t{}", p.undirected_edge_count)?;
    writeln!(w, "dangling_links\t{}", s.dangling_links)?;
    writeln!(w, "density\t{}", fmt_score(p.density))?;
    writeln!(w, "diameter\t{}", p.diameter)?;
    writeln!(w, "average_path_length\t{}", fmt_score(p.average_path_length))?;
    writeln!(w, "components\t{}", p.component_count)?;
    writeln!(w, "largest_component\t{}", p.largest_component)?;
    writeln!(w, "isolated\t{}", p.isolated_node_count)?;
    for e in &s.most_linked {
        writeln!(w, "most_linked\t{}\t{}", e.id, e.degree)?;
    }
    for e in &s.most_linking {
        writeln!(w, "most_linking\t{}\t{}", e.id, e.degree)?;
    }
    Ok(())
}

fn render_stats_pretty(s: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let p = &s.properties;
    pretty_section(w, "Knowledge graph")?;
    pretty_kv(w, "notes", p.node_count.to_string())?;
    pretty_kv(
        w,
        "links",
        format!("{} ({} undirected)", p.edge_count, p.undirected_edge_count),
    )?;
    pretty_kv(w, "dangling links", s.dangling_links.to_string())?;
    pretty_kv(w, "density", format!("{:.4}", p.density))?;
    pretty_kv(w, "diameter", p.diameter.to_string())?;
    pretty_kv(w, "avg path length", format!("{:.3}", p.average_path_length))?;
    pretty_kv(w, "components", p.component_count.to_string())?;
    pretty_kv(w, "largest component", p.largest_component.to_string())?;
    pretty_kv(w, "isolated notes", p.isolated_node_count.to_string())?;
    pretty_kv(w, "hash", &s.graph_hash)?;

    for (heading, entries) in [
        ("Most linked", &s.most_linked),
        ("Most linking", &s.most_linking),
    ] {
        writeln!(w)?;
        pretty_section(w, heading)?;
        if entries.is_empty() {
            writeln!(w, "  (no links)")?;
        }
        for e in entries {
            writeln!(w, "  {:>4}  {}", e.degree, e.title)?;
        }
    }
    pretty_rule(w)
}
