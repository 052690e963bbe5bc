//! `notegraph analyze`: run every engine and print the full report.

use std::io::Write;
use std::path::Path;

use clap::Args;
use notegraph_analytics::AnalysisReport;
use notegraph_analytics::report::RankedNote;

use super::{CorpusArgs, load_project, write_ranked_pretty, write_ranked_text};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Notes listed per ranking (overrides `[report] top_n`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Execute `notegraph analyze`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or output fails.
pub fn run_analyze(
    args: &AnalyzeArgs,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let mut project = load_project(&args.corpus.root, config_path, output)?;
    if let Some(top) = args.top {
        project.config.report.top_n = top;
    }

    let report = AnalysisReport::run(&project.graph, &project.config);

    render_mode(output, &report, render_analyze_text, render_analyze_pretty)
}

fn render_analyze_text(r: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    let p = &r.properties;
    writeln!(w, "graph_hash\t{}", r.graph_hash)?;
    writeln!(w, "notes\t{}", p.node_count)?;
    writeln!(w, "links\t{}", p.edge_count)?;
    writeln!(w, "density\t{}", fmt_score(p.density))?;
    writeln!(w, "diameter\t{}", p.diameter)?;
    writeln!(w, "average_path_length\t{}", fmt_score(p.average_path_length))?;
    writeln!(w, "components\t{}", p.component_count)?;
    writeln!(w, "isolated\t{}", p.isolated_node_count)?;
    writeln!(w, "global_clustering\t{}", fmt_score(r.clustering.global))?;

    for (label, rows) in rankings(r) {
        write_ranked_text(w, label, rows)?;
    }

    let cm = &r.communities;
    writeln!(w, "modularity\t{}", fmt_score(cm.modularity))?;
    for c in &cm.communities {
        writeln!(w, "community\t{}\t{}\t{}", c.id, c.size, c.members.join(","))?;
    }
    for b in &r.bottlenecks {
        writeln!(w, "bottleneck\t{}\t{}\t{}", b.id, fmt_score(b.betweenness), b.impact)?;
    }
    for cp in &r.critical_paths {
        writeln!(w, "critical_path\t{}\t{}", cp.length, cp.path.join(" -> "))?;
    }
    Ok(())
}

fn render_analyze_pretty(r: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    let p = &r.properties;
    pretty_section(w, "Graph")?;
    pretty_kv(w, "notes", p.node_count.to_string())?;
    pretty_kv(w, "links", p.edge_count.to_string())?;
    pretty_kv(w, "density", format!("{:.4}", p.density))?;
    pretty_kv(w, "diameter", p.diameter.to_string())?;
    pretty_kv(w, "avg path length", format!("{:.3}", p.average_path_length))?;
    pretty_kv(
        w,
        "components",
        format!("{} (largest {})", p.component_count, p.largest_component),
    )?;
    pretty_kv(w, "isolated notes", p.isolated_node_count.to_string())?;
    pretty_kv(w, "clustering", format!("{:.4}", r.clustering.global))?;

    for (label, rows) in rankings(r) {
        writeln!(w)?;
        pretty_section(w, &format!("Top {} by {label}", r.top_n))?;
        write_ranked_pretty(w, rows)?;
    }

    let cm = &r.communities;
    writeln!(w)?;
    pretty_section(
        w,
        &format!("Communities ({}, modularity {:.4})", cm.count, cm.modularity),
    )?;
    for c in &cm.communities {
        writeln!(
            w,
            "  #{:<3} {:>4} notes  density {:.3}  {}",
            c.id + 1,
            c.size,
            c.density,
            c.members.join(", ")
        )?;
    }

    writeln!(w)?;
    pretty_section(w, &format!("Bottlenecks ({})", r.bottlenecks.len()))?;
    for b in &r.bottlenecks {
        writeln!(
            w,
            "  {:<40} betweenness {:.4}  degree {}",
            b.id, b.betweenness, b.degree
        )?;
    }

    writeln!(w)?;
    pretty_section(w, &format!("Critical paths ({})", r.critical_paths.len()))?;
    for cp in &r.critical_paths {
        writeln!(w, "  {}", cp.path.join(" → "))?;
    }
    Ok(())
}

fn rankings(r: &AnalysisReport) -> [(&'static str, &[RankedNote]); 8] {
    let c = &r.centrality;
    [
        ("degree", c.degree.as_slice()),
        ("pagerank", c.pagerank.as_slice()),
        ("betweenness", c.betweenness.as_slice()),
        ("closeness", c.closeness.as_slice()),
        ("harmonic", c.harmonic.as_slice()),
        ("eigenvector", c.eigenvector.as_slice()),
        ("katz", c.katz.as_slice()),
        ("clustering", r.clustering.top.as_slice()),
    ]
}
