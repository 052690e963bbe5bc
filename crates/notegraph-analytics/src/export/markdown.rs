//! Markdown analysis report.

use std::fmt::Write as FmtWrite;

use crate::graph::KnowledgeGraph;
use crate::report::{AnalysisReport, RankedNote};

/// Render `report` as a Markdown document.
#[must_use]
pub fn to_markdown(g: &KnowledgeGraph, report: &AnalysisReport) -> String {
    let mut out = String::new();
    let p = &report.properties;

    let _ = writeln!(out, "# Knowledge Graph Analysis\n");
    let _ = writeln!(
        out,
        "_Generated {} · graph `{}`_\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.graph_hash
    );

    let _ = writeln!(out, "## Graph Properties\n");
    let _ = writeln!(out, "| Property | Value |");
    let _ = writeln!(out, "|----------|-------|");
    let _ = writeln!(out, "| Notes | {} |", p.node_count);
    let _ = writeln!(out, "| Links | {} |", p.edge_count);
    let _ = writeln!(out, "| Density | {:.4} |", p.density);
    let _ = writeln!(out, "| Diameter | {} |", p.diameter);
    let _ = writeln!(out, "| Average path length | {:.3} |", p.average_path_length);
    let _ = writeln!(out, "| Connected components | {} |", p.component_count);
    let _ = writeln!(out, "| Largest component | {} |", p.largest_component);
    let _ = writeln!(out, "| Isolated notes | {} |", p.isolated_node_count);
    let _ = writeln!(out, "| Global clustering | {:.4} |", report.clustering.global);
    out.push('\n');

    let c = &report.centrality;
    let _ = writeln!(out, "## Centrality (top {})\n", report.top_n);
    ranked_table(&mut out, "Degree", &c.degree);
    ranked_table(&mut out, "PageRank", &c.pagerank);
    ranked_table(&mut out, "Betweenness", &c.betweenness);
    ranked_table(&mut out, "Closeness", &c.closeness);
    ranked_table(&mut out, "Harmonic", &c.harmonic);
    ranked_table(&mut out, "Eigenvector", &c.eigenvector);
    ranked_table(&mut out, "Katz", &c.katz);
    ranked_table(&mut out, "Clustering", &report.clustering.top);

    let cm = &report.communities;
    let _ = writeln!(out, "## Communities\n");
    let _ = writeln!(
        out,
        "{} communities, modularity {:.4}.\n",
        cm.count, cm.modularity
    );
    if !cm.communities.is_empty() {
        let _ = writeln!(out, "| # | Size | Internal | External | Density | Members |");
        let _ = writeln!(out, "|---|------|----------|----------|---------|---------|");
        for stats in &cm.communities {
            let members: Vec<&str> = stats.members.iter().map(|id| g.title(id)).collect();
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {:.3} | {} |",
                stats.id + 1,
                stats.size,
                stats.internal_edges,
                stats.external_edges,
                stats.density,
                cell(&members.join(", "))
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Bottlenecks\n");
    if report.bottlenecks.is_empty() {
        let _ = writeln!(out, "_None above threshold._\n");
    } else {
        let _ = writeln!(out, "| Note | Betweenness | Degree | Impact |");
        let _ = writeln!(out, "|------|-------------|--------|--------|");
        for b in &report.bottlenecks {
            let _ = writeln!(
                out,
                "| {} | {:.4} | {} | {} |",
                cell(g.title(&b.id)),
                b.betweenness,
                b.degree,
                b.impact
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Critical Paths\n");
    if report.critical_paths.is_empty() {
        let _ = writeln!(out, "_No hub-to-hub paths with intermediaries._");
    } else {
        for cp in &report.critical_paths {
            let route: Vec<&str> = cp.path.iter().map(|id| g.title(id)).collect();
            let _ = writeln!(
                out,
                "- {} (length {}, avg intermediate degree {:.2})",
                route.join(" → "),
                cp.length,
                cp.avg_intermediate_degree
            );
        }
    }

    out
}

fn ranked_table(out: &mut String, heading: &str, rows: &[RankedNote]) {
    let _ = writeln!(out, "### {heading}\n");
    if rows.is_empty() {
        let _ = writeln!(out, "_No notes._\n");
        return;
    }
    let _ = writeln!(out, "| Rank | Note | Score |");
    let _ = writeln!(out, "|------|------|-------|");
    for (rank, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "| {} | {} | {:.4} |", rank + 1, cell(&row.title), row.score);
    }
    out.push('\n');
}

/// Keep table cells on one line and free of column separators.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegraph_core::AnalysisConfig;

    #[test]
    fn report_sections_present() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "d")]);
        let report = AnalysisReport::run(&g, &AnalysisConfig::default());
        let md = to_markdown(&g, &report);
        for heading in [
            "# Knowledge Graph Analysis",
            "## Graph Properties",
            "### PageRank",
            "### Katz",
            "## Communities",
            "## Bottlenecks",
            "## Critical Paths",
        ] {
            assert!(md.contains(heading), "missing {heading}");
        }
        assert!(md.contains("| Notes | 4 |"));
    }

    #[test]
    fn pipes_in_titles_are_escaped() {
        assert_eq!(cell("a|b\nc"), "a\\|b c");
    }

    #[test]
    fn empty_graph_renders() {
        let g = KnowledgeGraph::from_edges(&[], &[]);
        let report = AnalysisReport::run(&g, &AnalysisConfig::default());
        let md = to_markdown(&g, &report);
        assert!(md.contains("_No notes._"));
        assert!(md.contains("_None above threshold._"));
    }
}
