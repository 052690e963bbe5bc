//! Standalone HTML analysis report.
//!
//! Same sections as the Markdown report, as a single self-contained page
//! with inline styles. Every piece of note text goes through
//! [`xml_escape`].

use std::fmt::Write as FmtWrite;

use super::xml_escape;
use crate::graph::KnowledgeGraph;
use crate::report::{AnalysisReport, RankedNote};

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:60rem;margin:2rem auto;\
padding:0 1rem;color:#222}table{border-collapse:collapse;margin-bottom:1.5rem}\
th,td{border:1px solid #ccc;padding:.25rem .6rem;text-align:left}\
th{background:#f3f3f3}td.num{text-align:right;font-variant-numeric:tabular-nums}\
.muted{color:#666;font-style:italic}";

/// Render `report` as an HTML document.
#[must_use]
pub fn to_html(g: &KnowledgeGraph, report: &AnalysisReport) -> String {
    let mut out = String::new();
    let p = &report.properties;

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>Knowledge Graph Analysis</title>");
    let _ = writeln!(out, "<style>{STYLE}</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<h1>Knowledge Graph Analysis</h1>");
    let _ = writeln!(
        out,
        "<p class=\"muted\">Generated {} · graph <code>{}</code></p>",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        xml_escape(&report.graph_hash)
    );

    let _ = writeln!(out, "<h2>Graph Properties</h2>");
    let _ = writeln!(out, "<table>");
    let _ = writeln!(out, "<tr><th>Property</th><th>Value</th></tr>");
    property_row(&mut out, "Notes", &p.node_count);
    property_row(&mut out, "Links", &p.edge_count);
    property_row(&mut out, "Density", &format!("{:.4}", p.density));
    property_row(&mut out, "Diameter", &p.diameter);
    property_row(
        &mut out,
        "Average path length",
        &format!("{:.3}", p.average_path_length),
    );
    property_row(&mut out, "Connected components", &p.component_count);
    property_row(&mut out, "Largest component", &p.largest_component);
    property_row(&mut out, "Isolated notes", &p.isolated_node_count);
    property_row(
        &mut out,
        "Global clustering",
        &format!("{:.4}", report.clustering.global),
    );
    let _ = writeln!(out, "</table>");

    let c = &report.centrality;
    let _ = writeln!(out, "<h2>Centrality (top {})</h2>", report.top_n);
    ranked_table(&mut out, "Degree", &c.degree);
    ranked_table(&mut out, "PageRank", &c.pagerank);
    ranked_table(&mut out, "Betweenness", &c.betweenness);
    ranked_table(&mut out, "Closeness", &c.closeness);
    ranked_table(&mut out, "Harmonic", &c.harmonic);
    ranked_table(&mut out, "Eigenvector", &c.eigenvector);
    ranked_table(&mut out, "Katz", &c.katz);
    ranked_table(&mut out, "Clustering", &report.clustering.top);

    let cm = &report.communities;
    let _ = writeln!(out, "<h2>Communities</h2>");
    let _ = writeln!(
        out,
        "<p>{} communities, modularity {:.4}.</p>",
        cm.count, cm.modularity
    );
    if !cm.communities.is_empty() {
        let _ = writeln!(out, "<table>");
        let _ = writeln!(
            out,
            "<tr><th>#</th><th>Size</th><th>Internal</th><th>External</th>\
             <th>Density</th><th>Members</th></tr>"
        );
        for stats in &cm.communities {
            let members: Vec<&str> = stats.members.iter().map(|id| g.title(id)).collect();
            let _ = writeln!(
                out,
                "<tr><td class=\"num\">{}</td><td class=\"num\">{}</td>\
                 <td class=\"num\">{}</td><td class=\"num\">{}</td>\
                 <td class=\"num\">{:.3}</td><td>{}</td></tr>",
                stats.id + 1,
                stats.size,
                stats.internal_edges,
                stats.external_edges,
                stats.density,
                xml_escape(&members.join(", "))
            );
        }
        let _ = writeln!(out, "</table>");
    }

    let _ = writeln!(out, "<h2>Bottlenecks</h2>");
    if report.bottlenecks.is_empty() {
        let _ = writeln!(out, "<p class=\"muted\">None above threshold.</p>");
    } else {
        let _ = writeln!(out, "<table>");
        let _ = writeln!(
            out,
            "<tr><th>Note</th><th>Betweenness</th><th>Degree</th><th>Impact</th></tr>"
        );
        for b in &report.bottlenecks {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td class=\"num\">{:.4}</td>\
                 <td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
                xml_escape(g.title(&b.id)),
                b.betweenness,
                b.degree,
                b.impact
            );
        }
        let _ = writeln!(out, "</table>");
    }

    let _ = writeln!(out, "<h2>Critical Paths</h2>");
    if report.critical_paths.is_empty() {
        let _ = writeln!(
            out,
            "<p class=\"muted\">No hub-to-hub paths with intermediaries.</p>"
        );
    } else {
        let _ = writeln!(out, "<ul>");
        for cp in &report.critical_paths {
            let route: Vec<&str> = cp.path.iter().map(|id| g.title(id)).collect();
            let _ = writeln!(
                out,
                "<li>{} (length {}, avg intermediate degree {:.2})</li>",
                xml_escape(&route.join(" → ")),
                cp.length,
                cp.avg_intermediate_degree
            );
        }
        let _ = writeln!(out, "</ul>");
    }

    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

fn property_row(out: &mut String, name: &str, value: &dyn std::fmt::Display) {
    let _ = writeln!(
        out,
        "<tr><td>{name}</td><td class=\"num\">{value}</td></tr>"
    );
}

fn ranked_table(out: &mut String, heading: &str, rows: &[RankedNote]) {
    let _ = writeln!(out, "<h3>{heading}</h3>");
    if rows.is_empty() {
        let _ = writeln!(out, "<p class=\"muted\">No notes.</p>");
        return;
    }
    let _ = writeln!(out, "<table>");
    let _ = writeln!(out, "<tr><th>Rank</th><th>Note</th><th>Score</th></tr>");
    for (rank, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "<tr><td class=\"num\">{}</td><td title=\"{}\">{}</td><td class=\"num\">{:.4}</td></tr>",
            rank + 1,
            xml_escape(&row.id),
            xml_escape(&row.title),
            row.score
        );
    }
    let _ = writeln!(out, "</table>");
}
