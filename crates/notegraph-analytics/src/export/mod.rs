//! Serializers for graphs and analysis reports.
//!
//! | Format | Function | Consumer |
//! |--------|----------|----------|
//! | GraphML | [`graphml::to_graphml`] | yEd, Cytoscape, networkx |
//! | GEXF 1.3 | [`gexf::to_gexf`] | Gephi |
//! | JSON | [`json::to_json`] | scripts, dashboards |
//! | Markdown | [`markdown::to_markdown`] | humans |
//! | HTML | [`html::to_html`] | browsers |
//!
//! The renderers are pure and return `String`; [`write_export`] adds the
//! file IO. Node order is sorted id order; the `degree` attribute is total
//! (in + out) degree.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context as _, Result};
use thiserror::Error;
use tracing::info;

use crate::graph::KnowledgeGraph;
use crate::report::AnalysisReport;

pub mod gexf;
pub mod graphml;
pub mod html;
pub mod json;
pub mod markdown;

/// Failures specific to exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown export format '{0}' (expected graphml, gexf, json, markdown or html)")]
    UnknownFormat(String),
    #[error("failed to serialize JSON export")]
    Json(#[from] serde_json::Error),
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    GraphMl,
    Gexf,
    Json,
    Markdown,
    Html,
}

impl ExportFormat {
    /// Conventional file extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::GraphMl => "graphml",
            Self::Gexf => "gexf",
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Whether rendering needs a full [`AnalysisReport`].
    #[must_use]
    pub const fn needs_report(self) -> bool {
        matches!(self, Self::Markdown | Self::Html)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GraphMl => "graphml",
            Self::Gexf => "gexf",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Html => "html",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "graphml" => Ok(Self::GraphMl),
            "gexf" => Ok(Self::Gexf),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render `g` in `format`.
///
/// The JSON document embeds `report` under `metrics` when given. Markdown
/// and HTML need a report and compute one with default settings when none
/// is passed.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if JSON serialization fails.
pub fn render(
    format: ExportFormat,
    g: &KnowledgeGraph,
    report: Option<&AnalysisReport>,
) -> Result<String, ExportError> {
    Ok(match format {
        ExportFormat::GraphMl => graphml::to_graphml(g),
        ExportFormat::Gexf => gexf::to_gexf(g),
        ExportFormat::Json => json::to_json(g, report)?,
        ExportFormat::Markdown => with_report(g, report, markdown::to_markdown),
        ExportFormat::Html => with_report(g, report, html::to_html),
    })
}

fn with_report(
    g: &KnowledgeGraph,
    report: Option<&AnalysisReport>,
    render: fn(&KnowledgeGraph, &AnalysisReport) -> String,
) -> String {
    match report {
        Some(r) => render(g, r),
        None => render(
            g,
            &AnalysisReport::run(g, &notegraph_core::AnalysisConfig::default()),
        ),
    }
}

/// Render and write to `path`.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_export(
    format: ExportFormat,
    g: &KnowledgeGraph,
    report: Option<&AnalysisReport>,
    path: &Path,
) -> Result<()> {
    let body = render(format, g, report)?;
    std::fs::write(path, body)
        .with_context(|| format!("failed to write {format} export to {}", path.display()))?;
    info!(%format, path = %path.display(), "export written");
    Ok(())
}

/// Escape a string for use in an XML attribute or text node.
#[must_use]
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing() {
        assert_eq!("GraphML".parse::<ExportFormat>().ok(), Some(ExportFormat::GraphMl));
        assert_eq!("md".parse::<ExportFormat>().ok(), Some(ExportFormat::Markdown));
        assert_eq!("HTML".parse::<ExportFormat>().ok(), Some(ExportFormat::Html));
        let err = "dot".parse::<ExportFormat>().expect_err("unknown");
        assert!(err.to_string().contains("'dot'"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for f in [
            ExportFormat::GraphMl,
            ExportFormat::Gexf,
            ExportFormat::Json,
            ExportFormat::Markdown,
            ExportFormat::Html,
        ] {
            assert_eq!(f.to_string().parse::<ExportFormat>().ok(), Some(f));
        }
    }

    #[test]
    fn escapes_all_xml_specials() {
        assert_eq!(xml_escape(r#"a&b<c>"d"'e'"#), "a&amp;b&lt;c&gt;&quot;d&quot;&apos;e&apos;");
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn write_export_creates_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("graph.graphml");
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b")]);
        write_export(ExportFormat::GraphMl, &g, None, &path).expect("write");
        let body = std::fs::read_to_string(&path).expect("read");
        assert!(body.contains("<graphml"));
    }

    #[test]
    fn write_export_reports_missing_directory() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("missing").join("graph.gexf");
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b")]);
        let err = write_export(ExportFormat::Gexf, &g, None, &path).expect_err("no dir");
        assert!(format!("{err:#}").contains("failed to write gexf export"));
    }

    #[test]
    fn html_renders_without_a_report() {
        let g = KnowledgeGraph::from_edges(&[], &[("a", "b")]);
        assert!(ExportFormat::Html.needs_report());
        let body = render(ExportFormat::Html, &g, None).expect("render");
        assert!(body.contains("<h2>Graph Properties</h2>"));
    }
}
