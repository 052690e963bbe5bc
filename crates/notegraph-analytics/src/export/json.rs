//! JSON document export.
//!
//! ```json
//! {
//!   "graph_hash": "blake3:…",
//!   "nodes": [{ "id": "…", "title": "…", "degree": 3, "in_degree": 1, "out_degree": 2 }],
//!   "edges": [{ "source": "…", "target": "…" }],
//!   "metrics": { … }
//! }
//! ```
//!
//! `metrics` is the serialized [`AnalysisReport`] and is omitted when no
//! report is supplied.

use serde::Serialize;

use crate::graph::KnowledgeGraph;
use crate::report::AnalysisReport;

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    graph_hash: &'a str,
    nodes: Vec<NodeRecord<'a>>,
    edges: Vec<EdgeRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<&'a AnalysisReport>,
}

#[derive(Debug, Serialize)]
struct NodeRecord<'a> {
    id: &'a str,
    title: &'a str,
    degree: usize,
    in_degree: usize,
    out_degree: usize,
}

#[derive(Debug, Serialize)]
struct EdgeRecord<'a> {
    source: &'a str,
    target: &'a str,
}

/// Render `g` (and optionally `report`) as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(
    g: &KnowledgeGraph,
    report: Option<&AnalysisReport>,
) -> Result<String, serde_json::Error> {
    let nodes = g
        .ids()
        .enumerate()
        .map(|(i, id)| {
            let (in_degree, out_degree) = (g.in_degree(i), g.out_degree(i));
            NodeRecord {
                id,
                title: g.title(id),
                degree: in_degree + out_degree,
                in_degree,
                out_degree,
            }
        })
        .collect();

    let edges = g
        .edges()
        .into_iter()
        .map(|(source, target)| EdgeRecord { source, target })
        .collect();

    serde_json::to_string_pretty(&GraphDocument {
        graph_hash: g.content_hash(),
        nodes,
        edges,
        metrics: report,
    })
}
