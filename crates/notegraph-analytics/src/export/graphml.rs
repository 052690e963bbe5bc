//! GraphML writer.

use std::fmt::Write as FmtWrite;

use crate::export::xml_escape;
use crate::graph::KnowledgeGraph;
use crate::metrics::degree::total_degrees;

/// Render `g` as a directed GraphML document with `title` and `degree`
/// node data.
#[must_use]
pub fn to_graphml(g: &KnowledgeGraph) -> String {
    let degrees = total_degrees(g);
    let mut out = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">\n",
        "  <key id=\"title\" for=\"node\" attr.name=\"title\" attr.type=\"string\"/>\n",
        "  <key id=\"degree\" for=\"node\" attr.name=\"degree\" attr.type=\"int\"/>\n",
        "  <graph id=\"notegraph\" edgedefault=\"directed\">\n",
    ));

    for (i, id) in g.ids().enumerate() {
        let _ = writeln!(out, "    <node id=\"{}\">", xml_escape(id));
        let _ = writeln!(
            out,
            "      <data key=\"title\">{}</data>",
            xml_escape(g.title(id))
        );
        let _ = writeln!(out, "      <data key=\"degree\">{}</data>", degrees[i]);
        out.push_str("    </node>\n");
    }

    for (source, target) in g.edges() {
        let _ = writeln!(
            out,
            "    <edge source=\"{}\" target=\"{}\"/>",
            xml_escape(source),
            xml_escape(target)
        );
    }

    out.push_str("  </graph>\n</graphml>\n");
    out
}
