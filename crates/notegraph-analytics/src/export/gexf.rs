//! GEXF 1.3 writer for Gephi.

use std::fmt::Write as FmtWrite;

use crate::export::xml_escape;
use crate::graph::KnowledgeGraph;
use crate::metrics::degree::total_degrees;

/// Render `g` as a static, directed GEXF 1.3 document.
///
/// Node attributes: `title` (string) and `degree` (integer). Edge ids run
/// from 0 in sorted edge order.
#[must_use]
pub fn to_gexf(g: &KnowledgeGraph) -> String {
    let degrees = total_degrees(g);
    let mut out = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<gexf xmlns=\"http://gexf.net/1.3\" version=\"1.3\">\n",
        "  <meta>\n",
        "    <creator>notegraph</creator>\n",
        "    <description>Note link graph</description>\n",
        "  </meta>\n",
        "  <graph mode=\"static\" defaultedgetype=\"directed\">\n",
        "    <attributes class=\"node\">\n",
        "      <attribute id=\"title\" title=\"title\" type=\"string\"/>\n",
        "      <attribute id=\"degree\" title=\"degree\" type=\"integer\"/>\n",
        "    </attributes>\n",
        "    <nodes>\n",
    ));

    for (i, id) in g.ids().enumerate() {
        let title = xml_escape(g.title(id));
        let _ = writeln!(
            out,
            "      <node id=\"{}\" label=\"{title}\">",
            xml_escape(id)
        );
        out.push_str("        <attvalues>\n");
        let _ = writeln!(
            out,
            "          <attvalue for=\"title\" value=\"{title}\"/>"
        );
        let _ = writeln!(
            out,
            "          <attvalue for=\"degree\" value=\"{}\"/>",
            degrees[i]
        );
        out.push_str("        </attvalues>\n      </node>\n");
    }

    out.push_str("    </nodes>\n    <edges>\n");
    for (k, (source, target)) in g.edges().into_iter().enumerate() {
        let _ = writeln!(
            out,
            "      <edge id=\"{k}\" source=\"{}\" target=\"{}\"/>",
            xml_escape(source),
            xml_escape(target)
        );
    }
    out.push_str("    </edges>\n  </graph>\n</gexf>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_and_edges_are_listed() {
        let g = KnowledgeGraph::from_edges(&["solo"], &[("a", "b"), ("b", "c")]);
        let xml = to_gexf(&g);
        assert_eq!(xml.matches("<node ").count(), 4);
        assert_eq!(xml.matches("<edge ").count(), 2);
        assert!(xml.contains("<edge id=\"0\" source=\"a\" target=\"b\"/>"));
        assert!(xml.contains("<edge id=\"1\" source=\"b\" target=\"c\"/>"));
        assert!(xml.contains("<attvalue for=\"degree\" value=\"2\"/>"));
    }

    #[test]
    fn labels_are_escaped() {
        let mut builder = crate::GraphBuilder::new();
        builder.add_titled_node("q", "\"quoted\" <tag>");
        let g = builder.build();
        let xml = to_gexf(&g);
        assert!(xml.contains("label=\"&quot;quoted&quot; &lt;tag&gt;\""));
    }
}
