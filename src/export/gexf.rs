//! GEXF 1.3 export — a single XML file Gephi opens directly.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::graph::DirectoryGraph;
use crate::types::LdifResult;

/// Node attribute ids declared in the GEXF header.
const ATTR_KIND: &str = "0";
const ATTR_DN: &str = "1";
const ATTR_PLACEHOLDER: &str = "2";

/// Writes a graph as a GEXF 1.3 document.
pub struct GexfExporter;

impl GexfExporter {
    /// Create a GEXF exporter.
    pub fn new() -> Self {
        Self
    }

    /// Write the graph to a file.
    pub fn write_file(&self, graph: &DirectoryGraph, path: &Path) -> LdifResult<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(graph, std::io::BufWriter::new(file))
    }

    /// Write the graph to any writer.
    pub fn write_to(&self, graph: &DirectoryGraph, writer: impl Write) -> LdifResult<()> {
        let mut xml = Writer::new_with_indent(writer, b' ', 2);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut gexf = BytesStart::new("gexf");
        gexf.push_attribute(("xmlns", "http://gexf.net/1.3"));
        gexf.push_attribute(("version", "1.3"));
        xml.write_event(Event::Start(gexf))?;

        let mut meta = BytesStart::new("meta");
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        meta.push_attribute(("lastmodifieddate", date.as_str()));
        xml.write_event(Event::Start(meta))?;
        xml.write_event(Event::Start(BytesStart::new("creator")))?;
        xml.write_event(Event::Text(BytesText::new("ldifgraph")))?;
        xml.write_event(Event::End(BytesEnd::new("creator")))?;
        xml.write_event(Event::End(BytesEnd::new("meta")))?;

        let mut g = BytesStart::new("graph");
        g.push_attribute(("defaultedgetype", "directed"));
        xml.write_event(Event::Start(g))?;

        // Node attribute declarations.
        let mut attrs = BytesStart::new("attributes");
        attrs.push_attribute(("class", "node"));
        xml.write_event(Event::Start(attrs))?;
        for (id, title, ty) in [
            (ATTR_KIND, "kind", "string"),
            (ATTR_DN, "dn", "string"),
            (ATTR_PLACEHOLDER, "placeholder", "boolean"),
        ] {
            let mut attr = BytesStart::new("attribute");
            attr.push_attribute(("id", id));
            attr.push_attribute(("title", title));
            attr.push_attribute(("type", ty));
            xml.write_event(Event::Empty(attr))?;
        }
        xml.write_event(Event::End(BytesEnd::new("attributes")))?;

        // Nodes.
        xml.write_event(Event::Start(BytesStart::new("nodes")))?;
        for node in graph.nodes() {
            let mut n = BytesStart::new("node");
            let id = node.id.to_string();
            n.push_attribute(("id", id.as_str()));
            n.push_attribute(("label", node.label.as_str()));
            xml.write_event(Event::Start(n))?;

            xml.write_event(Event::Start(BytesStart::new("attvalues")))?;
            for (attr_id, value) in [
                (ATTR_KIND, node.kind.name()),
                (ATTR_DN, node.dn.as_str()),
                (ATTR_PLACEHOLDER, if node.placeholder { "true" } else { "false" }),
            ] {
                let mut av = BytesStart::new("attvalue");
                av.push_attribute(("for", attr_id));
                av.push_attribute(("value", value));
                xml.write_event(Event::Empty(av))?;
            }
            xml.write_event(Event::End(BytesEnd::new("attvalues")))?;

            xml.write_event(Event::End(BytesEnd::new("node")))?;
        }
        xml.write_event(Event::End(BytesEnd::new("nodes")))?;

        // Edges.
        xml.write_event(Event::Start(BytesStart::new("edges")))?;
        for (i, edge) in graph.edges().iter().enumerate() {
            let mut e = BytesStart::new("edge");
            let id = i.to_string();
            let source = edge.source_id.to_string();
            let target = edge.target_id.to_string();
            e.push_attribute(("id", id.as_str()));
            e.push_attribute(("source", source.as_str()));
            e.push_attribute(("target", target.as_str()));
            e.push_attribute(("label", edge.kind.label()));
            xml.write_event(Event::Empty(e))?;
        }
        xml.write_event(Event::End(BytesEnd::new("edges")))?;

        xml.write_event(Event::End(BytesEnd::new("graph")))?;
        xml.write_event(Event::End(BytesEnd::new("gexf")))?;
        Ok(())
    }
}

impl Default for GexfExporter {
    fn default() -> Self {
        Self::new()
    }
}
