//! Gephi CSV export — a nodes file and an edges file.
//!
//! Gephi's spreadsheet importer expects `Id,Label,...` for nodes and
//! `Source,Target,...` for edges; node DNs serve as the Id values.

use std::io::Write;
use std::path::Path;

use crate::graph::DirectoryGraph;
use crate::types::{LdifError, LdifResult};

/// Writes a graph as two Gephi-importable CSV files.
pub struct CsvExporter;

impl CsvExporter {
    /// Create a CSV exporter.
    pub fn new() -> Self {
        Self
    }

    /// Write `nodes.csv` and `edges.csv` style files to the given paths.
    pub fn write_files(
        &self,
        graph: &DirectoryGraph,
        nodes_path: &Path,
        edges_path: &Path,
    ) -> LdifResult<()> {
        self.write_nodes(graph, std::fs::File::create(nodes_path)?)?;
        self.write_edges(graph, std::fs::File::create(edges_path)?)?;
        Ok(())
    }

    /// Write the node table: `Id,Label,Type`.
    pub fn write_nodes(&self, graph: &DirectoryGraph, writer: impl Write) -> LdifResult<()> {
        let mut w = csv::Writer::from_writer(writer);
        w.write_record(["Id", "Label", "Type"])?;
        for node in graph.nodes() {
            w.write_record([node.dn.as_str(), node.label.as_str(), node.kind.label()])?;
        }
        w.flush()?;
        Ok(())
    }

    /// Write the edge table: `Source,Target,Relation`.
    pub fn write_edges(&self, graph: &DirectoryGraph, writer: impl Write) -> LdifResult<()> {
        let mut w = csv::Writer::from_writer(writer);
        w.write_record(["Source", "Target", "Relation"])?;
        for edge in graph.edges() {
            let source = graph
                .get_node(edge.source_id)
                .ok_or(LdifError::NodeNotFound(edge.source_id))?;
            let target = graph
                .get_node(edge.target_id)
                .ok_or(LdifError::NodeNotFound(edge.target_id))?;
            w.write_record([source.dn.as_str(), target.dn.as_str(), edge.kind.label()])?;
        }
        w.flush()?;
        Ok(())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}
