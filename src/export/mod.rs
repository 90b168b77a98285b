//! Graph exporters for external visualization tools.

pub mod csv;
pub mod gexf;

pub use csv::CsvExporter;
pub use gexf::GexfExporter;
