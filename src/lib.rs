//! ldifgraph — turn LDIF directory dumps into a relationship graph.
//!
//! Parses LDIF (RFC 2849) entries, derives directed edges from membership
//! and manager attributes, and exports the result as Gephi-ready CSV or
//! GEXF files.

pub mod cli;
pub mod export;
pub mod graph;
pub mod ldif;
pub mod types;

// Re-export commonly used types at the crate root
pub use export::{CsvExporter, GexfExporter};
pub use graph::{DanglingPolicy, DirectoryGraph, GraphBuilder};
pub use ldif::{normalize_dn, rdn_value, LdifReader};
pub use types::{
    Edge, Entry, LdifError, LdifResult, Node, NodeKind, RelationKind,
    COMMON_MEMBERSHIP_ATTRIBUTES, DEFAULT_MEMBERSHIP_ATTRIBUTES, MANAGER_ATTRIBUTE,
};
