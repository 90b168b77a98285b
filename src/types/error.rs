//! Error types for the ldifgraph library.

use thiserror::Error;

/// All errors that can occur in the ldifgraph library.
#[derive(Error, Debug)]
pub enum LdifError {
    /// A line could not be split into `attribute: value`.
    #[error("Malformed LDIF line {line}: {text:?}")]
    MalformedLine { line: usize, text: String },

    /// An attribute line appeared before any `dn:` line.
    #[error("Attribute before dn at line {0}")]
    MissingDn(usize),

    /// A base64 value (`attr:: ...`) failed to decode.
    #[error("Invalid base64 value at line {0}")]
    InvalidBase64(usize),

    /// An entry with this DN is already in the graph.
    #[error("Duplicate DN: {0}")]
    DuplicateDn(String),

    /// No node with this DN exists in the graph.
    #[error("DN not found: {0}")]
    DnNotFound(String),

    /// No node with this ID exists in the graph.
    #[error("Node ID {0} not found")]
    NodeNotFound(u64),

    /// An edge pointing from a node to itself.
    #[error("Self-referencing edge on {0}")]
    SelfReference(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// GEXF export error.
    #[error("GEXF export error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Convenience result type for ldifgraph operations.
pub type LdifResult<T> = Result<T, LdifError>;
