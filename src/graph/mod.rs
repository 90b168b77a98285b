//! In-memory relationship graph — the core data structure.

pub mod builder;
pub mod directory_graph;

pub use builder::{DanglingPolicy, GraphBuilder};
pub use directory_graph::DirectoryGraph;
