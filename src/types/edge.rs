//! Relation kinds and the core edge struct.

use serde::Serialize;

/// The type of relationship between two directory entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum RelationKind {
    /// The source entry is a member of the target group.
    MemberOf = 0,
    /// The source entry's manager is the target entry.
    ReportsTo = 1,
}

impl RelationKind {
    /// Return a machine-readable name for this relation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MemberOf => "member_of",
            Self::ReportsTo => "reports_to",
        }
    }

    /// Parse a relation kind from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "member_of" | "memberof" => Some(Self::MemberOf),
            "reports_to" | "reportsto" | "manager" => Some(Self::ReportsTo),
            _ => None,
        }
    }

    /// The relation label written to Gephi exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MemberOf => "memberOf",
            Self::ReportsTo => "reportsTo",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A directed relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Source node ID (the member, or the person who reports).
    pub source_id: u64,
    /// Target node ID (the group, or the manager).
    pub target_id: u64,
    /// Type of relationship.
    pub kind: RelationKind,
}

impl Edge {
    /// Create a new edge.
    pub fn new(source_id: u64, target_id: u64, kind: RelationKind) -> Self {
        Self {
            source_id,
            target_id,
            kind,
        }
    }
}
