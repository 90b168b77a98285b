//! Node kinds and the core node struct.

use serde::Serialize;

/// What sort of directory entry a node was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum NodeKind {
    /// A person or account entry (inetOrgPerson, posixAccount, ...).
    Person = 0,
    /// A group entry (groupOfNames, posixGroup, ...).
    Group = 1,
    /// An organizational unit or container entry.
    OrgUnit = 2,
    /// Anything else, including placeholders for dangling references.
    Unknown = 3,
}

impl NodeKind {
    /// Return a machine-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Group => "group",
            Self::OrgUnit => "org_unit",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a node kind from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "person" | "user" => Some(Self::Person),
            "group" => Some(Self::Group),
            "org_unit" | "orgunit" | "ou" => Some(Self::OrgUnit),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// The display label written to Gephi exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "User",
            Self::Group => "Group",
            Self::OrgUnit => "OrgUnit",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A graph vertex derived from one LDIF entry's distinguished name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Numeric node ID, assigned in insertion order.
    pub id: u64,
    /// The entry's distinguished name, as written in the dump.
    pub dn: String,
    /// Display label (uid for people, cn for groups, RDN value otherwise).
    pub label: String,
    /// Classification from the entry's objectClass values.
    pub kind: NodeKind,
    /// True if the node stands in for a DN that had no entry in the dump.
    pub placeholder: bool,
}

impl Node {
    /// Create a node for an entry that exists in the dump.
    pub fn new(id: u64, dn: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            dn: dn.into(),
            label: label.into(),
            kind,
            placeholder: false,
        }
    }

    /// Create a placeholder node for a referenced-but-absent DN.
    pub fn placeholder(id: u64, dn: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            dn: dn.into(),
            label: label.into(),
            kind: NodeKind::Unknown,
            placeholder: true,
        }
    }
}
