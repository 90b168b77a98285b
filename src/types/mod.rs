//! All data types for the ldifgraph library.

pub mod edge;
pub mod entry;
pub mod error;
pub mod node;

pub use edge::{Edge, RelationKind};
pub use entry::Entry;
pub use error::{LdifError, LdifResult};
pub use node::{Node, NodeKind};

/// Membership attributes used when none are configured or detected.
pub const DEFAULT_MEMBERSHIP_ATTRIBUTES: &[&str] = &["member", "memberUid"];

/// Membership attributes the detector looks for in a dump.
pub const COMMON_MEMBERSHIP_ATTRIBUTES: &[&str] =
    &["member", "memberUid", "uniqueMember", "isMemberOf", "memberOf"];

/// Attribute holding the DN of an entry's manager.
pub const MANAGER_ATTRIBUTE: &str = "manager";
