//! Relationship extraction — builds a [`DirectoryGraph`] from parsed entries.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::ldif::rdn_value;
use crate::types::{
    Edge, Entry, LdifError, LdifResult, NodeKind, RelationKind, COMMON_MEMBERSHIP_ATTRIBUTES,
    DEFAULT_MEMBERSHIP_ATTRIBUTES, MANAGER_ATTRIBUTE,
};

use super::DirectoryGraph;

/// What to do with an edge whose endpoint DN has no entry in the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanglingPolicy {
    /// Create a placeholder node so the relationship stays visible.
    Placeholder,
    /// Drop the edge.
    Drop,
}

/// Builds a [`DirectoryGraph`] from LDIF entries in two passes: nodes and
/// a uid → node map first, then edges from membership and manager
/// attributes.
pub struct GraphBuilder {
    /// Membership attribute names, lowercased.
    membership_attributes: Vec<String>,
    manager_edges: bool,
    dangling: DanglingPolicy,
}

impl GraphBuilder {
    /// Create a builder with the default membership attributes, manager
    /// edges enabled and placeholder nodes for dangling references.
    pub fn new() -> Self {
        Self {
            membership_attributes: DEFAULT_MEMBERSHIP_ATTRIBUTES
                .iter()
                .map(|a| a.to_lowercase())
                .collect(),
            manager_edges: true,
            dangling: DanglingPolicy::Placeholder,
        }
    }

    /// Replace the membership attributes to follow.
    pub fn with_membership_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.membership_attributes = attrs
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }

    /// Enable or disable `manager` → `reportsTo` edges.
    pub fn with_manager_edges(mut self, enabled: bool) -> Self {
        self.manager_edges = enabled;
        self
    }

    /// Set the policy for edges whose endpoint has no entry.
    pub fn with_dangling_policy(mut self, policy: DanglingPolicy) -> Self {
        self.dangling = policy;
        self
    }

    /// The membership attributes currently configured (lowercased).
    pub fn membership_attributes(&self) -> &[String] {
        &self.membership_attributes
    }

    /// Scan entries for the membership attributes commonly found in
    /// directory dumps. Returns canonical attribute names.
    pub fn detect_membership_attributes(entries: &[Entry]) -> Vec<String> {
        COMMON_MEMBERSHIP_ATTRIBUTES
            .iter()
            .filter(|attr| entries.iter().any(|e| e.has_attribute(attr)))
            .map(|attr| attr.to_string())
            .collect()
    }

    /// Build the graph.
    pub fn build(&self, entries: &[Entry]) -> LdifResult<DirectoryGraph> {
        let mut graph = DirectoryGraph::new();
        let mut uid_to_id: HashMap<String, u64> = HashMap::new();
        let mut duplicates: HashSet<usize> = HashSet::new();

        // Pass 1: one node per entry, plus the uid map for memberUid.
        for (index, entry) in entries.iter().enumerate() {
            let kind = classify(entry);
            let label = display_label(entry, kind);
            let id = match graph.add_node(&entry.dn, label, kind) {
                Ok(id) => id,
                Err(LdifError::DuplicateDn(dn)) => {
                    warn!("duplicate entry for {dn}, keeping the first");
                    duplicates.insert(index);
                    continue;
                }
                Err(e) => return Err(e),
            };
            for uid in entry.values("uid") {
                uid_to_id.entry(uid.to_lowercase()).or_insert(id);
            }
        }

        // Pass 2: edges. Duplicate entries contribute nothing here either.
        for (index, entry) in entries.iter().enumerate() {
            if duplicates.contains(&index) {
                continue;
            }
            let entry_id = match graph.find_by_dn(&entry.dn) {
                Some(node) => node.id,
                None => continue,
            };

            for attr in &self.membership_attributes {
                for value in entry.values(attr) {
                    match attr.as_str() {
                        // posixGroup members are bare uids, not DNs.
                        "memberuid" => {
                            if let Some(&member_id) = uid_to_id.get(&value.to_lowercase()) {
                                self.push_edge(
                                    &mut graph,
                                    member_id,
                                    entry_id,
                                    RelationKind::MemberOf,
                                )?;
                            } else {
                                warn!(
                                    "memberUid {value} on {} matches no uid in the dump; skipped",
                                    entry.dn
                                );
                            }
                        }
                        // The entry lists the groups it belongs to.
                        "memberof" | "ismemberof" => {
                            if let Some(group_id) = self.resolve(&mut graph, value)? {
                                self.push_edge(
                                    &mut graph,
                                    entry_id,
                                    group_id,
                                    RelationKind::MemberOf,
                                )?;
                            }
                        }
                        // member / uniqueMember: the group lists member DNs.
                        _ => {
                            if let Some(member_id) = self.resolve(&mut graph, value)? {
                                self.push_edge(
                                    &mut graph,
                                    member_id,
                                    entry_id,
                                    RelationKind::MemberOf,
                                )?;
                            }
                        }
                    }
                }
            }

            if self.manager_edges {
                for value in entry.values(MANAGER_ATTRIBUTE) {
                    if let Some(manager_id) = self.resolve(&mut graph, value)? {
                        self.push_edge(&mut graph, entry_id, manager_id, RelationKind::ReportsTo)?;
                    }
                }
            }
        }

        Ok(graph)
    }

    /// Resolve a referenced DN to a node ID, applying the dangling policy.
    fn resolve(&self, graph: &mut DirectoryGraph, dn: &str) -> LdifResult<Option<u64>> {
        if let Some(node) = graph.find_by_dn(dn) {
            return Ok(Some(node.id));
        }
        match self.dangling {
            DanglingPolicy::Placeholder => {
                debug!("creating placeholder node for {dn}");
                let label = rdn_value(dn).to_string();
                Ok(Some(graph.add_placeholder(dn, label)?))
            }
            DanglingPolicy::Drop => {
                warn!("dropping edge to {dn}: no such entry in the dump");
                Ok(None)
            }
        }
    }

    /// Add an edge, tolerating self-references (a group listing itself).
    fn push_edge(
        &self,
        graph: &mut DirectoryGraph,
        source_id: u64,
        target_id: u64,
        kind: RelationKind,
    ) -> LdifResult<()> {
        match graph.add_edge(Edge::new(source_id, target_id, kind)) {
            Ok(()) => Ok(()),
            Err(LdifError::SelfReference(dn)) => {
                warn!("skipping self-referencing {kind} edge on {dn}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify an entry by its objectClass values.
fn classify(entry: &Entry) -> NodeKind {
    let mut kind = NodeKind::Unknown;
    for oc in entry.object_classes() {
        match oc.to_lowercase().as_str() {
            "inetorgperson" | "posixaccount" | "organizationalperson" | "person" | "account" => {
                return NodeKind::Person;
            }
            "groupofnames" | "groupofuniquenames" | "groupofmembers" | "posixgroup"
            | "groupofurls" => {
                return NodeKind::Group;
            }
            "organizationalunit" | "organization" | "domain" | "dcobject" => {
                kind = NodeKind::OrgUnit;
            }
            _ => {}
        }
    }
    kind
}

/// Pick the display label for an entry: uid for people, cn for groups,
/// the first RDN value otherwise.
fn display_label(entry: &Entry, kind: NodeKind) -> String {
    let preferred = match kind {
        NodeKind::Person => entry.first("uid").or_else(|| entry.first("cn")),
        NodeKind::Group => entry.first("cn"),
        _ => entry.first("ou").or_else(|| entry.first("cn")),
    };
    preferred
        .map(str::to_string)
        .unwrap_or_else(|| rdn_value(&entry.dn).to_string())
}
