//! Core graph structure — nodes keyed by DN, directed typed edges.

use std::collections::{HashMap, HashSet};

use crate::ldif::normalize_dn;
use crate::types::{Edge, LdifError, LdifResult, Node, NodeKind, RelationKind};

/// The relationship graph derived from an LDIF dump.
///
/// Nodes are identified by normalized DN; every edge endpoint must be a
/// node already present in the graph.
pub struct DirectoryGraph {
    /// All nodes; `nodes[id]` has that ID.
    nodes: Vec<Node>,
    /// All edges, in insertion order.
    edges: Vec<Edge>,
    /// Normalized DN -> node ID.
    dn_index: HashMap<String, u64>,
    /// source_id -> indexes into `edges`.
    adjacency: HashMap<u64, Vec<usize>>,
    /// target_id -> indexes into `edges`.
    reverse_adjacency: HashMap<u64, Vec<usize>>,
    /// Dedup set over (source, target, kind).
    edge_set: HashSet<Edge>,
}

impl DirectoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            dn_index: HashMap::new(),
            adjacency: HashMap::new(),
            reverse_adjacency: HashMap::new(),
            edge_set: HashSet::new(),
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a node by ID.
    pub fn get_node(&self, id: u64) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Look up a node by DN (normalized before lookup).
    pub fn find_by_dn(&self, dn: &str) -> Option<&Node> {
        let id = *self.dn_index.get(&normalize_dn(dn))?;
        self.get_node(id)
    }

    /// Add a node, returning its assigned ID.
    ///
    /// Fails with [`LdifError::DuplicateDn`] if a node with the same
    /// normalized DN already exists.
    pub fn add_node(
        &mut self,
        dn: &str,
        label: impl Into<String>,
        kind: NodeKind,
    ) -> LdifResult<u64> {
        let key = normalize_dn(dn);
        if self.dn_index.contains_key(&key) {
            return Err(LdifError::DuplicateDn(dn.to_string()));
        }
        let id = self.nodes.len() as u64;
        self.nodes.push(Node::new(id, dn, label, kind));
        self.dn_index.insert(key, id);
        Ok(id)
    }

    /// Add a placeholder node for a DN referenced by an edge but absent
    /// from the dump.
    pub fn add_placeholder(&mut self, dn: &str, label: impl Into<String>) -> LdifResult<u64> {
        let key = normalize_dn(dn);
        if self.dn_index.contains_key(&key) {
            return Err(LdifError::DuplicateDn(dn.to_string()));
        }
        let id = self.nodes.len() as u64;
        self.nodes.push(Node::placeholder(id, dn, label));
        self.dn_index.insert(key, id);
        Ok(id)
    }

    /// Add an edge between two existing nodes. Duplicate edges are ignored.
    pub fn add_edge(&mut self, edge: Edge) -> LdifResult<()> {
        if edge.source_id == edge.target_id {
            let dn = self
                .get_node(edge.source_id)
                .map(|n| n.dn.clone())
                .unwrap_or_else(|| edge.source_id.to_string());
            return Err(LdifError::SelfReference(dn));
        }
        if self.get_node(edge.source_id).is_none() {
            return Err(LdifError::NodeNotFound(edge.source_id));
        }
        if self.get_node(edge.target_id).is_none() {
            return Err(LdifError::NodeNotFound(edge.target_id));
        }
        if !self.edge_set.insert(edge) {
            return Ok(());
        }
        let idx = self.edges.len();
        self.adjacency.entry(edge.source_id).or_default().push(idx);
        self.reverse_adjacency
            .entry(edge.target_id)
            .or_default()
            .push(idx);
        self.edges.push(edge);
        Ok(())
    }

    /// All edges leaving a node.
    pub fn edges_from(&self, source_id: u64) -> Vec<&Edge> {
        self.adjacency
            .get(&source_id)
            .map(|idxs| idxs.iter().filter_map(|&i| self.edges.get(i)).collect())
            .unwrap_or_default()
    }

    /// All edges pointing at a node.
    pub fn edges_to(&self, target_id: u64) -> Vec<&Edge> {
        self.reverse_adjacency
            .get(&target_id)
            .map(|idxs| idxs.iter().filter_map(|&i| self.edges.get(i)).collect())
            .unwrap_or_default()
    }

    /// The member nodes of a group (sources of its incoming memberOf edges).
    pub fn members_of(&self, group_id: u64) -> Vec<&Node> {
        self.edges_to(group_id)
            .into_iter()
            .filter(|e| e.kind == RelationKind::MemberOf)
            .filter_map(|e| self.get_node(e.source_id))
            .collect()
    }

    /// Number of nodes of a given kind.
    pub fn kind_count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Number of placeholder nodes.
    pub fn placeholder_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.placeholder).count()
    }

    /// Number of edges of a given relation kind.
    pub fn relation_count(&self, kind: RelationKind) -> usize {
        self.edges.iter().filter(|e| e.kind == kind).count()
    }
}

impl Default for DirectoryGraph {
    fn default() -> Self {
        Self::new()
    }
}
