//! Relationship extraction and graph structure tests.

use ldifgraph::graph::{DanglingPolicy, DirectoryGraph, GraphBuilder};
use ldifgraph::ldif::parse_str;
use ldifgraph::types::{Edge, LdifError, NodeKind, RelationKind};

/// A small directory: two people, a groupOfNames, a posixGroup, an OU,
/// a manager reference, and one member DN with no matching entry.
const SAMPLE: &str = "\
dn: ou=people,dc=example,dc=com
objectClass: organizationalUnit
ou: people

dn: uid=alice,ou=people,dc=example,dc=com
objectClass: inetOrgPerson
uid: alice
cn: Alice Adams
manager: uid=bob,ou=people,dc=example,dc=com

dn: uid=bob,ou=people,dc=example,dc=com
objectClass: inetOrgPerson
objectClass: posixAccount
uid: bob
cn: Bob Brown

dn: cn=staff,ou=groups,dc=example,dc=com
objectClass: groupOfNames
cn: staff
member: uid=alice,ou=people,dc=example,dc=com
member: uid=bob,ou=people,dc=example,dc=com
member: uid=ghost,ou=people,dc=example,dc=com

dn: cn=admins,ou=groups,dc=example,dc=com
objectClass: posixGroup
cn: admins
memberUid: alice
memberUid: nobody-here
";

fn build(policy: DanglingPolicy) -> DirectoryGraph {
    let entries = parse_str(SAMPLE).unwrap();
    GraphBuilder::new()
        .with_membership_attributes(["member", "memberUid"])
        .with_dangling_policy(policy)
        .build(&entries)
        .unwrap()
}

// ==================== Detection ====================

#[test]
fn test_detect_membership_attributes() {
    let entries = parse_str(SAMPLE).unwrap();
    let detected = GraphBuilder::detect_membership_attributes(&entries);
    assert_eq!(detected, vec!["member".to_string(), "memberUid".to_string()]);
}

#[test]
fn test_detect_nothing() {
    let entries = parse_str("dn: uid=a,dc=example,dc=com\nuid: a\n").unwrap();
    assert!(GraphBuilder::detect_membership_attributes(&entries).is_empty());
}

// ==================== Classification and Labels ====================

#[test]
fn test_every_entry_becomes_a_node() {
    let graph = build(DanglingPolicy::Drop);
    // 5 entries, ghost member dropped.
    assert_eq!(graph.node_count(), 5);
}

#[test]
fn test_classification() {
    let graph = build(DanglingPolicy::Drop);
    assert_eq!(graph.kind_count(NodeKind::Person), 2);
    assert_eq!(graph.kind_count(NodeKind::Group), 2);
    assert_eq!(graph.kind_count(NodeKind::OrgUnit), 1);
}

#[test]
fn test_labels() {
    let graph = build(DanglingPolicy::Drop);
    let alice = graph
        .find_by_dn("uid=alice,ou=people,dc=example,dc=com")
        .unwrap();
    assert_eq!(alice.label, "alice");
    assert_eq!(alice.kind, NodeKind::Person);

    let staff = graph
        .find_by_dn("cn=staff,ou=groups,dc=example,dc=com")
        .unwrap();
    assert_eq!(staff.label, "staff");
    assert_eq!(staff.kind, NodeKind::Group);

    let ou = graph.find_by_dn("ou=people,dc=example,dc=com").unwrap();
    assert_eq!(ou.label, "people");
}

// ==================== Membership Edges ====================

#[test]
fn test_member_edges_point_at_group() {
    let graph = build(DanglingPolicy::Drop);
    let alice = graph
        .find_by_dn("uid=alice,ou=people,dc=example,dc=com")
        .unwrap();
    let staff = graph
        .find_by_dn("cn=staff,ou=groups,dc=example,dc=com")
        .unwrap();

    let memberships: Vec<_> = graph
        .edges_from(alice.id)
        .into_iter()
        .filter(|e| e.kind == RelationKind::MemberOf)
        .collect();
    assert!(memberships.iter().any(|e| e.target_id == staff.id));
}

#[test]
fn test_member_uid_resolved_through_uid_map() {
    let graph = build(DanglingPolicy::Drop);
    let admins = graph
        .find_by_dn("cn=admins,ou=groups,dc=example,dc=com")
        .unwrap();
    let members = graph.members_of(admins.id);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].label, "alice");
}

#[test]
fn test_unresolved_member_uid_skipped() {
    // "nobody-here" matches no uid; no placeholder can be created from a
    // bare uid, so the edge is dropped even under the placeholder policy.
    let graph = build(DanglingPolicy::Placeholder);
    let admins = graph
        .find_by_dn("cn=admins,ou=groups,dc=example,dc=com")
        .unwrap();
    assert_eq!(graph.members_of(admins.id).len(), 1);
}

#[test]
fn test_member_of_attribute_direction() {
    let ldif = "\
dn: cn=ops,ou=groups,dc=example,dc=com
objectClass: groupOfNames
cn: ops

dn: uid=carol,ou=people,dc=example,dc=com
objectClass: inetOrgPerson
uid: carol
memberOf: cn=ops,ou=groups,dc=example,dc=com
";
    let entries = parse_str(ldif).unwrap();
    let graph = GraphBuilder::new()
        .with_membership_attributes(["memberOf"])
        .build(&entries)
        .unwrap();

    let carol = graph
        .find_by_dn("uid=carol,ou=people,dc=example,dc=com")
        .unwrap();
    let ops = graph.find_by_dn("cn=ops,ou=groups,dc=example,dc=com").unwrap();
    let edges = graph.edges_from(carol.id);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target_id, ops.id);
    assert_eq!(edges[0].kind, RelationKind::MemberOf);
}

#[test]
fn test_duplicate_member_values_deduped() {
    let ldif = "\
dn: uid=a,ou=people,dc=example,dc=com
objectClass: inetOrgPerson
uid: a

dn: cn=g,ou=groups,dc=example,dc=com
objectClass: groupOfNames
cn: g
member: uid=a,ou=people,dc=example,dc=com
member: UID=A,ou=People,dc=example,dc=com
";
    let entries = parse_str(ldif).unwrap();
    let graph = GraphBuilder::new().build(&entries).unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_group_listing_itself_is_skipped() {
    let ldif = "\
dn: cn=g,ou=groups,dc=example,dc=com
objectClass: groupOfNames
cn: g
member: cn=g,ou=groups,dc=example,dc=com
";
    let entries = parse_str(ldif).unwrap();
    let graph = GraphBuilder::new().build(&entries).unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

// ==================== Manager Edges ====================

#[test]
fn test_manager_edge() {
    let graph = build(DanglingPolicy::Drop);
    let alice = graph
        .find_by_dn("uid=alice,ou=people,dc=example,dc=com")
        .unwrap();
    let bob = graph
        .find_by_dn("uid=bob,ou=people,dc=example,dc=com")
        .unwrap();

    let reports: Vec<_> = graph
        .edges_from(alice.id)
        .into_iter()
        .filter(|e| e.kind == RelationKind::ReportsTo)
        .collect();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].target_id, bob.id);
}

#[test]
fn test_manager_edges_disabled() {
    let entries = parse_str(SAMPLE).unwrap();
    let graph = GraphBuilder::new()
        .with_manager_edges(false)
        .with_dangling_policy(DanglingPolicy::Drop)
        .build(&entries)
        .unwrap();
    assert_eq!(graph.relation_count(RelationKind::ReportsTo), 0);
}

// ==================== Dangling References ====================

#[test]
fn test_dangling_reference_placeholder() {
    let graph = build(DanglingPolicy::Placeholder);
    let ghost = graph
        .find_by_dn("uid=ghost,ou=people,dc=example,dc=com")
        .unwrap();
    assert!(ghost.placeholder);
    assert_eq!(ghost.kind, NodeKind::Unknown);
    assert_eq!(ghost.label, "ghost");
    assert_eq!(graph.placeholder_count(), 1);

    // The edge to the placeholder exists.
    let staff = graph
        .find_by_dn("cn=staff,ou=groups,dc=example,dc=com")
        .unwrap();
    assert_eq!(graph.members_of(staff.id).len(), 3);
}

#[test]
fn test_dangling_reference_dropped() {
    let graph = build(DanglingPolicy::Drop);
    assert!(graph
        .find_by_dn("uid=ghost,ou=people,dc=example,dc=com")
        .is_none());
    assert_eq!(graph.placeholder_count(), 0);
    let staff = graph
        .find_by_dn("cn=staff,ou=groups,dc=example,dc=com")
        .unwrap();
    assert_eq!(graph.members_of(staff.id).len(), 2);
}

#[test]
fn test_every_edge_endpoint_is_a_node() {
    for policy in [DanglingPolicy::Placeholder, DanglingPolicy::Drop] {
        let graph = build(policy);
        for edge in graph.edges() {
            assert!(graph.get_node(edge.source_id).is_some());
            assert!(graph.get_node(edge.target_id).is_some());
        }
    }
}

// ==================== Duplicates ====================

#[test]
fn test_duplicate_dn_first_wins() {
    let ldif = "\
dn: uid=a,dc=example,dc=com
objectClass: inetOrgPerson
uid: a
cn: First

dn: uid=a,dc=example,dc=com
objectClass: inetOrgPerson
uid: a
cn: Second
";
    let entries = parse_str(ldif).unwrap();
    let graph = GraphBuilder::new().build(&entries).unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.nodes()[0].label, "a");
}

#[test]
fn test_duplicate_dn_attributes_ignored() {
    // The second cn=g carries a member value the first lacks. The whole
    // duplicate entry is ignored, so no edge comes out of it.
    let ldif = "\
dn: uid=a,dc=example,dc=com
objectClass: inetOrgPerson
uid: a

dn: cn=g,dc=example,dc=com
objectClass: groupOfNames
cn: g

dn: cn=g,dc=example,dc=com
objectClass: groupOfNames
cn: g
member: uid=a,dc=example,dc=com
";
    let entries = parse_str(ldif).unwrap();
    let graph = GraphBuilder::new().build(&entries).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
}

// ==================== DirectoryGraph API ====================

#[test]
fn test_graph_add_node_and_lookup() {
    let mut graph = DirectoryGraph::new();
    let id = graph
        .add_node("uid=a,dc=example,dc=com", "a", NodeKind::Person)
        .unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.get_node(id).unwrap().dn, "uid=a,dc=example,dc=com");
    // DN lookup is case-insensitive.
    assert!(graph.find_by_dn("UID=A, DC=Example, DC=Com").is_some());
}

#[test]
fn test_graph_duplicate_dn_rejected() {
    let mut graph = DirectoryGraph::new();
    graph
        .add_node("uid=a,dc=example,dc=com", "a", NodeKind::Person)
        .unwrap();
    let err = graph
        .add_node("UID=a,dc=example,dc=com", "a", NodeKind::Person)
        .unwrap_err();
    assert!(matches!(err, LdifError::DuplicateDn(_)));
}

#[test]
fn test_graph_edge_validation() {
    let mut graph = DirectoryGraph::new();
    let a = graph
        .add_node("uid=a,dc=example,dc=com", "a", NodeKind::Person)
        .unwrap();
    let g = graph
        .add_node("cn=g,dc=example,dc=com", "g", NodeKind::Group)
        .unwrap();

    graph.add_edge(Edge::new(a, g, RelationKind::MemberOf)).unwrap();
    assert_eq!(graph.edge_count(), 1);

    // Duplicate edges are ignored.
    graph.add_edge(Edge::new(a, g, RelationKind::MemberOf)).unwrap();
    assert_eq!(graph.edge_count(), 1);

    // Unknown endpoint.
    let err = graph
        .add_edge(Edge::new(a, 99, RelationKind::MemberOf))
        .unwrap_err();
    assert!(matches!(err, LdifError::NodeNotFound(99)));

    // Self edge.
    let err = graph
        .add_edge(Edge::new(a, a, RelationKind::MemberOf))
        .unwrap_err();
    assert!(matches!(err, LdifError::SelfReference(_)));
}

#[test]
fn test_edges_from_and_to() {
    let mut graph = DirectoryGraph::new();
    let a = graph
        .add_node("uid=a,dc=example,dc=com", "a", NodeKind::Person)
        .unwrap();
    let b = graph
        .add_node("uid=b,dc=example,dc=com", "b", NodeKind::Person)
        .unwrap();
    let g = graph
        .add_node("cn=g,dc=example,dc=com", "g", NodeKind::Group)
        .unwrap();
    graph.add_edge(Edge::new(a, g, RelationKind::MemberOf)).unwrap();
    graph.add_edge(Edge::new(b, g, RelationKind::MemberOf)).unwrap();
    graph.add_edge(Edge::new(a, b, RelationKind::ReportsTo)).unwrap();

    assert_eq!(graph.edges_from(a).len(), 2);
    assert_eq!(graph.edges_to(g).len(), 2);
    assert_eq!(graph.members_of(g).len(), 2);
    assert_eq!(graph.relation_count(RelationKind::MemberOf), 2);
    assert_eq!(graph.relation_count(RelationKind::ReportsTo), 1);
}
