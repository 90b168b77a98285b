//! CLI command implementations.

use std::path::Path;

use crate::export::{CsvExporter, GexfExporter};
use crate::graph::{DanglingPolicy, DirectoryGraph, GraphBuilder};
use crate::ldif::{normalize_dn, LdifReader};
use crate::types::{
    Entry, LdifError, LdifResult, NodeKind, RelationKind, DEFAULT_MEMBERSHIP_ATTRIBUTES,
};

/// Parse a dump and build its graph in one step.
///
/// When no membership attributes are given, detection runs first and falls
/// back to the defaults if nothing is found.
pub fn load(
    path: &Path,
    attrs: Option<&[String]>,
    drop_dangling: bool,
) -> LdifResult<(Vec<Entry>, DirectoryGraph)> {
    let entries = LdifReader::from_path(path)?.read_all()?;
    let builder = make_builder(&entries, attrs, drop_dangling);
    let graph = builder.build(&entries)?;
    Ok((entries, graph))
}

/// Configure a builder for the given dump.
pub fn make_builder(
    entries: &[Entry],
    attrs: Option<&[String]>,
    drop_dangling: bool,
) -> GraphBuilder {
    let attrs: Vec<String> = match attrs {
        Some(a) if !a.is_empty() => a.to_vec(),
        _ => {
            let detected = GraphBuilder::detect_membership_attributes(entries);
            if detected.is_empty() {
                DEFAULT_MEMBERSHIP_ATTRIBUTES
                    .iter()
                    .map(|a| a.to_string())
                    .collect()
            } else {
                detected
            }
        }
    };
    let policy = if drop_dangling {
        DanglingPolicy::Drop
    } else {
        DanglingPolicy::Placeholder
    };
    GraphBuilder::new()
        .with_membership_attributes(&attrs)
        .with_dangling_policy(policy)
}

/// Summarize a dump: entry count, detected attributes, graph breakdown.
pub fn cmd_info(path: &Path, attrs: Option<&[String]>, json: bool) -> LdifResult<()> {
    let (entries, graph) = load(path, attrs, false)?;
    let detected = GraphBuilder::detect_membership_attributes(&entries);

    if json {
        let info = serde_json::json!({
            "file": path.display().to_string(),
            "entries": entries.len(),
            "detected_membership_attributes": detected,
            "nodes": graph.node_count(),
            "edges": graph.edge_count(),
            "placeholders": graph.placeholder_count(),
            "node_kinds": {
                "person": graph.kind_count(NodeKind::Person),
                "group": graph.kind_count(NodeKind::Group),
                "org_unit": graph.kind_count(NodeKind::OrgUnit),
                "unknown": graph.kind_count(NodeKind::Unknown),
            },
            "relations": {
                "member_of": graph.relation_count(RelationKind::MemberOf),
                "reports_to": graph.relation_count(RelationKind::ReportsTo),
            }
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("File: {}", path.display());
        println!("Entries: {}", entries.len());
        if detected.is_empty() {
            println!("Detected membership attributes: (none)");
        } else {
            println!("Detected membership attributes: {}", detected.join(", "));
        }
        println!("Nodes: {}", graph.node_count());
        println!("Edges: {}", graph.edge_count());
        println!("Placeholders: {}", graph.placeholder_count());
        println!("Node kinds:");
        println!("  People: {}", graph.kind_count(NodeKind::Person));
        println!("  Groups: {}", graph.kind_count(NodeKind::Group));
        println!("  Org units: {}", graph.kind_count(NodeKind::OrgUnit));
        println!("  Unknown: {}", graph.kind_count(NodeKind::Unknown));
        println!("Relations:");
        println!("  memberOf: {}", graph.relation_count(RelationKind::MemberOf));
        println!("  reportsTo: {}", graph.relation_count(RelationKind::ReportsTo));
    }
    Ok(())
}

/// Print the membership attributes found in a dump.
pub fn cmd_detect(path: &Path, json: bool) -> LdifResult<()> {
    let entries = LdifReader::from_path(path)?.read_all()?;
    let detected = GraphBuilder::detect_membership_attributes(&entries);

    if json {
        println!(
            "{}",
            serde_json::json!({ "detected_membership_attributes": detected })
        );
    } else if detected.is_empty() {
        println!("No membership attributes detected.");
    } else {
        println!("Detected membership attribute(s): {}", detected.join(", "));
    }
    Ok(())
}

/// List nodes, optionally filtered by kind.
pub fn cmd_nodes(
    path: &Path,
    attrs: Option<&[String]>,
    kind: Option<NodeKind>,
    limit: usize,
    json: bool,
) -> LdifResult<()> {
    let (_, graph) = load(path, attrs, false)?;
    let nodes: Vec<_> = graph
        .nodes()
        .iter()
        .filter(|n| kind.map_or(true, |k| n.kind == k))
        .take(if limit == 0 { usize::MAX } else { limit })
        .collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&nodes).unwrap_or_default()
        );
    } else {
        for node in &nodes {
            let marker = if node.placeholder { " [placeholder]" } else { "" };
            println!("{}: {} ({}){}", node.kind.label(), node.label, node.dn, marker);
        }
        println!("\n{} node(s)", nodes.len());
    }
    Ok(())
}

/// List edges, optionally filtered by relation kind.
pub fn cmd_edges(
    path: &Path,
    attrs: Option<&[String]>,
    relation: Option<RelationKind>,
    limit: usize,
    json: bool,
) -> LdifResult<()> {
    let (_, graph) = load(path, attrs, false)?;
    let edges: Vec<_> = graph
        .edges()
        .iter()
        .filter(|e| relation.map_or(true, |r| e.kind == r))
        .take(if limit == 0 { usize::MAX } else { limit })
        .collect();

    if json {
        let items: Vec<serde_json::Value> = edges
            .iter()
            .map(|e| {
                serde_json::json!({
                    "source": graph.get_node(e.source_id).map(|n| n.dn.as_str()),
                    "target": graph.get_node(e.target_id).map(|n| n.dn.as_str()),
                    "relation": e.kind.name(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&items).unwrap_or_default()
        );
    } else {
        for edge in &edges {
            let source = graph
                .get_node(edge.source_id)
                .map(|n| n.dn.as_str())
                .unwrap_or("?");
            let target = graph
                .get_node(edge.target_id)
                .map(|n| n.dn.as_str())
                .unwrap_or("?");
            println!("{}: {} -> {}", edge.kind.label(), source, target);
        }
        println!("\n{} edge(s)", edges.len());
    }
    Ok(())
}

/// Show one entry by DN: its attributes, memberships and members.
pub fn cmd_show(path: &Path, attrs: Option<&[String]>, dn: &str, json: bool) -> LdifResult<()> {
    let (entries, graph) = load(path, attrs, false)?;
    let key = normalize_dn(dn);
    let entry = entries
        .iter()
        .find(|e| normalize_dn(&e.dn) == key)
        .ok_or_else(|| LdifError::DnNotFound(dn.to_string()))?;
    let node = graph
        .find_by_dn(dn)
        .ok_or_else(|| LdifError::DnNotFound(dn.to_string()))?;

    let member_of: Vec<&str> = graph
        .edges_from(node.id)
        .into_iter()
        .filter(|e| e.kind == RelationKind::MemberOf)
        .filter_map(|e| graph.get_node(e.target_id))
        .map(|n| n.dn.as_str())
        .collect();
    let members: Vec<&str> = graph
        .members_of(node.id)
        .into_iter()
        .map(|n| n.dn.as_str())
        .collect();

    if json {
        let mut attributes = serde_json::Map::new();
        let mut names: Vec<&str> = entry.attribute_names().collect();
        names.sort_unstable();
        for name in names {
            attributes.insert(
                name.to_string(),
                serde_json::json!(entry.values(name)),
            );
        }
        let info = serde_json::json!({
            "dn": entry.dn,
            "kind": node.kind.name(),
            "label": node.label,
            "attributes": attributes,
            "member_of": member_of,
            "members": members,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("dn: {}", entry.dn);
        println!("Kind: {}", node.kind.label());
        println!("Label: {}", node.label);
        let mut names: Vec<&str> = entry.attribute_names().collect();
        names.sort_unstable();
        for name in names {
            for value in entry.values(name) {
                println!("  {name}: {value}");
            }
        }
        if !member_of.is_empty() {
            println!("Member of:");
            for g in &member_of {
                println!("  {g}");
            }
        }
        if !members.is_empty() {
            println!("Members ({}):", members.len());
            for m in &members {
                println!("  {m}");
            }
        }
    }
    Ok(())
}

/// Export the graph as Gephi CSV files.
pub fn cmd_export_csv(
    path: &Path,
    attrs: Option<&[String]>,
    drop_dangling: bool,
    nodes_out: &Path,
    edges_out: &Path,
) -> LdifResult<()> {
    let (_, graph) = load(path, attrs, drop_dangling)?;
    CsvExporter::new().write_files(&graph, nodes_out, edges_out)?;
    println!(
        "Exported {} nodes to {} and {} edges to {}",
        graph.node_count(),
        nodes_out.display(),
        graph.edge_count(),
        edges_out.display()
    );
    Ok(())
}

/// Export the graph as a GEXF file.
pub fn cmd_export_gexf(
    path: &Path,
    attrs: Option<&[String]>,
    drop_dangling: bool,
    out: &Path,
) -> LdifResult<()> {
    let (_, graph) = load(path, attrs, drop_dangling)?;
    GexfExporter::new().write_file(&graph, out)?;
    println!(
        "Exported {} nodes and {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        out.display()
    );
    Ok(())
}
