//! Interactive console for ldg — slash command interface.
//!
//! Launch with `ldg` (no subcommand) to enter interactive mode.
//! Type `/help` for available commands, Tab for completion.

use std::path::PathBuf;

use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

use crate::cli::repl_complete::{self, COMMANDS, NODE_KINDS, RELATION_KINDS};
use crate::export::{CsvExporter, GexfExporter};
use crate::graph::{DirectoryGraph, GraphBuilder};
use crate::ldif::{normalize_dn, LdifReader};
use crate::types::{Entry, NodeKind, RelationKind, DEFAULT_MEMBERSHIP_ATTRIBUTES};

/// Console session state.
pub struct ReplState {
    /// Path of the currently loaded LDIF file.
    path: Option<PathBuf>,
    entries: Vec<Entry>,
    membership_attributes: Vec<String>,
    graph: Option<DirectoryGraph>,
}

impl Default for ReplState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplState {
    pub fn new() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
            membership_attributes: DEFAULT_MEMBERSHIP_ATTRIBUTES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            graph: None,
        }
    }

    fn require_loaded(&self) -> bool {
        if self.path.is_none() {
            eprintln!("  No LDIF file loaded. Use /load <file.ldif>");
            return false;
        }
        true
    }

    fn require_graph(&self) -> Option<&DirectoryGraph> {
        match self.graph.as_ref() {
            Some(g) => Some(g),
            None => {
                eprintln!("  No graph yet. Run /parse first.");
                None
            }
        }
    }
}

/// History file location.
fn history_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ldg_history")
}

/// Print the welcome banner.
fn print_banner() {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mldg v{}\x1b[0m \x1b[90mLDIF relationship graphs for Gephi\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();
}

/// Run the interactive console.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    print_banner();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let helper = repl_complete::LdgHelper::new();
    let mut rl: Editor<repl_complete::LdgHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(helper));
    repl_complete::bind_keys(&mut rl);

    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut state = ReplState::new();
    let prompt = " \x1b[36mldg>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match execute(line, &mut state) {
                    Ok(true) => {
                        eprintln!("  Goodbye!");
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        eprintln!("  Error: {e}");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

/// Execute a slash command. Returns `true` if the console should exit.
pub fn execute(input: &str, state: &mut ReplState) -> Result<bool, Box<dyn std::error::Error>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(false);
    }

    let input = input.strip_prefix('/').unwrap_or(input);
    if input.is_empty() {
        cmd_help();
        return Ok(false);
    }

    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    match cmd {
        "exit" | "quit" => return Ok(true),
        "help" | "h" | "?" => cmd_help(),
        "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
        "load" => cmd_load(args, state)?,
        "attrs" => cmd_attrs(args, state),
        "detect" => cmd_detect(state),
        "parse" => cmd_parse(state)?,
        "nodes" => cmd_nodes(args, state),
        "edges" => cmd_edges(args, state),
        "show" => cmd_show(args, state),
        "stats" => cmd_stats(state),
        "export" => cmd_export(args, state)?,
        "gexf" => cmd_gexf(args, state)?,
        _ => {
            if let Some(suggestion) = repl_complete::suggest_command(cmd) {
                eprintln!("  Unknown command '/{cmd}'. Did you mean {suggestion}?");
            } else {
                eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
            }
        }
    }

    Ok(false)
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<10} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: generate a dump with: ldapsearch -x -H ldap://host -b dc=example,dc=com > out.ldif");
    eprintln!();
}

fn cmd_load(args: &str, state: &mut ReplState) -> Result<(), Box<dyn std::error::Error>> {
    if args.is_empty() {
        eprintln!("  Usage: /load <file.ldif>");
        return Ok(());
    }
    let file = PathBuf::from(args.split_whitespace().next().unwrap_or(args));
    if !file.exists() {
        eprintln!("  File not found: {}", file.display());
        return Ok(());
    }

    let entries = LdifReader::from_path(&file)?.read_all()?;
    eprintln!("  Loaded {} entries from {}", entries.len(), file.display());

    let detected = GraphBuilder::detect_membership_attributes(&entries);
    if detected.is_empty() {
        eprintln!(
            "  No membership attributes detected; keeping {}",
            state.membership_attributes.join(", ")
        );
    } else {
        eprintln!("  Detected membership attribute(s): {}", detected.join(", "));
        eprintln!("  Using them. Override with /attrs <a,b,...> if needed.");
        state.membership_attributes = detected;
    }

    state.entries = entries;
    state.path = Some(file);
    state.graph = None;
    eprintln!("  Ready to /parse.");
    Ok(())
}

fn cmd_attrs(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        eprintln!(
            "  Membership attributes: {}",
            state.membership_attributes.join(", ")
        );
        return;
    }
    state.membership_attributes = args
        .split(',')
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();
    state.graph = None;
    eprintln!(
        "  Membership attributes set to: {}",
        state.membership_attributes.join(", ")
    );
}

fn cmd_detect(state: &ReplState) {
    if !state.require_loaded() {
        return;
    }
    let detected = GraphBuilder::detect_membership_attributes(&state.entries);
    if detected.is_empty() {
        eprintln!("  No membership attributes detected.");
    } else {
        eprintln!("  Detected membership attribute(s): {}", detected.join(", "));
    }
}

fn cmd_parse(state: &mut ReplState) -> Result<(), Box<dyn std::error::Error>> {
    if !state.require_loaded() {
        return Ok(());
    }
    let builder = GraphBuilder::new().with_membership_attributes(&state.membership_attributes);
    let graph = builder.build(&state.entries)?;
    eprintln!(
        "  Parsed {} nodes and {} edges. Ready for /export.",
        graph.node_count(),
        graph.edge_count()
    );
    state.graph = Some(graph);
    Ok(())
}

/// Parse an optional node-kind filter; `Err` carries the unrecognized name.
fn node_kind_filter(args: &str) -> Result<Option<NodeKind>, &str> {
    match args.split_whitespace().next() {
        None => Ok(None),
        Some(name) => NodeKind::from_name(name).map(Some).ok_or(name),
    }
}

/// Parse an optional relation filter; `Err` carries the unrecognized name.
fn relation_filter(args: &str) -> Result<Option<RelationKind>, &str> {
    match args.split_whitespace().next() {
        None => Ok(None),
        Some(name) => RelationKind::from_name(name).map(Some).ok_or(name),
    }
}

fn cmd_nodes(args: &str, state: &ReplState) {
    let Some(graph) = state.require_graph() else {
        return;
    };
    let kind = match node_kind_filter(args) {
        Ok(kind) => kind,
        Err(name) => {
            eprintln!(
                "  Unknown node kind '{name}'. One of: {}",
                NODE_KINDS.join(", ")
            );
            return;
        }
    };
    let mut count = 0;
    for node in graph.nodes() {
        if kind.is_some_and(|k| node.kind != k) {
            continue;
        }
        let marker = if node.placeholder { " [placeholder]" } else { "" };
        eprintln!(
            "  {}: {} ({}){}",
            node.kind.label(),
            node.label,
            node.dn,
            marker
        );
        count += 1;
    }
    eprintln!("  {count} node(s)");
}

fn cmd_edges(args: &str, state: &ReplState) {
    let Some(graph) = state.require_graph() else {
        return;
    };
    let relation = match relation_filter(args) {
        Ok(relation) => relation,
        Err(name) => {
            eprintln!(
                "  Unknown relation '{name}'. One of: {}",
                RELATION_KINDS.join(", ")
            );
            return;
        }
    };
    let mut count = 0;
    for edge in graph.edges() {
        if relation.is_some_and(|r| edge.kind != r) {
            continue;
        }
        let source = graph
            .get_node(edge.source_id)
            .map(|n| n.dn.as_str())
            .unwrap_or("?");
        let target = graph
            .get_node(edge.target_id)
            .map(|n| n.dn.as_str())
            .unwrap_or("?");
        eprintln!("  {}: {} -> {}", edge.kind.label(), source, target);
        count += 1;
    }
    eprintln!("  {count} edge(s)");
}

fn cmd_show(args: &str, state: &ReplState) {
    if !state.require_loaded() {
        return;
    }
    if args.is_empty() {
        eprintln!("  Usage: /show <dn>");
        return;
    }
    let key = normalize_dn(args);
    let Some(entry) = state
        .entries
        .iter()
        .find(|e| normalize_dn(&e.dn) == key)
    else {
        eprintln!("  Entry '{args}' not found.");
        return;
    };

    eprintln!("  dn: {}", entry.dn);
    let mut names: Vec<&str> = entry.attribute_names().collect();
    names.sort_unstable();
    for name in names {
        for value in entry.values(name) {
            eprintln!("    {name}: {value}");
        }
    }

    if let Some(graph) = state.graph.as_ref() {
        if let Some(node) = graph.find_by_dn(&entry.dn) {
            let members = graph.members_of(node.id);
            if !members.is_empty() {
                eprintln!("  Members: {}", members.len());
            }
        }
    }
}

fn cmd_stats(state: &ReplState) {
    let Some(graph) = state.require_graph() else {
        return;
    };
    eprintln!("  Nodes: {}", graph.node_count());
    eprintln!("    People: {}", graph.kind_count(NodeKind::Person));
    eprintln!("    Groups: {}", graph.kind_count(NodeKind::Group));
    eprintln!("    Org units: {}", graph.kind_count(NodeKind::OrgUnit));
    eprintln!("    Unknown: {}", graph.kind_count(NodeKind::Unknown));
    eprintln!("    Placeholders: {}", graph.placeholder_count());
    eprintln!("  Edges: {}", graph.edge_count());
    eprintln!(
        "    memberOf: {}",
        graph.relation_count(RelationKind::MemberOf)
    );
    eprintln!(
        "    reportsTo: {}",
        graph.relation_count(RelationKind::ReportsTo)
    );
}

fn cmd_export(args: &str, state: &ReplState) -> Result<(), Box<dyn std::error::Error>> {
    let Some(graph) = state.require_graph() else {
        return Ok(());
    };
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let (nodes_out, edges_out) = match tokens.as_slice() {
        [] => (PathBuf::from("nodes.csv"), PathBuf::from("edges.csv")),
        [n, e] => (PathBuf::from(n), PathBuf::from(e)),
        _ => {
            eprintln!("  Usage: /export [nodes_file edges_file]");
            return Ok(());
        }
    };
    CsvExporter::new().write_files(graph, &nodes_out, &edges_out)?;
    eprintln!(
        "  Files saved: {} and {}",
        nodes_out.display(),
        edges_out.display()
    );
    Ok(())
}

fn cmd_gexf(args: &str, state: &ReplState) -> Result<(), Box<dyn std::error::Error>> {
    let Some(graph) = state.require_graph() else {
        return Ok(());
    };
    let out = PathBuf::from(args.split_whitespace().next().unwrap_or("graph.gexf"));
    GexfExporter::new().write_file(graph, &out)?;
    eprintln!("  File saved: {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_filter() {
        assert_eq!(node_kind_filter(""), Ok(None));
        assert_eq!(node_kind_filter("group"), Ok(Some(NodeKind::Group)));
        assert_eq!(node_kind_filter("org_unit extra"), Ok(Some(NodeKind::OrgUnit)));
        assert_eq!(node_kind_filter("bogus"), Err("bogus"));
    }

    #[test]
    fn test_relation_filter() {
        assert_eq!(relation_filter(""), Ok(None));
        assert_eq!(relation_filter("member_of"), Ok(Some(RelationKind::MemberOf)));
        assert_eq!(relation_filter("reports_to"), Ok(Some(RelationKind::ReportsTo)));
        assert_eq!(relation_filter("bogus"), Err("bogus"));
    }
}
