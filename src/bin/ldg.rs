//! CLI entry point for the `ldg` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use ldifgraph::cli::{commands, repl};
use ldifgraph::types::{LdifError, NodeKind, RelationKind};

#[derive(Parser)]
#[command(
    name = "ldg",
    about = "ldifgraph CLI: LDIF dumps in, Gephi-ready relationship graphs out"
)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a dump: entries, detected attributes, graph breakdown
    Info {
        /// Path to the LDIF file
        file: PathBuf,
        /// Comma-separated membership attributes (default: auto-detect)
        #[arg(long)]
        attrs: Option<String>,
    },
    /// Detect membership attributes in a dump
    Detect {
        /// Path to the LDIF file
        file: PathBuf,
    },
    /// List the nodes of the derived graph
    Nodes {
        /// Path to the LDIF file
        file: PathBuf,
        /// Comma-separated membership attributes (default: auto-detect)
        #[arg(long)]
        attrs: Option<String>,
        /// Only nodes of this kind: person, group, org_unit, unknown
        #[arg(long)]
        kind: Option<String>,
        /// Maximum nodes to list (0 = all)
        #[arg(long, default_value = "0")]
        limit: usize,
    },
    /// List the edges of the derived graph
    Edges {
        /// Path to the LDIF file
        file: PathBuf,
        /// Comma-separated membership attributes (default: auto-detect)
        #[arg(long)]
        attrs: Option<String>,
        /// Only edges of this relation: member_of, reports_to
        #[arg(long)]
        relation: Option<String>,
        /// Maximum edges to list (0 = all)
        #[arg(long, default_value = "0")]
        limit: usize,
    },
    /// Show one entry by its distinguished name
    Show {
        /// Path to the LDIF file
        file: PathBuf,
        /// The entry's DN
        dn: String,
        /// Comma-separated membership attributes (default: auto-detect)
        #[arg(long)]
        attrs: Option<String>,
    },
    /// Export the graph for Gephi
    Export {
        /// Path to the LDIF file
        file: PathBuf,
        /// Comma-separated membership attributes (default: auto-detect)
        #[arg(long)]
        attrs: Option<String>,
        /// Drop edges to DNs absent from the dump instead of adding
        /// placeholder nodes
        #[arg(long)]
        drop_dangling: bool,
        /// Write a single GEXF file instead of CSV
        #[arg(long)]
        gexf: bool,
        /// Output path for the GEXF file
        #[arg(long, default_value = "graph.gexf")]
        out: PathBuf,
        /// Output path for the nodes CSV
        #[arg(long, default_value = "nodes.csv")]
        nodes_out: PathBuf,
        /// Output path for the edges CSV
        #[arg(long, default_value = "edges.csv")]
        edges_out: PathBuf,
    },
}

fn split_attrs(attrs: Option<String>) -> Option<Vec<String>> {
    attrs.map(|s| {
        s.split(',')
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    })
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    let command = match cli.command {
        Some(c) => c,
        None => {
            if let Err(e) = repl::run() {
                eprintln!("Error: {e}");
                process::exit(1);
            }
            return;
        }
    };

    let result = match command {
        Commands::Info { file, attrs } => {
            let attrs = split_attrs(attrs);
            commands::cmd_info(&file, attrs.as_deref(), json)
        }
        Commands::Detect { file } => commands::cmd_detect(&file, json),
        Commands::Nodes {
            file,
            attrs,
            kind,
            limit,
        } => {
            let kind = match kind {
                Some(k) => match NodeKind::from_name(&k) {
                    Some(k) => Some(k),
                    None => {
                        eprintln!("Invalid node kind: {k}");
                        process::exit(3);
                    }
                },
                None => None,
            };
            let attrs = split_attrs(attrs);
            commands::cmd_nodes(&file, attrs.as_deref(), kind, limit, json)
        }
        Commands::Edges {
            file,
            attrs,
            relation,
            limit,
        } => {
            let relation = match relation {
                Some(r) => match RelationKind::from_name(&r) {
                    Some(r) => Some(r),
                    None => {
                        eprintln!("Invalid relation kind: {r}");
                        process::exit(3);
                    }
                },
                None => None,
            };
            let attrs = split_attrs(attrs);
            commands::cmd_edges(&file, attrs.as_deref(), relation, limit, json)
        }
        Commands::Show { file, dn, attrs } => {
            let attrs = split_attrs(attrs);
            commands::cmd_show(&file, attrs.as_deref(), &dn, json)
        }
        Commands::Export {
            file,
            attrs,
            drop_dangling,
            gexf,
            out,
            nodes_out,
            edges_out,
        } => {
            let attrs = split_attrs(attrs);
            if gexf {
                commands::cmd_export_gexf(&file, attrs.as_deref(), drop_dangling, &out)
            } else {
                commands::cmd_export_csv(
                    &file,
                    attrs.as_deref(),
                    drop_dangling,
                    &nodes_out,
                    &edges_out,
                )
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        let code = match &e {
            LdifError::Io(_) => 1,
            LdifError::MalformedLine { .. } | LdifError::MissingDn(_) | LdifError::InvalidBase64(_) => 2,
            LdifError::DnNotFound(_) | LdifError::NodeNotFound(_) => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
