//! Command-line interface: subcommand implementations and the REPL.

pub mod commands;
pub mod repl;
pub mod repl_complete;
