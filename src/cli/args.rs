//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::Operation;

/// Organization chart manager: reparent employees with undo/redo history
#[derive(Parser, Debug)]
#[command(name = "orgchart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Show employee ids next to names
    #[arg(long, global = true)]
    pub ids: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the chart as a tree
    Show {
        /// Chart file (default: chart_file from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        chart: Option<PathBuf>,
    },

    /// Apply operations in order and print the resulting chart
    ///
    /// Operations: move:<employee>:<supervisor>, undo, redo
    Run {
        /// Chart file (default: chart_file from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        chart: Option<PathBuf>,

        /// Operations to apply
        #[arg(required = true, value_parser = parse_operation)]
        ops: Vec<Operation>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
    /// Print a starter config file
    Template,
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    s.parse::<Operation>().map_err(|e| e.to_string())
}
