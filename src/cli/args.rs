//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::NodePath;

/// Convert dotted/numbered taxonomy outlines into nested JSON trees
#[derive(Parser, Debug)]
#[command(name = "taxtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Working directory: local config location and base for configured paths
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    // no subcommand: convert with configured paths
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an outline file to JSON
    Convert {
        /// Outline file (default: configured input)
        #[arg(value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// JSON file to write (default: configured output)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Spaces per nesting level
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Show the taxonomy as a tree
    Tree {
        /// Outline file or previously written JSON (default: configured input)
        #[arg(value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// Hide nodes deeper than this (top level = 1)
        #[arg(short, long)]
        max_depth: Option<usize>,
        /// Prefix nodes with their path, as used by `edit`
        #[arg(short, long)]
        paths: bool,
    },

    /// Count nodes per level
    Stats {
        /// Outline file or previously written JSON (default: configured input)
        #[arg(value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Rename, add or remove nodes and write the tree as JSON
    Edit {
        #[command(subcommand)]
        command: EditCommands,
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

/// File arguments shared by the `edit` subcommands.
#[derive(Args, Debug)]
pub struct EditFileArgs {
    /// JSON tree or outline to edit
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
    /// JSON file to write (default: FILE if it is JSON, else configured output)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Spaces per nesting level
    #[arg(long)]
    pub indent: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum EditCommands {
    /// Rename the node at PATH
    Rename {
        #[command(flatten)]
        file: EditFileArgs,
        /// Node path, 1-based and dot-separated (see `tree --paths`)
        path: NodePath,
        /// New name
        name: String,
    },

    /// Append a node, under PARENT or at the top level
    Add {
        #[command(flatten)]
        file: EditFileArgs,
        /// Name of the new node
        name: String,
        /// Path of the parent node
        #[arg(short = 'u', long = "under")]
        parent: Option<NodePath>,
        /// Code for the new node
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Remove the node at PATH with everything below it
    Remove {
        #[command(flatten)]
        file: EditFileArgs,
        /// Node path, 1-based and dot-separated (see `tree --paths`)
        path: NodePath,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print a config template
    Template,
}
