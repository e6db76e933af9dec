//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Annotate shell command lines with box-drawing caption diagrams
#[derive(Parser, Debug)]
#[command(name = "shexplain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Diagram width in display columns
    #[arg(long, global = true)]
    pub width: Option<usize>,

    /// Alternate light/heavy connector lines per caption
    #[arg(long, global = true)]
    pub pens: bool,

    /// Config file to use instead of the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Explain a command line from the knowledge base
    Explain {
        /// Command line words
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,

        /// Explain a raw string instead (quoting preserved)
        #[arg(short = 'c', long, conflicts_with = "words")]
        command: Option<String>,
    },

    /// Render a hand-written annotation document
    Annotate {
        /// Document file; '-' or nothing reads stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show a knowledge-base entry as a tree
    Lookup {
        /// Command name
        command: String,

        /// Limit to one subcommand scope
        subcommand: Option<String>,
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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config and knowledge-base paths
    Path,
}
