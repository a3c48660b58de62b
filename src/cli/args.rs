//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Worked examples of sequence processing: filter, map, reduce, sort, dedup, match and aggregate
#[derive(Parser, Debug)]
#[command(name = "streamlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Local config file (overrides the global config)
    #[arg(short, long, global = true, env = "STREAMLAB_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available examples
    List,

    /// Run examples and print their output
    Run {
        /// Example names (see `list`)
        #[arg(required_unless_present = "all")]
        names: Vec<String>,
        /// Run every example in catalog order
        #[arg(long, conflicts_with = "names")]
        all: bool,
        /// Element separator (overrides config; `\t` and `\n` escapes allowed)
        #[arg(short, long)]
        separator: Option<String>,
        /// Match sequentially instead of on the thread pool
        #[arg(long)]
        sequential: bool,
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
    /// Print effective settings as TOML
    Show,
    /// Print global config file path
    Path,
}
