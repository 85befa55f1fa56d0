use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vmselect::{GroupingMode, ProviderType};

/// vmselect - choose which inventory VMs a migration plan includes
#[derive(Parser, Debug)]
#[command(name = "vmselect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./vmselect.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use ASCII icons even on a unicode terminal
    #[arg(long, global = true)]
    pub ascii: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the filter tree after replaying checks, search and tab switches
    View {
        /// Directory holding vms.* and tree.<mode>.* exports
        dir: PathBuf,

        /// Grouping tab to open
        #[arg(short, long)]
        mode: Option<GroupingMode>,

        /// Provider type the exports come from
        #[arg(long)]
        provider: Option<ProviderType>,

        /// Search text
        #[arg(short, long)]
        search: Option<String>,

        /// Click the checkbox of a node, by display key (repeatable)
        #[arg(long = "check", value_name = "KEY")]
        checks: Vec<String>,

        /// Existing plan being edited (JSON or YAML)
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Preselect the plan's VMs and keep them across tab switches
        #[arg(long, requires = "plan")]
        prefilled: bool,

        /// Switch to another grouping tab after the checks
        #[arg(long, value_name = "MODE")]
        switch_to: Option<GroupingMode>,
    },

    /// Print the VMs a set of selected nodes denotes
    Resolve {
        /// Directory holding vms.* and tree.<mode>.* exports
        dir: PathBuf,

        /// Grouping the node ids belong to
        #[arg(short, long)]
        mode: GroupingMode,

        /// Selected node ids
        #[arg(long = "select", value_name = "ID", required = true, num_args = 1..)]
        select: Vec<String>,
    },

    /// Check that every export parses and forms a valid tree
    Validate {
        /// Directory holding vms.* and tree.<mode>.* exports
        dir: PathBuf,
    },
}
