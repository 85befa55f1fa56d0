//! vmselect CLI - replay VM filter interactions over exported inventories
//!
//! Usage: vmselect <COMMAND>
//!
//! Commands:
//!   view      Render the filter tree after checks, search and tab switches
//!   resolve   Print the VMs a set of selected nodes denotes
//!   validate  Check inventory exports

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use vmselect::config::{Config, ConfigWarning};
use vmselect::logging;

use cli::{Cli, Commands};
use commands::{OutputOptions, ViewArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, warnings) = match &cli.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            (config.with_env_overrides(), warnings)
        }
        None => {
            let cwd = std::env::current_dir().ok();
            Config::load_or_default(cwd.as_deref())
        }
    };

    logging::init(cli.verbose, config.output.verbosity)?;
    report_warnings(&warnings);

    let output = OutputOptions::new(&config, cli.json, cli.ascii, cli.verbose);

    match cli.command {
        Commands::View {
            dir,
            mode,
            provider,
            search,
            checks,
            plan,
            prefilled,
            switch_to,
        } => commands::cmd_view(
            ViewArgs {
                dir,
                mode,
                provider,
                search,
                checks,
                plan,
                prefilled,
                switch_to,
            },
            &config,
            output,
        ),
        Commands::Resolve { dir, mode, select } => {
            commands::cmd_resolve(&dir, mode, &select, output)
        }
        Commands::Validate { dir } => commands::cmd_validate(&dir, output),
    }
}

fn report_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        match &w.suggestion {
            Some(suggestion) => warn!(
                key = %w.key,
                location = %w.location(),
                "Unknown config key; did you mean '{suggestion}'?"
            ),
            None => warn!(key = %w.key, location = %w.location(), "Unknown config key"),
        }
    }
}
