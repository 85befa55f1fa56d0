use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use vmselect::application::{CheckOutcome, FilterSession, FormStateStore, ViewOptions, ViewStatus};
use vmselect::config::Config;
use vmselect::infrastructure::{load_plan, FileInventorySource};
use vmselect::{GroupingMode, InventorySource, ProviderType};

use super::OutputOptions;

/// Interactions replayed against a filter session before rendering
#[derive(Debug, Clone, Default)]
pub struct ViewArgs {
    pub dir: PathBuf,
    pub mode: Option<GroupingMode>,
    pub provider: Option<ProviderType>,
    pub search: Option<String>,
    pub checks: Vec<String>,
    pub plan: Option<PathBuf>,
    pub prefilled: bool,
    pub switch_to: Option<GroupingMode>,
}

pub fn cmd_view(args: ViewArgs, config: &Config, output: OutputOptions) -> Result<()> {
    let plan = match &args.plan {
        Some(path) => Some(
            load_plan(path).with_context(|| format!("loading plan {}", path.display()))?,
        ),
        None => None,
    };

    let provider = args.provider.unwrap_or(config.grouping.provider);
    let mode = args.mode.unwrap_or(config.grouping.default_mode);
    let form = Arc::new(FormStateStore::new(mode, false));
    let options = ViewOptions {
        root_label: config.view.root_label.clone(),
        expand_all: config.view.expand_all,
    };
    let source = FileInventorySource::new(&args.dir);

    let mut session = FilterSession::new(provider, form, plan, options);
    session.load_from(&source);

    if args.prefilled {
        match session.prefill_from_plan() {
            Some(preselection) => info!(
                selected = preselection.selection.len(),
                uncovered = preselection.uncovered.len(),
                "Selection prefilled from plan"
            ),
            None => warn!("Plan could not be applied; inventory did not load"),
        }
    }

    for key in &args.checks {
        match session.on_check(key) {
            CheckOutcome::LookupMiss => warn!(key = %key, "No node with this key"),
            outcome => info!(key = %key, ?outcome, "Checked"),
        }
    }

    if let Some(next) = args.switch_to {
        if let Some(ticket) = session.set_grouping_mode(next) {
            session.deliver_tree(ticket, source.fetch_tree(next));
        }
    }

    if let Some(query) = &args.search {
        session.on_search(query.as_str());
    }

    let view = session.view();
    let vms = session.selected_vms();
    println!("{}", output.renderer().render_view(&view, &vms));

    if matches!(view.status, ViewStatus::Error { .. }) {
        std::process::exit(1);
    }
    Ok(())
}
