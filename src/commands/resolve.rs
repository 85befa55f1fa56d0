use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;
use vmselect::infrastructure::FileInventorySource;
use vmselect::{AvailabilityResolver, GroupingMode, IndexedTree, InventorySource, NodeId, VmCatalog};

use super::OutputOptions;

pub fn cmd_resolve(dir: &Path, mode: GroupingMode, select: &[String], output: OutputOptions) -> Result<()> {
    let source = FileInventorySource::new(dir);
    let raw = source
        .fetch_tree(mode)
        .with_context(|| format!("loading {mode} tree"))?;
    let tree = IndexedTree::build(raw).with_context(|| format!("validating {mode} tree"))?;

    let catalog = match source.fetch_vms() {
        Ok(vms) => Some(VmCatalog::new(vms)),
        Err(err) => {
            warn!(error = %err, "VM list unavailable; using tree names");
            None
        }
    };

    let selected: Vec<NodeId> = select.iter().map(|id| NodeId::new(id.as_str())).collect();
    for id in &selected {
        if tree.position(id).is_none() {
            warn!(id = %id, "Unknown node id");
        }
    }

    let vms = AvailabilityResolver::new(&tree, mode)
        .with_catalog(catalog.as_ref())
        .resolve(&selected);
    println!("{}", output.renderer().render_resolution(mode, &vms));
    Ok(())
}
