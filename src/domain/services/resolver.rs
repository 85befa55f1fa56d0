//! Availability resolver
//!
//! Maps selected tree nodes to the VMs they denote under the active grouping
//! mode, deduplicating VMs reachable through several selected nodes.

use std::collections::BTreeMap;

use crate::domain::entities::{Vm, VmCatalog};
use crate::domain::policies::GroupingPolicy;
use crate::domain::services::IndexedTree;
use crate::domain::value_objects::{GroupingMode, NodeId, VmId};

/// Deduplicated set of VMs, ordered by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmSet {
    vms: BTreeMap<VmId, Vm>,
}

impl VmSet {
    /// Number of distinct VMs
    pub fn len(&self) -> usize {
        self.vms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vms.is_empty()
    }

    /// Check membership by VM id
    pub fn contains(&self, id: &VmId) -> bool {
        self.vms.contains_key(id)
    }

    /// VM ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = &VmId> {
        self.vms.keys()
    }

    /// VMs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Vm> {
        self.vms.values()
    }

    fn insert(&mut self, vm: Vm) {
        self.vms.entry(vm.id.clone()).or_insert(vm);
    }
}

impl FromIterator<Vm> for VmSet {
    fn from_iter<I: IntoIterator<Item = Vm>>(iter: I) -> Self {
        let mut set = VmSet::default();
        for vm in iter {
            set.insert(vm);
        }
        set
    }
}

/// Resolves node selections into VMs for one tree snapshot and mode
pub struct AvailabilityResolver<'a> {
    tree: &'a IndexedTree,
    policy: &'static dyn GroupingPolicy,
    catalog: Option<&'a VmCatalog>,
}

impl<'a> AvailabilityResolver<'a> {
    /// Create a resolver; VMs are synthesized from tree nodes until a
    /// catalog is attached
    pub fn new(tree: &'a IndexedTree, mode: GroupingMode) -> Self {
        Self {
            tree,
            policy: mode.policy(),
            catalog: None,
        }
    }

    /// Take VM attributes from the provider catalog where available
    pub fn with_catalog(mut self, catalog: Option<&'a VmCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// VMs denoted by the selected nodes.
    ///
    /// Set-valued: the result does not depend on order or repetition of
    /// `selected`. Ids missing from the tree are skipped.
    pub fn resolve<'n, I>(&self, selected: I) -> VmSet
    where
        I: IntoIterator<Item = &'n NodeId>,
    {
        let mut set = VmSet::default();
        for id in selected {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            for vm_node in self.policy.denoted_vm_nodes(self.tree, node) {
                let vm_id = VmId::from(&vm_node.id);
                if set.contains(&vm_id) {
                    continue;
                }
                let vm = self
                    .catalog
                    .and_then(|c| c.get(&vm_id))
                    .cloned()
                    .unwrap_or_else(|| Vm::from_node(vm_node));
                set.insert(vm);
            }
        }
        set
    }

    /// Distinct VMs reachable through selected descendants-or-self of a node
    pub fn badge_count(&self, id: &NodeId, is_selected: impl Fn(&NodeId) -> bool) -> usize {
        let selected = self
            .tree
            .descendants(id, true)
            .iter()
            .map(|n| &n.id)
            .filter(|id| is_selected(*id));
        self.resolve(selected).len()
    }
}
