//! Grouping Policy
//!
//! Mode-dependent selection rules. Each grouping mode has one implementation,
//! picked once per mode via [`GroupingMode::policy`] and reused until the next
//! mode switch, so no other component branches on the mode.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::entities::{InventoryNode, NodeKind};
use crate::domain::services::IndexedTree;
use crate::domain::value_objects::{GroupingMode, NodeId, VmId};

/// Nodes to select in a tree so that they denote a known VM set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preselection {
    /// Minimal set of subtree roots covering the target
    pub roots: Vec<NodeId>,
    /// `roots` plus their selectable descendants, in display order
    pub selection: Vec<NodeId>,
    /// Target VMs no exact cover in this tree can include, sorted
    pub uncovered: Vec<VmId>,
}

/// Selection rules of one grouping mode
pub trait GroupingPolicy: Send + Sync {
    /// The mode this policy implements
    fn mode(&self) -> GroupingMode;

    /// Whether a node may be selected directly.
    ///
    /// Depends only on the node's kind and position; the root is driven by
    /// select-all and is never selectable itself.
    fn is_selectable(&self, node: &InventoryNode) -> bool;

    /// VM nodes a selected node stands for
    fn denoted_vm_nodes<'t>(
        &self,
        tree: &'t IndexedTree,
        node: &'t InventoryNode,
    ) -> Vec<&'t InventoryNode>;

    /// Nodes whose denoted VMs cover `target` without exceeding it
    fn preselect(&self, tree: &IndexedTree, target: &HashSet<VmId>) -> Preselection;
}

/// Clusters, hosts and folders are selected; each denotes every VM below it
#[derive(Debug, Clone, Copy, Default)]
pub struct ByContainer;

/// Individual VMs are selected; containers only group them
#[derive(Debug, Clone, Copy, Default)]
pub struct ByLeaf;

static BY_CONTAINER: ByContainer = ByContainer;
static BY_LEAF: ByLeaf = ByLeaf;

impl GroupingMode {
    /// Selection rules for this mode
    pub fn policy(&self) -> &'static dyn GroupingPolicy {
        match self {
            GroupingMode::ByContainer => &BY_CONTAINER,
            GroupingMode::ByLeaf => &BY_LEAF,
        }
    }
}

impl GroupingPolicy for ByContainer {
    fn mode(&self) -> GroupingMode {
        GroupingMode::ByContainer
    }

    fn is_selectable(&self, node: &InventoryNode) -> bool {
        node.kind == NodeKind::Container && !node.is_root()
    }

    fn denoted_vm_nodes<'t>(
        &self,
        tree: &'t IndexedTree,
        node: &'t InventoryNode,
    ) -> Vec<&'t InventoryNode> {
        tree.descendants(&node.id, true)
            .iter()
            .filter(|n| n.is_vm())
            .collect()
    }

    fn preselect(&self, tree: &IndexedTree, target: &HashSet<VmId>) -> Preselection {
        let nodes = tree.flattened_nodes();
        let mut result = Preselection::default();
        let mut covered: HashSet<VmId> = HashSet::new();

        // Pre-order walk: the first qualifying container on a path wins and
        // its subtree is skipped, which keeps the cover minimal.
        let mut index = 0;
        while index < nodes.len() {
            let node = &nodes[index];
            if self.is_selectable(node) {
                let vms: Vec<VmId> = self
                    .denoted_vm_nodes(tree, node)
                    .iter()
                    .map(|n| VmId::from(&n.id))
                    .collect();
                if !vms.is_empty() && vms.iter().all(|vm| target.contains(vm)) {
                    let subtree = tree.descendants(&node.id, true);
                    result.roots.push(node.id.clone());
                    result.selection.extend(
                        subtree
                            .iter()
                            .filter(|n| self.is_selectable(n))
                            .map(|n| n.id.clone()),
                    );
                    covered.extend(vms);
                    index += subtree.len();
                    continue;
                }
            }
            index += 1;
        }

        result.uncovered = uncovered(target, &covered);
        result
    }
}

impl GroupingPolicy for ByLeaf {
    fn mode(&self) -> GroupingMode {
        GroupingMode::ByLeaf
    }

    fn is_selectable(&self, node: &InventoryNode) -> bool {
        node.kind == NodeKind::Vm && !node.is_root()
    }

    fn denoted_vm_nodes<'t>(
        &self,
        _tree: &'t IndexedTree,
        node: &'t InventoryNode,
    ) -> Vec<&'t InventoryNode> {
        if node.is_vm() {
            vec![node]
        } else {
            warn!(node = %node.id, "container selected while grouping by leaf; ignoring");
            Vec::new()
        }
    }

    fn preselect(&self, tree: &IndexedTree, target: &HashSet<VmId>) -> Preselection {
        let mut result = Preselection::default();
        let mut covered: HashSet<VmId> = HashSet::new();

        for node in tree.flattened_nodes().iter().filter(|n| self.is_selectable(n)) {
            let vm = VmId::from(&node.id);
            if target.contains(&vm) {
                result.roots.push(node.id.clone());
                result.selection.push(node.id.clone());
                covered.insert(vm);
            }
        }

        result.uncovered = uncovered(target, &covered);
        result
    }
}

fn uncovered(target: &HashSet<VmId>, covered: &HashSet<VmId>) -> Vec<VmId> {
    let mut missing: Vec<VmId> = target.difference(covered).cloned().collect();
    missing.sort();
    missing
}
