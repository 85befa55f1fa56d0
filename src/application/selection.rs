//! Selection State
//!
//! The set of selected nodes over one tree snapshot and grouping mode, with
//! the bulk operations the checkbox tree needs. Every mutation pushes the
//! resulting selection to a [`SelectionSink`].

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::InventoryNode;
use crate::domain::policies::GroupingPolicy;
use crate::domain::ports::{SelectionEvent, SelectionSink};
use crate::domain::services::{AvailabilityResolver, IndexedTree, VmSet};
use crate::domain::value_objects::{GroupingMode, NodeId};

/// Result of a checkbox click on a non-root node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Nodes newly selected
    Selected(usize),
    /// Nodes deselected
    Deselected(usize),
    /// Nothing under the node is selectable; no-op
    EmptySelectionExpansion,
}

/// Selected nodes of one tree snapshot
pub struct SelectionState {
    tree: Arc<IndexedTree>,
    mode: GroupingMode,
    policy: &'static dyn GroupingPolicy,
    selected: HashSet<NodeId>,
    sink: Arc<dyn SelectionSink>,
}

impl SelectionState {
    /// Create a selection seeded with `initial`.
    ///
    /// Ids that are unknown or not selectable under `mode` are dropped.
    pub fn new(
        tree: Arc<IndexedTree>,
        mode: GroupingMode,
        initial: impl IntoIterator<Item = NodeId>,
        sink: Arc<dyn SelectionSink>,
    ) -> Self {
        let mut state = Self {
            tree,
            mode,
            policy: mode.policy(),
            selected: HashSet::new(),
            sink,
        };
        for id in initial {
            if state.accepts(&id) {
                state.selected.insert(id);
            }
        }
        state
    }

    pub fn tree(&self) -> &Arc<IndexedTree> {
        &self.tree
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    pub fn policy(&self) -> &'static dyn GroupingPolicy {
        self.policy
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.contains(id)
    }

    /// Nodes that may be selected, in display order
    pub fn selectable_nodes(&self) -> Vec<&InventoryNode> {
        self.tree
            .flattened_nodes()
            .iter()
            .filter(|n| self.policy.is_selectable(n))
            .collect()
    }

    /// Whether every selectable node is selected; false when none is selectable
    pub fn are_all_selected(&self) -> bool {
        let total = self.selectable_nodes().len();
        total > 0 && self.selected.len() == total
    }

    pub fn any_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Selected ids in display order
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.tree
            .flattened_nodes()
            .iter()
            .filter(|n| self.selected.contains(&n.id))
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Select or deselect every selectable node
    pub fn select_all(&mut self, selected: bool) {
        if selected {
            let ids: Vec<NodeId> = self
                .selectable_nodes()
                .into_iter()
                .map(|n| n.id.clone())
                .collect();
            self.selected.extend(ids);
        } else {
            self.selected.clear();
        }
        self.emit();
    }

    /// Select or deselect the given nodes; others are untouched
    pub fn select_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a NodeId>, selected: bool) {
        for id in ids {
            if !self.accepts(id) {
                debug!(node = %id, "Ignoring non-selectable node");
                continue;
            }
            if selected {
                self.selected.insert(id.clone());
            } else {
                self.selected.remove(id);
            }
        }
        self.emit();
    }

    /// Replace the whole selection
    pub fn set_selected(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.selected.clear();
        for id in ids {
            if self.accepts(&id) {
                self.selected.insert(id);
            }
        }
        self.emit();
    }

    /// Selectable nodes among the descendants-or-self of `id`
    pub fn selectable_subtree(&self, id: &NodeId) -> Vec<&InventoryNode> {
        self.tree
            .descendants(id, true)
            .iter()
            .filter(|n| self.policy.is_selectable(n))
            .collect()
    }

    /// Whether every selectable descendant-or-self of `id` is selected
    pub fn is_fully_checked(&self, id: &NodeId) -> bool {
        let subtree = self.selectable_subtree(id);
        !subtree.is_empty() && subtree.iter().all(|n| self.selected.contains(&n.id))
    }

    /// Checkbox click: select the node's selectable subtree, or deselect it
    /// when it is already fully selected
    pub fn toggle_subtree(&mut self, id: &NodeId) -> ToggleOutcome {
        let targets: Vec<NodeId> = self
            .selectable_subtree(id)
            .into_iter()
            .map(|n| n.id.clone())
            .collect();
        if targets.is_empty() {
            debug!(node = %id, "Nothing selectable under node");
            return ToggleOutcome::EmptySelectionExpansion;
        }

        if self.is_fully_checked(id) {
            self.select_many(&targets, false);
            ToggleOutcome::Deselected(targets.len())
        } else {
            let added = targets
                .iter()
                .filter(|t| !self.selected.contains(*t))
                .count();
            self.select_many(&targets, true);
            ToggleOutcome::Selected(added)
        }
    }

    /// VMs denoted by the current selection
    pub fn resolve(&self) -> VmSet {
        AvailabilityResolver::new(&self.tree, self.mode).resolve(&self.selected_ids())
    }

    fn accepts(&self, id: &NodeId) -> bool {
        self.tree
            .node(id)
            .is_some_and(|n| self.policy.is_selectable(n))
    }

    fn emit(&self) {
        self.sink.on_event(SelectionEvent::Changed {
            mode: self.mode,
            selected: self.selected_ids(),
        });
    }
}

impl std::fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionState")
            .field("mode", &self.mode)
            .field("selected", &self.selected_ids())
            .finish()
    }
}
