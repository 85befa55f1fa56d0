//! Filter/search projector
//!
//! Turns an indexed tree plus the current selection into the display tree a
//! checkbox-tree widget renders: pruned by free-text search and annotated with
//! check state and VM-count badges.

use serde::Serialize;

use crate::domain::entities::{InventoryNode, ROOT_ID};
use crate::domain::services::IndexedTree;
use crate::domain::value_objects::CheckState;

/// Display key of the synthetic top node
pub const ROOT_DISPLAY_KEY: &str = "inventory-root";

/// One node of the display tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    /// Stable key the widget reports back on check events
    pub key: String,
    pub label: String,
    pub check: CheckState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    /// Depth-first search for a node by key
    pub fn find(&self, key: &str) -> Option<&DisplayNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    /// Number of nodes in this subtree, self included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DisplayNode::count).sum::<usize>()
    }
}

/// Display-ready tree; empty while no inventory is available
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayTree {
    pub roots: Vec<DisplayNode>,
}

impl DisplayTree {
    /// Find a node anywhere in the tree by key
    pub fn find(&self, key: &str) -> Option<&DisplayNode> {
        self.roots.iter().find_map(|r| r.find(key))
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Selection callbacks and view options the projection reads
pub struct ProjectionInputs<'a> {
    pub is_selected: &'a dyn Fn(&InventoryNode) -> bool,
    pub is_selectable: &'a dyn Fn(&InventoryNode) -> bool,
    /// Badge text for a node; the flag marks the root
    pub badge: &'a dyn Fn(&InventoryNode, bool) -> Option<String>,
    pub are_all_selected: bool,
    pub any_selected: bool,
    /// Label of the top node when the document has no top object
    pub root_label: &'a str,
    /// Expansion state of every non-leaf node
    pub expand_all: bool,
}

/// Badge text for a node holding `count` VMs.
///
/// The root reads "`n` VMs" ("1 VM"); other nodes show the bare count. Zero
/// counts are hidden unless the node is selected, or, for the root, anything
/// is selected.
pub fn badge_text(
    count: usize,
    is_root: bool,
    node_selected: bool,
    any_selected: bool,
) -> Option<String> {
    if count == 0 && !node_selected && !(is_root && any_selected) {
        return None;
    }
    if is_root {
        let suffix = if count == 1 { "VM" } else { "VMs" };
        Some(format!("{count} {suffix}"))
    } else {
        Some(count.to_string())
    }
}

/// Project `tree` under `query` into a display tree.
///
/// Matching is a case-insensitive substring test on node names, decided
/// bottom-up: a node stays when its name matches or a child stays. A direct
/// match keeps its whole subtree.
pub fn project(tree: Option<&IndexedTree>, query: &str, inputs: &ProjectionInputs<'_>) -> DisplayTree {
    let Some(tree) = tree else {
        return DisplayTree::default();
    };

    let needle = query.trim().to_lowercase();
    let filter = (!needle.is_empty()).then_some(needle.as_str());

    let root = tree.root();
    let root_match = filter.is_some() && matches(root, filter);
    let child_filter = if root_match { None } else { filter };
    let children: Vec<DisplayNode> = tree
        .children(&root.id)
        .filter_map(|child| convert(tree, child, child_filter, inputs))
        .collect();

    if filter.is_some() && children.is_empty() && !root_match {
        return DisplayTree::default();
    }

    // A document with a real top object shows that object's name.
    let label = if root.id.as_str() != ROOT_ID && !root.name().is_empty() {
        root.name()
    } else {
        inputs.root_label
    };

    let check = if inputs.are_all_selected {
        CheckState::Checked
    } else if inputs.any_selected {
        CheckState::Indeterminate
    } else {
        CheckState::Unchecked
    };

    DisplayTree {
        roots: vec![DisplayNode {
            key: ROOT_DISPLAY_KEY.to_string(),
            label: label.to_string(),
            check,
            badge: (inputs.badge)(root, true),
            expanded: true,
            children,
        }],
    }
}

fn matches(node: &InventoryNode, filter: Option<&str>) -> bool {
    match filter {
        Some(needle) => node.name().to_lowercase().contains(needle),
        None => true,
    }
}

fn convert(
    tree: &IndexedTree,
    node: &InventoryNode,
    filter: Option<&str>,
    inputs: &ProjectionInputs<'_>,
) -> Option<DisplayNode> {
    // Below a direct match every descendant is kept.
    let self_match = filter.is_some() && matches(node, filter);
    let child_filter = if self_match { None } else { filter };

    let children: Vec<DisplayNode> = tree
        .children(&node.id)
        .filter_map(|child| convert(tree, child, child_filter, inputs))
        .collect();

    if filter.is_some() && !self_match && children.is_empty() {
        return None;
    }

    let selected = (inputs.is_selectable)(node) && (inputs.is_selected)(node);
    let check = if selected {
        CheckState::Checked
    } else if tree
        .descendants(&node.id, false)
        .iter()
        .any(|d| (inputs.is_selected)(d))
    {
        CheckState::Indeterminate
    } else {
        CheckState::Unchecked
    };

    Some(DisplayNode {
        key: node.display_key().to_string(),
        label: node.name().to_string(),
        check,
        badge: (inputs.badge)(node, false),
        expanded: inputs.expand_all && !children.is_empty(),
        children,
    })
}
