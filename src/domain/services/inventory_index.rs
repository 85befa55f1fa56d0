//! Inventory index
//!
//! Builds an arena-style view of an inventory document: a flat, depth-first
//! ordered node table with id, path and display-key lookups computed once per
//! build. Pre-order layout makes every subtree a contiguous slice, so
//! descendant queries need no traversal.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::entities::{InventoryNode, RawInventoryTree, ROOT_ID};
use crate::domain::services::ROOT_DISPLAY_KEY;
use crate::domain::value_objects::NodeId;
use crate::error::MalformedTreeError;

/// Immutable, indexed inventory tree
#[derive(Debug, Clone)]
pub struct IndexedTree {
    /// All nodes in depth-first pre-order (display order)
    nodes: Vec<InventoryNode>,
    /// id -> index into `nodes`
    positions: HashMap<NodeId, usize>,
    /// Exclusive end index of each node's subtree in `nodes`
    subtree_end: Vec<usize>,
    /// id -> root-first ancestor ids followed by the id itself
    paths: HashMap<NodeId, Vec<NodeId>>,
    /// display key -> id
    display_keys: HashMap<String, NodeId>,
}

impl IndexedTree {
    /// Build from a nested provider document
    pub fn build(raw: RawInventoryTree) -> Result<Self, MalformedTreeError> {
        let (root, records) = raw.into_records()?;
        Self::from_records(root, records)
    }

    /// Root-only tree used while inventory data is pending or failed
    pub fn empty() -> Self {
        let root = InventoryNode::container(ROOT_ID, "");
        let id = root.id.clone();
        Self {
            positions: HashMap::from([(id.clone(), 0)]),
            subtree_end: vec![1],
            paths: HashMap::from([(id.clone(), vec![id.clone()])]),
            display_keys: HashMap::from([(ROOT_ID.to_string(), id)]),
            nodes: vec![root],
        }
    }

    /// Build from flat node records.
    ///
    /// Child lists are authoritative; a declared `parent_id` must agree with
    /// them and is filled in when absent.
    pub fn from_records(
        root: NodeId,
        records: Vec<InventoryNode>,
    ) -> Result<Self, MalformedTreeError> {
        let mut by_id: HashMap<NodeId, InventoryNode> = HashMap::with_capacity(records.len());
        for record in records {
            if by_id.contains_key(&record.id) {
                return Err(MalformedTreeError::DuplicateNode(record.id));
            }
            by_id.insert(record.id.clone(), record);
        }

        if !by_id.contains_key(&root) {
            return Err(MalformedTreeError::MissingRoot(root));
        }

        let total = by_id.len();
        let mut nodes: Vec<InventoryNode> = Vec::with_capacity(total);
        let mut positions: HashMap<NodeId, usize> = HashMap::with_capacity(total);
        let mut paths: HashMap<NodeId, Vec<NodeId>> = HashMap::with_capacity(total);
        let mut parents: HashMap<NodeId, NodeId> = HashMap::with_capacity(total);

        let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(root, None)];
        while let Some((id, parent)) = stack.pop() {
            if let Some(parent) = &parent {
                if let Some(first) = parents.get(&id) {
                    let on_path = paths
                        .get(parent)
                        .map(|p| p.contains(&id))
                        .unwrap_or(false);
                    return Err(if on_path {
                        MalformedTreeError::Cycle {
                            parent: parent.clone(),
                            child: id,
                        }
                    } else {
                        MalformedTreeError::MultipleParents {
                            child: id,
                            first: first.clone(),
                            second: parent.clone(),
                        }
                    });
                }
                parents.insert(id.clone(), parent.clone());
            }

            let Some(mut node) = by_id.remove(&id) else {
                // Records are removed as they are placed, so a miss here is a
                // reference to an id that never existed.
                return Err(MalformedTreeError::DanglingChild {
                    parent: parent.unwrap_or_else(|| id.clone()),
                    child: id,
                });
            };

            if let Some(declared) = &node.parent_id {
                if parent.as_ref() != Some(declared) {
                    return Err(MalformedTreeError::ParentMismatch {
                        node: node.id.clone(),
                        declared: declared.clone(),
                        actual: parent.unwrap_or_else(|| NodeId::from("<none>")),
                    });
                }
            }
            node.parent_id = parent.clone();

            if node.is_vm() && !node.child_ids.is_empty() {
                return Err(MalformedTreeError::VmWithChildren(node.id));
            }

            let mut path = parent
                .as_ref()
                .and_then(|p| paths.get(p).cloned())
                .unwrap_or_default();
            path.push(id.clone());

            // A child listed twice by the same parent, or an ancestor listed
            // as a child, is caught when it is popped again.
            for child in node.child_ids.iter().rev() {
                if path.contains(child) {
                    return Err(MalformedTreeError::Cycle {
                        parent: id.clone(),
                        child: child.clone(),
                    });
                }
                stack.push((child.clone(), Some(id.clone())));
            }

            positions.insert(id.clone(), nodes.len());
            paths.insert(id, path);
            nodes.push(node);
        }

        if let Some(orphan) = by_id.into_keys().min() {
            return Err(MalformedTreeError::Disconnected(orphan));
        }

        // Subtree sizes, children before parents.
        let mut subtree_end = vec![0; nodes.len()];
        for index in (0..nodes.len()).rev() {
            let size: usize = 1 + nodes[index]
                .child_ids
                .iter()
                .map(|c| subtree_end[positions[c]] - positions[c])
                .sum::<usize>();
            subtree_end[index] = index + size;
        }

        let mut display_keys: HashMap<String, NodeId> = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            let key = node.display_key();
            if index > 0 && key == ROOT_DISPLAY_KEY {
                return Err(MalformedTreeError::ReservedDisplayKey(node.id.clone()));
            }
            if let Some(first) = display_keys.insert(key.to_string(), node.id.clone()) {
                return Err(MalformedTreeError::DuplicateDisplayKey {
                    key: key.to_string(),
                    first,
                    second: node.id.clone(),
                });
            }
        }

        debug!(nodes = nodes.len(), "built inventory index");

        Ok(Self {
            nodes,
            positions,
            subtree_end,
            paths,
            display_keys,
        })
    }

    /// The root node
    pub fn root(&self) -> &InventoryNode {
        &self.nodes[0]
    }

    /// Check whether `id` is the root
    pub fn is_root(&self, id: &NodeId) -> bool {
        self.nodes[0].id == *id
    }

    /// Look up a node by id
    pub fn node(&self, id: &NodeId) -> Option<&InventoryNode> {
        self.positions.get(id).map(|&i| &self.nodes[i])
    }

    /// Display-order position of a node
    pub fn position(&self, id: &NodeId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Direct children in document order
    pub fn children<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a InventoryNode> + 'a {
        self.node(id)
            .map(|n| n.child_ids.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |c| self.node(c))
    }

    /// All nodes in depth-first pre-order
    pub fn flattened_nodes(&self) -> &[InventoryNode] {
        &self.nodes
    }

    /// Root-first ancestor ids followed by `id`
    pub fn path(&self, id: &NodeId) -> Option<&[NodeId]> {
        self.paths.get(id).map(Vec::as_slice)
    }

    /// Descendants of `id` in depth-first pre-order.
    ///
    /// With `include_self` the node itself comes first. Unknown ids yield an
    /// empty slice.
    pub fn descendants(&self, id: &NodeId, include_self: bool) -> &[InventoryNode] {
        match self.positions.get(id) {
            Some(&start) => {
                let from = if include_self { start } else { start + 1 };
                &self.nodes[from..self.subtree_end[start]]
            }
            None => &[],
        }
    }

    /// Check whether `node` is `ancestor` or lies below it
    pub fn is_descendant_or_self(&self, node: &NodeId, ancestor: &NodeId) -> bool {
        match (self.positions.get(node), self.positions.get(ancestor)) {
            (Some(&n), Some(&a)) => n >= a && n < self.subtree_end[a],
            _ => false,
        }
    }

    /// Ancestors of `id`, root first, excluding the node itself
    pub fn ancestors(&self, id: &NodeId) -> Vec<&InventoryNode> {
        self.paths
            .get(id)
            .map(|path| {
                path[..path.len() - 1]
                    .iter()
                    .filter_map(|a| self.node(a))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve a display-layer key back to a node.
    ///
    /// Misses are expected after a rebuild and are not errors.
    pub fn lookup_by_display_key(&self, key: &str) -> Option<&InventoryNode> {
        let found = self.display_keys.get(key).and_then(|id| self.node(id));
        if found.is_none() {
            debug!(key, "display key lookup miss");
        }
        found
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but its root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for IndexedTree {
    fn default() -> Self {
        Self::empty()
    }
}
