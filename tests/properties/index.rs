//! Property tests for the indexed inventory tree.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::sample::Index;

use crate::common::records_from_parents;
use vmselect::{IndexedTree, NodeId};

/// Parent choices for up to 24 non-root nodes plus the VM marks
pub fn tree_shape() -> impl Strategy<Value = (Vec<usize>, HashSet<usize>)> {
    (
        prop::collection::vec(any::<Index>(), 0..24),
        prop::collection::hash_set(1usize..25, 0..24),
    )
        .prop_map(|(picks, vms)| {
            let parents = picks
                .iter()
                .enumerate()
                .map(|(i, pick)| pick.index(i + 1))
                .collect();
            (parents, vms)
        })
}

pub fn build(parents: &[usize], vms: &HashSet<usize>) -> IndexedTree {
    let (root, records) = records_from_parents(parents, vms);
    IndexedTree::from_records(root, records).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every record lands in the index and pre-order puts parents first.
    #[test]
    fn property_index_is_preorder((parents, vms) in tree_shape()) {
        let tree = build(&parents, &vms);
        prop_assert_eq!(tree.len(), parents.len() + 1);
        prop_assert_eq!(tree.descendants(&tree.root().id, true).len(), tree.len());

        for node in tree.flattened_nodes() {
            if let Some(parent) = &node.parent_id {
                prop_assert!(tree.position(parent).unwrap() < tree.position(&node.id).unwrap());
            }
        }
    }

    /// PROPERTY: descendants, paths and ancestry checks agree with each other.
    #[test]
    fn property_descendants_match_paths((parents, vms) in tree_shape()) {
        let tree = build(&parents, &vms);

        for node in tree.flattened_nodes() {
            let below: HashSet<&NodeId> = tree
                .descendants(&node.id, false)
                .iter()
                .map(|n| &n.id)
                .collect();

            for other in tree.flattened_nodes() {
                let path = tree.path(&other.id).unwrap();
                let under = path.contains(&node.id);
                prop_assert_eq!(tree.is_descendant_or_self(&other.id, &node.id), under);
                prop_assert_eq!(below.contains(&other.id), under && other.id != node.id);
            }

            let ancestors: Vec<&NodeId> = tree.ancestors(&node.id).iter().map(|n| &n.id).collect();
            let path = tree.path(&node.id).unwrap();
            prop_assert_eq!(ancestors.len() + 1, path.len());
            prop_assert_eq!(path.last(), Some(&node.id));
        }
    }

    /// PROPERTY: Every node is found again by its display key.
    #[test]
    fn property_display_keys_round_trip((parents, vms) in tree_shape()) {
        let tree = build(&parents, &vms);
        for node in tree.flattened_nodes() {
            let found = tree.lookup_by_display_key(node.display_key()).map(|n| &n.id);
            prop_assert_eq!(found, Some(&node.id));
        }
    }

    /// PROPERTY: A child reference to a missing node is rejected, never panics.
    #[test]
    fn property_dangling_reference_is_rejected((parents, vms) in tree_shape()) {
        let (root, mut records) = records_from_parents(&parents, &vms);
        let container = records.iter_mut().find(|r| !r.is_vm()).unwrap();
        container.child_ids.push(NodeId::from("missing"));
        prop_assert!(IndexedTree::from_records(root, records).is_err());
    }
}
