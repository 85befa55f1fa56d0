//! Property tests for search projection.

use proptest::prelude::*;

use super::index::{build, tree_shape};
use vmselect::domain::services::{project, DisplayNode, ProjectionInputs};
use vmselect::{IndexedTree, InventoryNode};

fn project_plain(tree: &IndexedTree, query: &str) -> vmselect::DisplayTree {
    let never = |_: &InventoryNode| false;
    let badge = |_: &InventoryNode, _: bool| -> Option<String> { None };
    let inputs = ProjectionInputs {
        is_selected: &never,
        is_selectable: &never,
        badge: &badge,
        are_all_selected: false,
        any_selected: false,
        root_label: "All",
        expand_all: true,
    };
    project(Some(tree), query, &inputs)
}

fn keys(node: &DisplayNode, out: &mut Vec<String>) {
    out.push(node.key.clone());
    for child in &node.children {
        keys(child, out);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: An empty query shows every node.
    #[test]
    fn property_empty_query_keeps_everything((parents, vms) in tree_shape()) {
        let tree = build(&parents, &vms);
        let display = project_plain(&tree, "  ");
        prop_assert_eq!(display.roots.len(), 1);
        prop_assert_eq!(display.roots[0].count(), tree.len());
    }

    /// PROPERTY: Every matching node is shown, together with its ancestors.
    #[test]
    fn property_matches_are_never_dropped(
        (parents, vms) in tree_shape(),
        digit in 0usize..25,
        upper in any::<bool>(),
    ) {
        let tree = build(&parents, &vms);
        let query = if upper { format!("NODE {digit}") } else { format!("node {digit}") };
        let display = project_plain(&tree, &query);

        let mut shown = Vec::new();
        for root in &display.roots {
            keys(root, &mut shown);
        }

        let needle = query.to_lowercase();
        for node in tree.flattened_nodes().iter().skip(1) {
            if node.name().to_lowercase().contains(&needle) {
                prop_assert!(shown.iter().any(|k| k == node.display_key()));
                for ancestor in tree.ancestors(&node.id).iter().skip(1) {
                    prop_assert!(shown.iter().any(|k| k == ancestor.display_key()));
                }
            }
        }
    }

    /// PROPERTY: Every shown node matches, sits above a match, or sits below one.
    #[test]
    fn property_shown_nodes_are_related_to_a_match(
        (parents, vms) in tree_shape(),
        digit in 0usize..25,
    ) {
        let tree = build(&parents, &vms);
        let needle = format!("node {digit}");
        let display = project_plain(&tree, &needle);

        let mut shown = Vec::new();
        for root in &display.roots {
            keys(root, &mut shown);
        }

        let matching: Vec<&InventoryNode> = tree
            .flattened_nodes()
            .iter()
            .filter(|n| n.name().to_lowercase().contains(&needle))
            .collect();

        for key in shown.iter().skip(1) {
            let node = tree.lookup_by_display_key(key).unwrap();
            let related = matching.iter().any(|m| {
                tree.is_descendant_or_self(&m.id, &node.id)
                    || tree.is_descendant_or_self(&node.id, &m.id)
            });
            prop_assert!(related, "node {} shown without a related match", key);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Extending the query never shows a node the shorter query hid.
    #[test]
    fn property_longer_query_prunes_monotonically(
        (parents, vms) in tree_shape(),
        first in 1usize..3,
        second in 0usize..10,
    ) {
        let tree = build(&parents, &vms);
        let short = format!("node {first}");
        let long = format!("node {first}{second}");

        let mut shown_short = Vec::new();
        for root in &project_plain(&tree, &short).roots {
            keys(root, &mut shown_short);
        }
        let mut shown_long = Vec::new();
        for root in &project_plain(&tree, &long).roots {
            keys(root, &mut shown_long);
        }

        for key in &shown_long {
            prop_assert!(shown_short.contains(key), "{} shown for '{}' only", key, long);
        }
    }
}
