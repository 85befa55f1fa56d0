#![no_main]

use libfuzzer_sys::fuzz_target;
use vmselect::domain::services::{project, ProjectionInputs};
use vmselect::{IndexedTree, InventoryNode, NodeId};

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(tree) = IndexedTree::from_records(
        NodeId::from("root"),
        vec![
            InventoryNode::container("root", "All").with_children(["a"]),
            InventoryNode::container("a", "Ǆungla İstanbul").with_children(["vm1"]),
            InventoryNode::vm("vm1", "ß-vm"),
        ],
    ) else {
        return;
    };

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
    // Case folding of arbitrary text must not panic
    let _ = project(Some(&tree), query, &inputs);
});
