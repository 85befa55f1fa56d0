#![no_main]

use libfuzzer_sys::fuzz_target;
use vmselect::{AvailabilityResolver, GroupingMode, IndexedTree, RawInventoryTree};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<RawInventoryTree>(data) else {
        return;
    };
    // Arbitrary documents either index or are rejected, never panic
    let Ok(tree) = IndexedTree::build(raw) else {
        return;
    };

    let all: Vec<_> = tree.flattened_nodes().iter().map(|n| n.id.clone()).collect();
    for mode in GroupingMode::ALL {
        let vms = AvailabilityResolver::new(&tree, mode).resolve(&all);
        assert!(vms.len() <= tree.len());
    }
});
