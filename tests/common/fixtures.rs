//! Test fixtures - reusable inventory exports and trees.
//!
//! Both groupings describe the same three VMs:
//!
//! ```text
//! by-container                        by-leaf
//! dc1                                 dc1
//! ├── ClusterA                        ├── Production
//! │   └── host1                       │   ├── VM1
//! │       ├── VM1                     │   └── VM2
//! │       └── VM2                     └── Dev
//! └── ClusterB                            └── VM3
//!     └── VM3
//! ```

use std::collections::HashSet;

use vmselect::domain::entities::{RawInventoryTree, RawObject};
use vmselect::{IndexedTree, InventoryNode, NodeId, Vm, VmId};

/// Display key of ClusterA, taken from its provider link
pub const CLUSTER_A_KEY: &str = "providers/vsphere/clusters/cluster-a";

pub const CONTAINER_TREE_JSON: &str = r#"{
  "kind": "",
  "object": null,
  "children": [
    {
      "kind": "Datacenter",
      "object": { "id": "dc1", "name": "dc1" },
      "children": [
        {
          "kind": "Cluster",
          "object": { "id": "cluster-a", "name": "ClusterA", "selfLink": "providers/vsphere/clusters/cluster-a" },
          "children": [
            {
              "kind": "Host",
              "object": { "id": "host1", "name": "host1" },
              "children": [
                { "kind": "VM", "object": { "id": "vm1", "name": "VM1" }, "children": null },
                { "kind": "VM", "object": { "id": "vm2", "name": "VM2" }, "children": null }
              ]
            }
          ]
        },
        {
          "kind": "Cluster",
          "object": { "id": "cluster-b", "name": "ClusterB" },
          "children": [
            { "kind": "VM", "object": { "id": "vm3", "name": "VM3" }, "children": null }
          ]
        }
      ]
    }
  ]
}"#;

pub const LEAF_TREE_YAML: &str = r#"
kind: ""
object: null
children:
  - kind: Datacenter
    object: { id: dc1, name: dc1 }
    children:
      - kind: Folder
        object: { id: folder-prod, name: Production }
        children:
          - { kind: VM, object: { id: vm1, name: VM1 } }
          - { kind: VM, object: { id: vm2, name: VM2 } }
      - kind: Folder
        object: { id: folder-dev, name: Dev }
        children:
          - { kind: VM, object: { id: vm3, name: VM3 } }
"#;

pub const VMS_JSON: &str = r#"[
  { "id": "vm1", "name": "VM1", "powerState": "poweredOn" },
  { "id": "vm2", "name": "VM2", "powerState": "poweredOff" },
  { "id": "vm3", "name": "VM3", "powerState": "poweredOn" }
]"#;

/// A plan migrating VM1 and VM2
pub const PLAN_YAML: &str = "name: edit-me\nvms:\n  - id: vm1\n  - id: vm2\n";

/// A document whose cluster entry lost its object
pub const BROKEN_TREE_JSON: &str = r#"{
  "kind": "",
  "object": null,
  "children": [ { "kind": "Cluster", "object": null, "children": [] } ]
}"#;

/// The by-container export, parsed
pub fn container_tree_raw() -> RawInventoryTree {
    serde_json::from_str(CONTAINER_TREE_JSON).unwrap()
}

/// The by-leaf export, parsed
pub fn leaf_tree_raw() -> RawInventoryTree {
    serde_yaml_ng::from_str(LEAF_TREE_YAML).unwrap()
}

pub fn catalog_vms() -> Vec<Vm> {
    serde_json::from_str(VMS_JSON).unwrap()
}

pub fn container_tree() -> IndexedTree {
    IndexedTree::build(container_tree_raw()).unwrap()
}

pub fn leaf_tree() -> IndexedTree {
    IndexedTree::build(leaf_tree_raw()).unwrap()
}

/// Raw document node with an object
pub fn entry(kind: &str, id: &str, name: &str, children: Vec<RawInventoryTree>) -> RawInventoryTree {
    RawInventoryTree {
        kind: kind.to_string(),
        object: Some(RawObject {
            id: id.to_string(),
            name: name.to_string(),
            self_link: None,
        }),
        children: Some(children),
    }
}

/// Flat records for `IndexedTree::from_records` built from a parent list.
///
/// `parents[i]` is the index of node `i + 1`'s parent among nodes `0..=i`;
/// node 0 is the root. Nodes listed in `vms` become VM leaves, so a VM index
/// that also appears as a parent is turned back into a container.
pub fn records_from_parents(parents: &[usize], vms: &HashSet<usize>) -> (NodeId, Vec<InventoryNode>) {
    let count = parents.len() + 1;
    let mut children: Vec<Vec<String>> = vec![Vec::new(); count];
    for (i, parent) in parents.iter().enumerate() {
        children[*parent].push(format!("n{}", i + 1));
    }

    let records = (0..count)
        .map(|i| {
            let id = format!("n{i}");
            let name = format!("Node {i}");
            if i != 0 && vms.contains(&i) && children[i].is_empty() {
                InventoryNode::vm(id, name)
            } else {
                InventoryNode::container(id, name).with_children(children[i].clone())
            }
        })
        .collect();
    (NodeId::from("n0"), records)
}

pub fn vm_ids(ids: &[&str]) -> HashSet<VmId> {
    ids.iter().map(|id| VmId::from(*id)).collect()
}
