//! VM entity and the provider VM catalog

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::domain::entities::InventoryNode;
use crate::domain::value_objects::VmId;

/// A virtual machine, the unit of migration.
///
/// Identity is the provider id: two values with the same id are equal even if
/// their descriptive attributes differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vm {
    pub id: VmId,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "selfLink", alias = "self_link", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Remaining provider attributes
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Vm {
    /// Create a VM with only an id and a name
    pub fn new(id: impl Into<VmId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            self_link: None,
            attributes: serde_json::Map::new(),
        }
    }

    /// Synthesize a VM from a VM-kind tree node
    pub fn from_node(node: &InventoryNode) -> Self {
        Self {
            id: VmId::from(&node.id),
            name: node.payload.name.clone(),
            self_link: node.payload.self_link.clone(),
            attributes: serde_json::Map::new(),
        }
    }
}

impl PartialEq for Vm {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vm {}

impl Hash for Vm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The provider's VM list, indexed by id
#[derive(Debug, Clone, Default)]
pub struct VmCatalog {
    vms: Vec<Vm>,
    index: HashMap<VmId, usize>,
}

impl VmCatalog {
    /// Build a catalog; later duplicates of an id are ignored
    pub fn new(vms: impl IntoIterator<Item = Vm>) -> Self {
        let mut catalog = Self::default();
        for vm in vms {
            if catalog.index.contains_key(&vm.id) {
                continue;
            }
            catalog.index.insert(vm.id.clone(), catalog.vms.len());
            catalog.vms.push(vm);
        }
        catalog
    }

    /// Look up a VM by id
    pub fn get(&self, id: &VmId) -> Option<&Vm> {
        self.index.get(id).map(|&i| &self.vms[i])
    }

    /// Check whether a VM id is known
    pub fn contains(&self, id: &VmId) -> bool {
        self.index.contains_key(id)
    }

    /// All VMs in provider order
    pub fn vms(&self) -> &[Vm] {
        &self.vms
    }

    pub fn len(&self) -> usize {
        self.vms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vms.is_empty()
    }
}
