//! Plan entity - an existing migration plan being edited

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Vm, VmCatalog};
use crate::domain::value_objects::VmId;

/// A VM entry persisted in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanVm {
    pub id: VmId,
}

/// Existing migration plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    /// Name of the source provider the plan migrates from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_provider: Option<String>,
    #[serde(default)]
    pub vms: Vec<PlanVm>,
}

impl Plan {
    /// Create a plan listing the given VM ids
    pub fn new<I, S>(name: impl Into<String>, vm_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<VmId>,
    {
        Self {
            name: name.into(),
            source_provider: None,
            vms: vm_ids
                .into_iter()
                .map(|id| PlanVm { id: id.into() })
                .collect(),
        }
    }

    /// Check whether the plan lists a VM
    pub fn includes(&self, id: &VmId) -> bool {
        self.vms.iter().any(|vm| &vm.id == id)
    }

    /// Catalog VMs listed in the plan, in catalog order.
    ///
    /// Plan entries the provider no longer reports are dropped.
    pub fn selected_vms<'c>(&self, catalog: &'c VmCatalog) -> Vec<&'c Vm> {
        catalog
            .vms()
            .iter()
            .filter(|vm| self.includes(&vm.id))
            .collect()
    }
}
