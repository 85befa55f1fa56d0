//! Source provider type - decides which groupings a provider offers

use serde::{Deserialize, Serialize};

use super::GroupingMode;

/// Kind of source provider the inventory comes from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// VMware vSphere, which has both a host tree and a folder tree
    #[default]
    Vsphere,
    /// Red Hat Virtualization, cluster tree only
    Ovirt,
}

impl ProviderType {
    /// Grouping modes the provider's inventory can be viewed in
    pub fn grouping_modes(&self) -> &'static [GroupingMode] {
        match self {
            ProviderType::Vsphere => &GroupingMode::ALL,
            ProviderType::Ovirt => &[GroupingMode::ByContainer],
        }
    }

    /// Whether `mode` is offered for this provider
    pub fn supports(&self, mode: GroupingMode) -> bool {
        self.grouping_modes().contains(&mode)
    }

    /// Human-readable provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderType::Vsphere => "VMware",
            ProviderType::Ovirt => "Red Hat Virtualization",
        }
    }

    /// Introductory text of the filter step
    pub fn intro_text(&self) -> String {
        let folders = if self.supports(GroupingMode::ByLeaf) {
            " or by folders"
        } else {
            ""
        };
        format!("Refine the list of VMs selectable for migration by clusters{folders}.")
    }
}
