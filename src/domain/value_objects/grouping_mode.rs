//! Grouping mode value object - which hierarchy presents the VM set

use serde::{Deserialize, Serialize};

/// The hierarchy used to present the same VM set
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingMode {
    /// Clusters and hosts; containers are selected
    #[default]
    #[serde(alias = "cluster")]
    #[value(alias = "cluster")]
    ByContainer,
    /// Folders of VMs; individual VMs are selected
    #[serde(alias = "folder", alias = "vm")]
    #[value(alias = "folder", alias = "vm")]
    ByLeaf,
}

impl GroupingMode {
    /// Both modes, in tab order
    pub const ALL: [GroupingMode; 2] = [GroupingMode::ByContainer, GroupingMode::ByLeaf];

    /// Stable slug used in file names and config
    pub fn slug(&self) -> &'static str {
        match self {
            GroupingMode::ByContainer => "by-container",
            GroupingMode::ByLeaf => "by-leaf",
        }
    }

    /// Tab title shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            GroupingMode::ByContainer => "By clusters",
            GroupingMode::ByLeaf => "By folders",
        }
    }

    /// Parse a slug or one of its aliases
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "by-container" | "cluster" | "clusters" => Some(GroupingMode::ByContainer),
            "by-leaf" | "folder" | "folders" | "vm" => Some(GroupingMode::ByLeaf),
            _ => None,
        }
    }
}

impl std::fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
