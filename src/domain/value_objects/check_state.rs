//! Checkbox state of a displayed tree node

use serde::{Deserialize, Serialize};

/// Checkbox state for a displayed node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckState {
    /// Node itself is selected (●)
    Checked,
    /// Some descendants selected (◐)
    Indeterminate,
    /// Nothing selected (○)
    Unchecked,
}

impl CheckState {
    /// Tri-state checkbox value: `Some(true)`, `None` for indeterminate, `Some(false)`
    pub fn as_checkbox(&self) -> Option<bool> {
        match self {
            CheckState::Checked => Some(true),
            CheckState::Indeterminate => None,
            CheckState::Unchecked => Some(false),
        }
    }
}
