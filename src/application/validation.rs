//! Validation Use Case
//!
//! Fetches every export a source offers and checks that it parses and, for
//! trees, that it forms a well-formed hierarchy.

use serde::Serialize;
use tracing::info;

use crate::domain::ports::InventorySource;
use crate::domain::services::IndexedTree;
use crate::domain::value_objects::GroupingMode;

/// Outcome of validating one export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationEntry {
    /// What was checked, e.g. "VM list" or "by-leaf tree"
    pub subject: String,
    /// Item count on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationEntry {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of validating a source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub entries: Vec<ValidationEntry>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.entries.iter().all(ValidationEntry::is_ok)
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_ok()).count()
    }
}

/// Validate the VM list and the tree of each mode in `modes`
pub fn validate_source(source: &dyn InventorySource, modes: &[GroupingMode]) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.entries.push(match source.fetch_vms() {
        Ok(vms) => ValidationEntry {
            subject: "VM list".to_string(),
            count: Some(vms.len()),
            error: None,
        },
        Err(err) => ValidationEntry {
            subject: "VM list".to_string(),
            count: None,
            error: Some(err.to_string()),
        },
    });

    for mode in modes {
        let subject = format!("{mode} tree");
        let outcome = source
            .fetch_tree(*mode)
            .map_err(|e| e.to_string())
            .and_then(|raw| IndexedTree::build(raw).map_err(|e| e.to_string()));
        report.entries.push(match outcome {
            Ok(tree) => ValidationEntry {
                subject,
                count: Some(tree.len()),
                error: None,
            },
            Err(error) => ValidationEntry {
                subject,
                count: None,
                error: Some(error),
            },
        });
    }

    info!(errors = report.error_count(), "Validation finished");
    report
}
