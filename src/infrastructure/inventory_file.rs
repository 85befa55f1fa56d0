//! File Inventory Source
//!
//! Implements the InventorySource port over a directory of provider exports:
//!
//! ```text
//! <dir>/vms.json                 VM list
//! <dir>/tree.by-container.json   inventory grouped by clusters and hosts
//! <dir>/tree.by-leaf.json        inventory grouped by VM folders
//! ```
//!
//! Each file may be JSON or YAML (`.yaml`/`.yml`).

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::entities::{Plan, RawInventoryTree, Vm};
use crate::domain::ports::{InventorySource, SourceError};
use crate::domain::value_objects::GroupingMode;

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Inventory source reading exported files from a directory
#[derive(Debug, Clone)]
pub struct FileInventorySource {
    dir: PathBuf,
}

impl FileInventorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the tree export for `mode`, if present
    pub fn tree_path(&self, mode: GroupingMode) -> Option<PathBuf> {
        self.find(&format!("tree.{}", mode.slug()))
    }

    /// Path of the VM list export, if present
    pub fn vms_path(&self) -> Option<PathBuf> {
        self.find("vms")
    }

    /// Modes with a tree export in the directory
    pub fn available_modes(&self) -> Vec<GroupingMode> {
        GroupingMode::ALL
            .into_iter()
            .filter(|mode| self.tree_path(*mode).is_some())
            .collect()
    }

    fn find(&self, stem: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{stem}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl InventorySource for FileInventorySource {
    fn fetch_tree(&self, mode: GroupingMode) -> Result<RawInventoryTree, SourceError> {
        let path = self.tree_path(mode).ok_or_else(|| SourceError::NotFound {
            what: format!("{} tree", mode.slug()),
            dir: self.dir.clone(),
        })?;
        debug!(path = %path.display(), %mode, "Reading inventory tree");
        read_document(&path)
    }

    fn fetch_vms(&self) -> Result<Vec<Vm>, SourceError> {
        let path = self.vms_path().ok_or_else(|| SourceError::NotFound {
            what: "VM list".to_string(),
            dir: self.dir.clone(),
        })?;
        debug!(path = %path.display(), "Reading VM list");
        read_document(&path)
    }
}

/// Load a plan being edited from a JSON or YAML file
pub fn load_plan(path: &Path) -> Result<Plan, SourceError> {
    read_document(path)
}

/// Deserialize a JSON or YAML document, choosing the format by extension
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|e| SourceError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_document(path, &content)
}

/// Deserialize `content` as YAML for `.yaml`/`.yml` paths, JSON otherwise
pub fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, SourceError> {
    let parse_error = |message: String| SourceError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml_ng::from_str(content).map_err(|e| parse_error(e.to_string()))
        }
        _ => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}
