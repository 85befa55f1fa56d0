//! Unknown-key warning raised while reading `vmselect.toml`.

use std::path::PathBuf;

/// A config key vmselect does not recognise.
///
/// Loading continues with defaults for the key; the binary logs one warning
/// per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Last segment of the ignored key path, e.g. `defualt_mode`
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line of the first occurrence
    pub line: Option<usize>,
    /// Closest known key, when one is near enough
    pub suggestion: Option<String>,
}

impl ConfigWarning {
    /// `file:line`, or just the file when the line is unknown
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.file.display()),
            None => self.file.display().to_string(),
        }
    }
}
