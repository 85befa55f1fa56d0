//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::value_objects::{ConfigWarning, GroupingMode};
use crate::error::{SelectorError, SelectorResult};

use super::types::{Config, Verbosity};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "vmselect.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SelectorResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(path, &content)
}

/// Parse TOML `content` read from `path`
pub fn parse_with_warnings(path: &Path, content: &str) -> SelectorResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SelectorError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Config files in lookup order
pub fn candidate_paths(working_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = working_dir {
        paths.push(dir.join(PROJECT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("vmselect").join("config.toml"));
    }
    paths
}

/// Load the first existing config file, or defaults; env overrides applied
pub fn load_or_default(working_dir: Option<&Path>) -> (Config, Vec<ConfigWarning>) {
    for path in candidate_paths(working_dir) {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => return (with_env_overrides(config), warnings),
            Err(err) => warn!(path = %path.display(), error = %err, "Ignoring unreadable config"),
        }
    }

    (with_env_overrides(Config::default()), Vec::new())
}

/// Apply environment variable overrides (VMSELECT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    // VMSELECT_GROUPING_MODE
    if let Some(mode) = lookup("VMSELECT_GROUPING_MODE") {
        match GroupingMode::parse(&mode) {
            Some(mode) => config.grouping.default_mode = mode,
            None => warn!(value = %mode, "Unknown VMSELECT_GROUPING_MODE"),
        }
    }

    // VMSELECT_VERBOSITY
    if let Some(verbosity) = lookup("VMSELECT_VERBOSITY") {
        config.output.verbosity = Verbosity::parse(&verbosity);
    }

    // VMSELECT_UNICODE
    if let Some(val) = lookup("VMSELECT_UNICODE") {
        config.output.unicode = val.to_lowercase() != "false" && val != "0";
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "grouping",
        "default_mode",
        "provider",
        "view",
        "root_label",
        "expand_all",
        "output",
        "verbosity",
        "format",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
