//! Test environment for isolated vmselect CLI runs.
//!
//! Provides `TestEnv` - a temp directory holding inventory exports, plus
//! helpers to run the vmselect binary against it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::{CONTAINER_TREE_JSON, LEAF_TREE_YAML, VMS_JSON};

/// Result of running a vmselect CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as a JSON document
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Isolated directory with inventory exports
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// Environment with both tree exports and the VM list
    pub fn with_inventory() -> Self {
        let env = Self::empty();
        env.write("inventory/tree.by-container.json", CONTAINER_TREE_JSON);
        env.write("inventory/tree.by-leaf.yaml", LEAF_TREE_YAML);
        env.write("inventory/vms.json", VMS_JSON);
        env
    }

    /// Environment with an empty inventory directory
    pub fn empty() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("inventory")).unwrap();
        Self {
            root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_vmselect")),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Run vmselect from the environment root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run vmselect with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("VMSELECT_GROUPING_MODE")
            .env_remove("VMSELECT_VERBOSITY")
            .env_remove("VMSELECT_UNICODE")
            // Keep the user config directory out of the run.
            .env("XDG_CONFIG_HOME", self.root.path().join("xdg"))
            .env("HOME", self.root.path());

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        output_to_result(cmd.output().expect("Failed to execute vmselect"))
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
