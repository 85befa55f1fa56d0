//! Output Rendering
//!
//! Provides a unified interface for rendering results as text or JSON.

use crate::application::{FilterView, ValidationReport, ViewStatus};
use crate::config::OutputFormat;
use crate::domain::services::VmSet;
use crate::domain::value_objects::GroupingMode;

use super::theme::Icons;
use super::tree::{render_legend, render_tree};

/// Trait for rendering command results
pub trait ResultRenderer {
    /// Render the filter view and the VMs it makes available
    fn render_view(&self, view: &FilterView, vms: &VmSet) -> String;

    /// Render the VMs denoted by an explicit selection
    fn render_resolution(&self, mode: GroupingMode, vms: &VmSet) -> String;

    /// Render a validation report
    fn render_validation(&self, report: &ValidationReport) -> String;
}

/// Text renderer
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Whether to use unicode icons
    pub unicode: bool,
    /// Verbosity level
    pub verbose: u8,
}

impl TextRenderer {
    fn tabs(view: &FilterView) -> String {
        view.modes
            .iter()
            .map(|mode| {
                if *mode == view.mode {
                    format!("[{}]", mode.title())
                } else {
                    mode.title().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn vm_lines(&self, vms: &VmSet, out: &mut Vec<String>) {
        let noun = if vms.len() == 1 { "VM" } else { "VMs" };
        out.push(format!("{} {} selected", vms.len(), noun));
        for vm in vms.iter() {
            out.push(format!("  {}  {}", vm.id, vm.name));
        }
    }
}

impl ResultRenderer for TextRenderer {
    fn render_view(&self, view: &FilterView, vms: &VmSet) -> String {
        let icons = Icons::new(self.unicode);
        let mut out = vec![view.intro.clone()];
        if view.modes.len() > 1 {
            out.push(Self::tabs(view));
        }
        out.push(String::new());

        match &view.status {
            ViewStatus::Loading { message } => {
                out.push(format!("{} Loading", icons.pending));
                out.push(format!("  {message}"));
            }
            ViewStatus::Error { title, message } => {
                out.push(format!("{} {}", icons.error, title));
                out.push(format!("  {message}"));
            }
            ViewStatus::Ready if view.tree.is_empty() => {
                out.push("No inventory nodes match the search.".to_string());
            }
            ViewStatus::Ready => {
                out.push(render_tree(&view.tree, self.unicode));
                if self.verbose > 0 {
                    out.push(String::new());
                    out.push(render_legend(self.unicode));
                }
            }
        }

        out.push(String::new());
        self.vm_lines(vms, &mut out);
        out.join("\n")
    }

    fn render_resolution(&self, mode: GroupingMode, vms: &VmSet) -> String {
        let mut out = vec![format!("Grouping: {}", mode.title())];
        self.vm_lines(vms, &mut out);
        out.join("\n")
    }

    fn render_validation(&self, report: &ValidationReport) -> String {
        let icons = Icons::new(self.unicode);
        let mut out: Vec<String> = report
            .entries
            .iter()
            .map(|entry| match (&entry.error, entry.count) {
                (Some(error), _) => format!("{} {}: {}", icons.error, entry.subject, error),
                (None, count) => format!(
                    "{} {}: {} entries",
                    icons.success,
                    entry.subject,
                    count.unwrap_or(0)
                ),
            })
            .collect();
        out.push(String::new());
        if report.is_ok() {
            out.push("Inventory is valid".to_string());
        } else {
            out.push(format!("{} problem(s) found", report.error_count()));
        }
        out.join("\n")
    }
}

/// JSON renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    fn vms_json(vms: &VmSet) -> Vec<serde_json::Value> {
        vms.iter()
            .map(|vm| serde_json::json!({ "id": vm.id, "name": vm.name }))
            .collect()
    }
}

impl ResultRenderer for JsonRenderer {
    fn render_view(&self, view: &FilterView, vms: &VmSet) -> String {
        let json = serde_json::json!({
            "event": "view",
            "view": view,
            "selected_vms": Self::vms_json(vms),
        });
        serde_json::to_string_pretty(&json).unwrap_or_default()
    }

    fn render_resolution(&self, mode: GroupingMode, vms: &VmSet) -> String {
        let json = serde_json::json!({
            "event": "resolve",
            "mode": mode,
            "count": vms.len(),
            "vms": Self::vms_json(vms),
        });
        serde_json::to_string_pretty(&json).unwrap_or_default()
    }

    fn render_validation(&self, report: &ValidationReport) -> String {
        let json = serde_json::json!({
            "event": "validate",
            "valid": report.is_ok(),
            "entries": report.entries,
        });
        serde_json::to_string_pretty(&json).unwrap_or_default()
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool, verbose: u8) -> Box<dyn ResultRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode, verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
