//! Terminal rendering of the display tree.
//!
//! One line per visible node: indentation, expansion icon, check-state icon
//! and label, with badges aligned in a column after the widest label.

use unicode_width::UnicodeWidthStr;

use crate::domain::services::{DisplayNode, DisplayTree};
use crate::domain::value_objects::CheckState;

use super::theme::Icons;

/// Render a display tree to a string
pub fn render_tree(tree: &DisplayTree, unicode: bool) -> String {
    let icons = Icons::new(unicode);
    let mut lines: Vec<(String, Option<&str>)> = Vec::new();
    for root in &tree.roots {
        collect_lines(root, 0, &icons, &mut lines);
    }

    let width = lines
        .iter()
        .filter(|(_, badge)| badge.is_some())
        .map(|(prefix, _)| prefix.width())
        .max()
        .unwrap_or(0);

    lines
        .into_iter()
        .map(|(prefix, badge)| match badge {
            Some(badge) => {
                let pad = " ".repeat(width.saturating_sub(prefix.width()));
                format!("{prefix}{pad}  ({badge})")
            }
            None => prefix,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single node line without its badge
pub fn render_node(node: &DisplayNode, depth: usize, icons: &Icons) -> String {
    let indent = "  ".repeat(depth);

    let state_icon = match node.check {
        CheckState::Checked => icons.selected,
        CheckState::Unchecked => icons.unselected,
        CheckState::Indeterminate => icons.partial,
    };

    // Expansion icon (only for nodes with children)
    let expand_icon = if node.children.is_empty() {
        String::from("  ")
    } else if node.expanded {
        format!("{} ", icons.expand)
    } else {
        format!("{} ", icons.collapse)
    };

    format!("{}{}{} {}", indent, expand_icon, state_icon, node.label)
}

fn collect_lines<'a>(
    node: &'a DisplayNode,
    depth: usize,
    icons: &Icons,
    lines: &mut Vec<(String, Option<&'a str>)>,
) {
    lines.push((render_node(node, depth, icons), node.badge.as_deref()));
    if node.expanded {
        for child in &node.children {
            collect_lines(child, depth + 1, icons, lines);
        }
    }
}

/// Render the legend explaining the check-state icons
pub fn render_legend(unicode: bool) -> String {
    let icons = Icons::new(unicode);
    format!(
        "{} = selected    {} = partial    {} = not selected",
        icons.selected, icons.partial, icons.unselected
    )
}
