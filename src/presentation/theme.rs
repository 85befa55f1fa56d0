//! Design tokens for vmselect output.
//!
//! All icons must be sourced from this module.

pub mod icons {
    // Check states.
    pub const SELECTED: &str = "●";
    pub const UNSELECTED: &str = "○";
    pub const PARTIAL: &str = "◐";

    // Tree expansion.
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";

    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const PENDING: &str = "…";
}

pub mod icons_ascii {
    // Check states.
    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";
    pub const PARTIAL: &str = "[-]";

    // Tree expansion.
    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";

    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const PENDING: &str = "[..]";
}

/// Icon set chosen once per render
#[derive(Debug, Clone, Copy)]
pub struct Icons {
    pub selected: &'static str,
    pub unselected: &'static str,
    pub partial: &'static str,
    pub expand: &'static str,
    pub collapse: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub pending: &'static str,
}

impl Icons {
    pub fn new(unicode: bool) -> Self {
        if unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }

    pub fn unicode() -> Self {
        Self {
            selected: icons::SELECTED,
            unselected: icons::UNSELECTED,
            partial: icons::PARTIAL,
            expand: icons::EXPAND,
            collapse: icons::COLLAPSE,
            success: icons::SUCCESS,
            error: icons::ERROR,
            pending: icons::PENDING,
        }
    }

    pub fn ascii() -> Self {
        Self {
            selected: icons_ascii::SELECTED,
            unselected: icons_ascii::UNSELECTED,
            partial: icons_ascii::PARTIAL,
            expand: icons_ascii::EXPAND,
            collapse: icons_ascii::COLLAPSE,
            success: icons_ascii::SUCCESS,
            error: icons_ascii::ERROR,
            pending: icons_ascii::PENDING,
        }
    }
}
