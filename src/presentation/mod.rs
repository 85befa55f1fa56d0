//! Presentation Layer
//!
//! This layer handles:
//! - Rendering the display tree for terminals
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `theme` - Icon sets (unicode with ASCII fallback)
//! - `terminal` - Terminal capability detection
//! - `tree` - Display tree rendering
//! - `output` - Result renderers

pub mod output;
pub mod terminal;
pub mod theme;
pub mod tree;

pub use output::{create_renderer, JsonRenderer, ResultRenderer, TextRenderer};
pub use terminal::stdout_supports_unicode;
pub use tree::render_tree;
