pub mod resolve;
pub mod validate;
pub mod view;

pub use resolve::cmd_resolve;
pub use validate::cmd_validate;
pub use view::{cmd_view, ViewArgs};

use vmselect::config::{Config, OutputFormat};
use vmselect::presentation::{create_renderer, stdout_supports_unicode, ResultRenderer};

/// How results are printed, merged from flags and config
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub unicode: bool,
    pub verbose: u8,
}

impl OutputOptions {
    pub fn new(config: &Config, json: bool, ascii: bool, verbose: u8) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            config.output.format
        };
        Self {
            format,
            unicode: !ascii && config.output.unicode && stdout_supports_unicode(),
            verbose,
        }
    }

    pub fn renderer(&self) -> Box<dyn ResultRenderer> {
        create_renderer(self.format, self.unicode, self.verbose)
    }
}
