use std::path::Path;

use anyhow::Result;
use vmselect::application::validate_source;
use vmselect::infrastructure::FileInventorySource;
use vmselect::GroupingMode;

use super::OutputOptions;

pub fn cmd_validate(dir: &Path, output: OutputOptions) -> Result<()> {
    let source = FileInventorySource::new(dir);
    let mut modes = source.available_modes();
    if modes.is_empty() {
        // Report the missing default tree instead of passing silently.
        modes.push(GroupingMode::default());
    }

    let report = validate_source(&source, &modes);
    println!("{}", output.renderer().render_validation(&report));

    if !report.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}
