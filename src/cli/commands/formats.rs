//! Formats command implementation
//!
//! Lists the closed set of supported export formats with their
//! extension tokens, marking the default selection.

use crate::domain::ExportFormat;
use clap::Args;

/// Arguments for the formats command
#[derive(Args, Debug)]
pub struct FormatsArgs {}

impl FormatsArgs {
    /// Execute the formats command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let defaults = ExportFormat::default_selection();

        println!("Supported export formats:");
        for format in ExportFormat::ALL {
            let marker = if defaults.contains(&format) {
                " (default)"
            } else {
                ""
            };
            println!("  {}{marker}", format.extension());
        }
        println!();
        println!("Select formats in strata.toml (export.formats) or with --format.");

        Ok(0)
    }
}
