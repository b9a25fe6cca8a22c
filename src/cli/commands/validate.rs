//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("🔍 Validating configuration: {config_path}");
        println!();

        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                println!("  Output: {}", config.export.output_dir);
                println!(
                    "  Formats: {}",
                    config
                        .export
                        .formats
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                println!(
                    "  Projects: {}",
                    if config.export.projects.is_empty() {
                        "All".to_string()
                    } else {
                        config.export.projects.join(", ")
                    }
                );
                println!("  All versions: {}", config.export.save_all_versions);
                println!("  Sketches: {}", config.export.save_sketches);
                println!("  Unhide all: {}", config.export.unhide_all);
                println!(
                    "  Manifest: {}",
                    config.catalog.manifest.as_deref().unwrap_or("(not set)")
                );
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   {e}");
                Ok(2) // Configuration error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {};
        assert_eq!(args.execute("missing.toml").unwrap(), 2);
    }

    #[test]
    fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[export]\noutput_dir = \"/tmp/out\"\n")
            .unwrap();
        file.flush().unwrap();

        let args = ValidateArgs {};
        assert_eq!(args.execute(file.path().to_str().unwrap()).unwrap(), 0);
    }
}
