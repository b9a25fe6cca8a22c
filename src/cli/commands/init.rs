//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "strata.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        println!("📝 Initializing Strata configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point catalog.manifest at a vault manifest JSON");
                println!("  3. Validate configuration: strata validate-config");
                println!("  4. Run export: strata export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Strata Configuration File
# CAD vault version history exporter

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[export]
# Root output directory for exported artifacts and the run log
output_dir = "strata-export"

# Output formats (f3d, step, stl, igs, sat, smt)
formats = ["f3d", "step"]

# Project names to export (empty = every project in the catalog)
projects = []

# Turn on every body/sketch visibility flag after opening a document
unhide_all = true

# Export every sketch in each document's component tree to DXF
save_sketches = false

# Export every historical version instead of just the current one
save_all_versions = true

[catalog]
# Path to a JSON vault manifest
manifest = "vault.json"

[logging]
# Write a timestamped run log file into the output directory
run_log_enabled = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "strata.toml".to_string(),
            force: false,
        };

        assert_eq!(args.output, "strata.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generate_config_parses_and_validates() {
        let contents = InitArgs::generate_config();
        let config: crate::config::StrataConfig = toml::from_str(&contents).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.manifest.as_deref(), Some("vault.json"));
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strata.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_str().unwrap().to_string(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn test_init_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strata.toml");

        let args = InitArgs {
            output: path.to_str().unwrap().to_string(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[export]"));
    }
}
