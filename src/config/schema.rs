//! Configuration schema types
//!
//! This module defines the configuration structure for Strata. The TOML
//! file (plus CLI and environment overrides) is the thin front-end that
//! produces the single `ExportContext` consumed by the core engine.

use crate::domain::ExportFormat;
use serde::{Deserialize, Serialize};

/// Main Strata configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrataConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    pub export: ExportSettings,

    /// Vault catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StrataConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Export run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Root output directory for exported artifacts and the run log
    pub output_dir: String,

    /// Output formats to export each document version to
    #[serde(default = "ExportFormat::default_selection")]
    pub formats: Vec<ExportFormat>,

    /// Project names to export (empty = every project in the catalog)
    #[serde(default)]
    pub projects: Vec<String>,

    /// Turn on every body/sketch visibility flag after opening a document
    #[serde(default = "default_true")]
    pub unhide_all: bool,

    /// Export every sketch in each document's component tree to DXF
    #[serde(default)]
    pub save_sketches: bool,

    /// Export every historical version instead of just the current one
    #[serde(default = "default_true")]
    pub save_all_versions: bool,
}

impl ExportSettings {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir must not be empty".to_string());
        }
        if self.formats.is_empty() {
            return Err(
                "export.formats must select at least one format (f3d, step, stl, igs, sat, smt)"
                    .to_string(),
            );
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

/// Vault catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON vault manifest (offline/in-memory catalog)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write a timestamped run log file into the output directory
    #[serde(default = "default_true")]
    pub run_log_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            run_log_enabled: true,
        }
    }
}
