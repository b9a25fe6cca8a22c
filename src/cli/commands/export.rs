//! Export command implementation
//!
//! This module implements the `export` command: it assembles the
//! `ExportContext` from configuration plus CLI overrides, initializes
//! the run-scoped log, drives the orchestrator, and presents the final
//! counts, elapsed time and log location to the user.

use crate::adapters::catalog::ProjectCatalog;
use crate::adapters::memory::manifest::load_vault;
use crate::config::load_config;
use crate::core::orchestrator::execute_export;
use crate::domain::{ExportContext, ExportFormat};
use crate::logging::{init_logging, run_log_path};
use clap::Args;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the output directory
    #[arg(long)]
    pub output: Option<String>,

    /// Override the export format selection (comma-separated tokens)
    #[arg(long)]
    pub format: Option<String>,

    /// Override the project selection (comma-separated names)
    #[arg(long)]
    pub project: Option<String>,

    /// Path to a JSON vault manifest (overrides catalog.manifest)
    #[arg(long)]
    pub manifest: Option<String>,

    /// Export every sketch in each document to DXF
    #[arg(long)]
    pub sketches: bool,

    /// Export every historical version (overrides config)
    #[arg(long)]
    pub all_versions: bool,

    /// Export only the current version of each file (overrides config)
    #[arg(long, conflicts_with = "all_versions")]
    pub current_only: bool,

    /// Leave body and sketch visibility untouched when opening documents
    #[arg(long)]
    pub no_unhide: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str, log_level: Option<&str>) -> anyhow::Result<i32> {
        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        // Apply CLI overrides
        if let Some(output) = &self.output {
            config.export.output_dir = output.clone();
        }
        if let Some(formats) = &self.format {
            let mut parsed = Vec::new();
            for token in formats.split(',') {
                match token.parse::<ExportFormat>() {
                    Ok(format) => parsed.push(format),
                    Err(e) => {
                        eprintln!("{e}");
                        return Ok(2);
                    }
                }
            }
            config.export.formats = parsed;
        }
        if let Some(projects) = &self.project {
            config.export.projects = projects
                .split(',')
                .map(|name| name.trim().to_string())
                .collect();
        }
        if let Some(manifest) = &self.manifest {
            config.catalog.manifest = Some(manifest.clone());
        }
        if self.sketches {
            config.export.save_sketches = true;
        }
        if self.all_versions {
            config.export.save_all_versions = true;
        }
        if self.current_only {
            config.export.save_all_versions = false;
        }
        if self.no_unhide {
            config.export.unhide_all = false;
        }

        // Validate configuration
        if let Err(e) = config.validate() {
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        // The run log lives inside the output directory, so the
        // directory has to exist before logging is initialized.
        let output_dir = PathBuf::from(&config.export.output_dir);
        if let Err(e) = fs::create_dir_all(&output_dir) {
            eprintln!(
                "Failed to create output directory {}: {e}",
                output_dir.display()
            );
            return Ok(5);
        }

        let run_log = config
            .logging
            .run_log_enabled
            .then(|| run_log_path(&output_dir));
        let level = log_level.unwrap_or(&config.application.log_level);
        let _guard = match init_logging(level, run_log.as_deref()) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Failed to initialize logging: {e}");
                return Ok(5);
            }
        };

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            config = %config_path,
            "Strata - CAD vault version history exporter"
        );

        // Load the vault catalog
        let Some(manifest_path) = config.catalog.manifest.clone() else {
            tracing::error!("No vault manifest configured");
            eprintln!("No vault manifest configured (set catalog.manifest or pass --manifest)");
            return Ok(2);
        };
        let vault = match load_vault(&manifest_path) {
            Ok(vault) => Arc::new(vault),
            Err(e) => {
                tracing::error!(manifest = %manifest_path, error = %e, "Failed to load vault");
                eprintln!("Failed to load vault manifest: {e}");
                return Ok(4);
            }
        };

        // An empty selection means every project in the catalog.
        let projects: BTreeSet<String> = if config.export.projects.is_empty() {
            match vault.projects() {
                Ok(projects) => projects.iter().map(|project| project.name()).collect(),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to enumerate projects");
                    eprintln!("Failed to enumerate projects: {e}");
                    return Ok(4);
                }
            }
        } else {
            config.export.projects.iter().cloned().collect()
        };

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            println!("  Output: {}", output_dir.display());
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
                projects.iter().cloned().collect::<Vec<_>>().join(", ")
            );
            println!("  All versions: {}", config.export.save_all_versions);
            println!("  Sketches: {}", config.export.save_sketches);
            println!("  Unhide all: {}", config.export.unhide_all);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        let ctx = ExportContext::new(
            output_dir,
            config.export.formats.clone(),
            projects,
            vault.clone(),
        )
        .with_unhide_all(config.export.unhide_all)
        .with_save_sketches(config.export.save_sketches)
        .with_save_all_versions(config.export.save_all_versions);

        println!("🚀 Starting export...");
        println!();

        let start = Instant::now();
        let counter = match execute_export(&ctx, vault.as_ref()) {
            Ok(counter) => counter,
            Err(e) => {
                tracing::error!(error = %e, "Export run failed");
                eprintln!("Export failed: {e}");
                if let Some(path) = &run_log {
                    eprintln!("Log file is at {}", path.display());
                }
                return Ok(5);
            }
        };
        let elapsed = start.elapsed();

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Saved: {}", counter.saved);
        println!("  Skipped: {}", counter.skipped);
        println!("  Errors: {}", counter.errored);
        println!("  Elapsed: {:.2}s", elapsed.as_secs_f64());
        if let Some(path) = &run_log {
            println!("  Log file: {}", path.display());
        }
        println!();

        let exit_code = if counter.errored > 0 {
            println!("⚠️  Export completed with errors");
            1 // Partial success
        } else {
            println!("✅ Export completed successfully!");
            0
        };

        Ok(exit_code)
    }
}
