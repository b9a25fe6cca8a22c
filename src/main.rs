// Strata - CAD Vault Version History Exporter
// Copyright (c) 2025 Strata Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use strata::cli::{Cli, Commands};

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command and get exit code. Each command initializes its own
    // logging: the export command adds a run-scoped file sink inside the
    // output directory, which isn't known until its config is loaded.
    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config, cli.log_level.as_deref()),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Formats(args) => args.execute(),
        Commands::Init(args) => args.execute(),
    }
}
