//! Tale Forge CLI binary.
//!
//! This binary provides command-line access to choice extraction:
//! - Extract three choices (or a full story segment) from model output
//! - Show the effective extraction configuration

use clap::Parser;
use taleforge::{ObservabilityConfig, TaleforgeConfig, init_observability_with_config};

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_extract, show_config};

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    let config = match &cli.config {
        Some(path) => TaleforgeConfig::from_file(path)?,
        None => TaleforgeConfig::load()?,
    };

    // Execute the requested command
    match cli.command {
        Commands::Extract {
            file,
            format,
            segment,
        } => {
            handle_extract(&config, file.as_deref(), format, segment)?;
        }

        Commands::Config => {
            show_config(&config)?;
        }
    }

    Ok(())
}
