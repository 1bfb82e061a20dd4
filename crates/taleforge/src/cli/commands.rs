//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tale Forge - turn language model output into three story choices
#[derive(Parser, Debug)]
#[command(name = "taleforge")]
#[command(about = "Turn language model output into three story choices", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file to layer over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract three choices from raw model output
    Extract {
        /// File holding the model output (stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,

        /// Parse a full story segment (narrative text plus choices)
        #[arg(long)]
        segment: bool,
    },

    /// Print the effective extraction configuration
    Config,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_extract_with_globals() {
        let cli = Cli::try_parse_from([
            "taleforge",
            "--config",
            "custom.toml",
            "extract",
            "story.txt",
            "--format",
            "json",
            "--segment",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(!cli.json_logs);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Extract {
                file,
                format,
                segment,
            } => {
                assert_eq!(file, Some(PathBuf::from("story.txt")));
                assert_eq!(format, OutputFormat::Json);
                assert!(segment);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_extract_defaults_to_stdin_and_human() {
        let cli = Cli::try_parse_from(["taleforge", "extract"]).unwrap();
        match cli.command {
            Commands::Extract {
                file,
                format,
                segment,
            } => {
                assert!(file.is_none());
                assert_eq!(format, OutputFormat::Human);
                assert!(!segment);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["taleforge", "extract", "--format", "yaml"]).is_err());
    }
}
