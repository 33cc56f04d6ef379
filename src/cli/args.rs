//! Command line argument parsing for the handoff CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Handoff - decide when a support chat needs a human agent
#[derive(Parser, Debug, Clone)]
#[command(name = "handoff")]
#[command(about = "Classify support-chat messages for human-agent handoff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HandoffArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HandoffArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify a single message
    Classify(ClassifyArgs),

    /// Classify every message of a JSON-lines file
    #[command(name = "classify-file")]
    ClassifyFile(ClassifyFileArgs),

    /// Print the effective catalog and thresholds
    #[command(name = "explain-catalog")]
    ExplainCatalog(ExplainCatalogArgs),

    /// Validate a configuration file
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

/// Arguments for classifying one message
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// The user's latest message
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Recent history as a tagged block ("User: ...\nBot: ...")
    #[arg(long, conflicts_with = "history_file")]
    pub history: Option<String>,

    /// File holding the tagged history block
    #[arg(long, value_name = "HISTORY_FILE")]
    pub history_file: Option<PathBuf>,

    /// Classifier configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HANDOFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also print the ignored stop words and the score against every
    /// reference phrase
    #[arg(long)]
    pub scores: bool,
}

/// Arguments for batch classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyFileArgs {
    /// JSON-lines file of {"query": ..., "history": ...} objects
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Classifier configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HANDOFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only print messages that hand off
    #[arg(long)]
    pub only_handoff: bool,
}

/// Arguments for printing the catalog
#[derive(Parser, Debug, Clone)]
pub struct ExplainCatalogArgs {
    /// Classifier configuration file (JSON); defaults when omitted
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HANDOFF_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for validating a configuration
#[derive(Parser, Debug, Clone)]
pub struct CheckConfigArgs {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_FILE")]
    pub config: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_args() {
        let args = HandoffArgs::parse_from([
            "handoff",
            "classify",
            "speak to a human",
            "--history",
            "User: hi",
            "--format",
            "json",
        ]);

        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Classify(classify) => {
                assert_eq!(classify.query, "speak to a human");
                assert_eq!(classify.history.as_deref(), Some("User: hi"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbosity() {
        let args = HandoffArgs::parse_from(["handoff", "-vv", "explain-catalog"]);
        assert_eq!(args.verbosity(), 2);

        let args = HandoffArgs::parse_from(["handoff", "explain-catalog", "-q"]);
        assert_eq!(args.verbosity(), 0);

        let args = HandoffArgs::parse_from(["handoff", "check-config", "cfg.json"]);
        assert_eq!(args.verbosity(), 1);
    }

    #[test]
    fn test_history_sources_conflict() {
        let result = HandoffArgs::try_parse_from([
            "handoff",
            "classify",
            "hi",
            "--history",
            "User: a",
            "--history-file",
            "h.txt",
        ]);
        assert!(result.is_err());
    }
}
