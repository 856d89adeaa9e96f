//! Command line argument parsing for the fuzzpost CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// fuzzpost - fuzzy substring search over blog posts
#[derive(Parser, Debug, Clone)]
#[command(name = "fuzzpost")]
#[command(about = "Fuzzy substring search over blog usernames, titles and bodies")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FuzzpostArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FuzzpostArgs {
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
    /// Edit distance between two strings
    Distance(DistanceArgs),

    /// Best-matching window of one string inside another
    #[command(name = "match")]
    Match(MatchArgs),

    /// Search records for a query across their text fields
    Search(SearchArgs),
}

/// Arguments for the edit distance command
#[derive(Parser, Debug, Clone)]
pub struct DistanceArgs {
    /// First string
    #[arg(value_name = "A")]
    pub a: String,

    /// Second string
    #[arg(value_name = "B")]
    pub b: String,
}

/// Arguments for the window match command
#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Text to search in
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Data file: a blog export ({"users": [...], "posts": [...]}) or JSONL with --jsonl
    #[arg(short, long, value_name = "DATA_FILE")]
    pub data: PathBuf,

    /// Treat the data file as one JSON object per line
    #[arg(long)]
    pub jsonl: bool,

    /// Search configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "FUZZPOST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Accept fields whose distance is below this value
    #[arg(short, long)]
    pub threshold: Option<usize>,

    /// Field to search (repeatable; default: username, title, body)
    #[arg(long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Maximum number of results to return
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Evaluate records on a single thread
    #[arg(long)]
    pub sequential: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
