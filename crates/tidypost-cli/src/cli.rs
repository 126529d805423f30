//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use tidypost::{DEFAULT_INPUT, DEFAULT_OUTPUT};

/// tidypost: clean a social-media post dataset and summarize it
#[derive(Parser)]
#[command(name = "tidypost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the input dataset (CSV)
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output path for the cleaned dataset
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Number of users in the top-users ranking
    #[arg(long, default_value = "3")]
    pub top: usize,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
