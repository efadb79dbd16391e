//! Command-line interface for strictly_words.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Words - find every word hidden in seven letters
#[derive(Parser, Debug)]
#[command(name = "strictly_words")]
#[command(about = "Word-anagram puzzle in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (falls back to $WORDS_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Local word list, overriding the configured URL
    #[arg(long, global = true)]
    pub words_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds interactively
    Play {
        /// Name used for high-score submissions
        #[arg(short, long)]
        name: Option<String>,

        /// Seed for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the high-score board
    Scores,
}
