use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::aggregate::Bucket;
use crate::config::Algorithm;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Collect comments on a proposal and summarise their sentiment", long_about = None)]
pub struct Cli {
    /// Path to a pulse.toml (defaults to $PULSE_CONFIG, then the nearest pulse.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default pulse.toml in the current directory
    Init,

    /// Classify a single piece of text
    Classify {
        /// The text to classify
        text: String,

        /// Override the configured algorithm
        #[arg(long, value_enum)]
        algorithm: Option<Algorithm>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load comments from a JSON file and print the admin report
    Analyze {
        /// JSON array of {author, text, date?} records
        file: PathBuf,

        /// Number of top words to show
        #[arg(long)]
        top: Option<usize>,

        /// Timeline granularity
        #[arg(long, value_enum)]
        bucket: Option<Bucket>,

        /// Also write the JSON report to this path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an interactive session reading JSON requests from stdin
    Session,
}
