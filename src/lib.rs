#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod helpers;
pub mod models;
pub mod output;
pub mod protocol;
pub mod sentiment;
pub mod session;
pub mod store;

use anyhow::{Context, Result};

use cli::{Cli, Commands};
use config::PulseConfig;
use output::Output;

pub use error::{ConfigError, StoreError};
pub use models::{Comment, SentimentCounts, SentimentTag};
pub use sentiment::Classifier;
pub use store::{CommentStore, SharedCommentStore};

fn load_config(cli: &Cli) -> Result<PulseConfig> {
    PulseConfig::load(cli.config.as_deref()).context("Failed to load configuration")
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            let dir = std::env::current_dir().context("Failed to resolve current directory")?;
            let result = commands::init::run(&dir)?;
            Output::new(false).init(&result)
        }
        Commands::Classify {
            ref text,
            algorithm,
            json,
        } => {
            let config = load_config(&cli)?;
            let result = commands::classify::run(text.clone(), algorithm, &config.classifier);
            Output::new(json).classification(&result)
        }
        Commands::Analyze {
            ref file,
            top,
            bucket,
            ref out,
            json,
        } => {
            let mut config = load_config(&cli)?;
            if let Some(top) = top {
                config.words.top_n = top;
            }
            if let Some(bucket) = bucket {
                config.timeline.bucket = bucket;
            }

            let result = commands::analyze::run(file, config)?;
            let output = Output::new(json);
            output.skipped(&result.skipped)?;

            let report = result.session.report();
            output.report(&report)?;
            if let Some(path) = out {
                report.write_to(path)?;
                output.report_written(path)?;
            }
            Ok(())
        }
        Commands::Session => {
            let config = load_config(&cli)?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            commands::session::run(config, stdin.lock(), stdout.lock())?;
            Ok(())
        }
    }
}
