//! CLI for the PhishGuard URL classifier.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use phishguard_core::config::{self, PhishGuardConfig};
use phishguard_core::{logging, PhishGuard};
use std::path::PathBuf;

use commands::{
    run_batch, run_completions, run_features, run_health, run_man, run_predict,
};

/// Top-level CLI for PhishGuard.
#[derive(Debug, Parser)]
#[command(name = "phishguard")]
#[command(about = "PhishGuard: lexical phishing URL classifier", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/phishguard/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory that relative artifact paths resolve against (overrides config).
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Classify one or more URLs.
    Predict {
        /// URLs to classify (a scheme is added when missing).
        #[arg(required = true)]
        urls: Vec<String>,
        /// Print one JSON object per URL.
        #[arg(long)]
        json: bool,
    },

    /// Show the lexical features extracted from a URL.
    Features {
        url: String,
        #[arg(long)]
        json: bool,
    },

    /// Classify newline-delimited URLs from a file; prints JSON lines in input order.
    Batch {
        /// Input file, one URL per line (blank lines skipped).
        path: PathBuf,
        /// Worker count sharing one service and cache.
        #[arg(long, default_value = "4", value_name = "N")]
        jobs: usize,
    },

    /// Load the model and report readiness.
    Health,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print a roff man page to stdout.
    Man,
}

fn load_config(cli: &Cli) -> Result<PhishGuardConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init()?,
    };
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = Some(dir.clone());
    }
    Ok(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These two never need the model.
        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = load_config(&cli)?;
        if let Err(e) = logging::init_logging(&cfg) {
            logging::init_logging_stderr(&cfg);
            tracing::warn!("log file unavailable, logging to stderr: {e:#}");
        }
        tracing::debug!("loaded config: {:?}", cfg);
        let service = PhishGuard::from_config(&cfg)?;

        match cli.command {
            CliCommand::Predict { urls, json } => run_predict(&service, &urls, json)?,
            CliCommand::Features { url, json } => run_features(&service, &url, json)?,
            CliCommand::Batch { path, jobs } => run_batch(service, &path, jobs).await?,
            CliCommand::Health => run_health(&service)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
