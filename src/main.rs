mod cli;
mod config;
mod engine;
mod error;
mod report;
mod sources;
mod types;

use crate::error::ScoreError;
use crate::report::{OutputFormat, ScoreDocument};
use crate::types::config::ScoreConfig;
use crate::types::inputs::{AccountHistory, ActivityMetrics, WalletScoreRequest};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ScoreError> {
    if !path.exists() {
        return Err(ScoreError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ScoreError::malformed(path, &e))
}

fn resolve_format(flag: Option<cli::ReportFormat>, config: &ScoreConfig) -> OutputFormat {
    match flag {
        Some(cli::ReportFormat::Json) => OutputFormat::Json,
        Some(cli::ReportFormat::Md) => OutputFormat::Md,
        None => OutputFormat::from_config(config.output.format.as_deref()),
    }
}

fn scoring_time(args: &cli::ScoringArgs) -> DateTime<Utc> {
    args.now.unwrap_or_else(Utc::now)
}

fn load_activity_metrics(
    input: &Path,
    from_history: bool,
    now: DateTime<Utc>,
    config: &ScoreConfig,
) -> Result<ActivityMetrics, ScoreError> {
    if from_history {
        let history: AccountHistory = read_json(input)?;
        engine::derive::derive_activity_metrics(&history, now, config.future_timestamps())
    } else {
        read_json(input)
    }
}

fn run() -> Result<i32, ScoreError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let root = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    if !root.exists() {
        return Err(ScoreError::PathNotFound(root.display().to_string()));
    }
    let config = config::load_config(&root)?.unwrap_or_default();
    let policy = config.future_timestamps();

    match cli.command {
        cli::Commands::Wallet(cmd) => {
            info!(input = %cmd.input.display(), "wallet score requested");
            let request: WalletScoreRequest = read_json(&cmd.input)?;
            let now = scoring_time(&cmd.scoring);
            let score = engine::wallet::compute_credit_score(
                &request.wallet,
                &request.off_chain,
                now,
                policy,
            )?;
            let rendered = report::render(
                ScoreDocument::Wallet(&score),
                resolve_format(cmd.format, &config),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Activity(cmd) => {
            info!(input = %cmd.input.display(), "activity score requested");
            let now = scoring_time(&cmd.scoring);
            let metrics = load_activity_metrics(&cmd.input, cmd.from_history, now, &config)?;
            let activity = engine::activity::activity_report(&metrics, now)?;
            let rendered = report::render(
                ScoreDocument::Activity(&activity),
                resolve_format(cmd.format, &config),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Suggest(cmd) => {
            let now = scoring_time(&cmd.scoring);
            let metrics = load_activity_metrics(&cmd.input, cmd.from_history, now, &config)?;
            let recommendations = engine::activity::generate_recommendations(&metrics);

            if recommendations.is_empty() {
                println!("suggest: no recommendations");
                return Ok(exit_code::SUCCESS);
            }

            println!("suggestions:");
            for recommendation in &recommendations {
                println!("- {recommendation}");
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Comprehensive(cmd) => {
            info!(
                snapshot = %cmd.snapshot.display(),
                identifier = %cmd.identifier,
                "comprehensive score requested"
            );
            let snapshot = sources::snapshot::Snapshot::load(&cmd.snapshot)?;
            let kind = match cmd.kind {
                cli::IdentifierKind::Wallet => sources::IdentifierKind::Wallet,
                cli::IdentifierKind::Social => sources::IdentifierKind::Social,
            };
            let score = sources::score_identifier(
                &cmd.identifier,
                kind,
                &snapshot,
                &snapshot,
                &snapshot,
                scoring_time(&cmd.scoring),
                policy,
            )?;
            let rendered = report::render(
                ScoreDocument::Comprehensive(&score),
                resolve_format(cmd.format, &config),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Identity(cmd) => {
            info!(snapshot = %cmd.snapshot.display(), "identity match requested");
            let snapshot = sources::snapshot::Snapshot::load(&cmd.snapshot)?;
            let claim = sources::identity::IdentityClaim {
                wallet_address: cmd.wallet,
                social_handle: cmd.handle,
                email: cmd.email,
            };
            let matched =
                sources::identity::match_identity(&claim, &snapshot, scoring_time(&cmd.scoring))?;
            let rendered = report::render(
                ScoreDocument::Identity(&matched),
                resolve_format(cmd.format, &config),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = match e {
                ScoreError::InvalidInput(_) => exit_code::INVALID_INPUT,
                _ => exit_code::RUNTIME_FAILURE,
            };
            std::process::exit(code);
        }
    }
}
