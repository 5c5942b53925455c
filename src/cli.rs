use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "credscore",
    version,
    about = "Wallet, off-chain and social credit scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding credscore.toml (defaults to the working directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a wallet with off-chain attributes (300-850)
    Wallet(WalletCommand),
    /// Score wallet-only activity metrics (0-100)
    Activity(ActivityCommand),
    /// Print improvement recommendations for activity metrics
    Suggest(SuggestCommand),
    /// Score an identifier across chain and social data (300-850)
    Comprehensive(ComprehensiveCommand),
    /// Rate how confidently a wallet, handle and email belong together
    Identity(IdentityCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum IdentifierKind {
    Wallet,
    Social,
}

/// Options shared by every scoring command.
#[derive(Args)]
pub struct ScoringArgs {
    /// Scoring time as RFC 3339 (defaults to now)
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Args)]
pub struct WalletCommand {
    /// JSON file with `wallet` and `offChain` records
    pub input: PathBuf,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Args)]
pub struct ActivityCommand {
    /// JSON file with activity metrics, or an account history with --from-history
    pub input: PathBuf,
    #[arg(long)]
    pub from_history: bool,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Args)]
pub struct SuggestCommand {
    pub input: PathBuf,
    #[arg(long)]
    pub from_history: bool,
    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Args)]
pub struct ComprehensiveCommand {
    /// JSON data snapshot with chains, social profiles and identity links
    pub snapshot: PathBuf,
    #[arg(long)]
    pub identifier: String,
    #[arg(long, value_enum, default_value = "wallet")]
    pub kind: IdentifierKind,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Args)]
pub struct IdentityCommand {
    /// JSON data snapshot holding the recorded identity links
    pub snapshot: PathBuf,
    #[arg(long)]
    pub wallet: Option<String>,
    #[arg(long)]
    pub handle: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    #[command(flatten)]
    pub scoring: ScoringArgs,
}
