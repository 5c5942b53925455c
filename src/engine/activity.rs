use crate::engine::{clamp_to_scale, require_non_negative, round_half_away};
use crate::error::Result;
use crate::types::inputs::ActivityMetrics;
use crate::types::scoring::{
    ActivityReport, CreditScore, FactorScore, Rating, Scale, ScoreBreakdown,
};
use chrono::{DateTime, Utc};
use tracing::debug;

pub const WEIGHT_WALLET_AGE: f64 = 0.25;
pub const WEIGHT_TX_COUNT: f64 = 0.20;
pub const WEIGHT_TX_FREQUENCY: f64 = 0.15;
pub const WEIGHT_TOKEN_DIVERSITY: f64 = 0.15;
pub const WEIGHT_BALANCE: f64 = 0.25;

const MIN_WALLET_AGE_DAYS: u64 = 30;
const MIN_TX_COUNT: u64 = 50;
const MIN_TX_FREQUENCY: f64 = 0.1;
const MIN_TOKEN_DIVERSITY: u64 = 3;
const MIN_BALANCE: f64 = 0.5;

// Factor scores stay unrounded; only the total is rounded.
pub fn compute_wallet_score(metrics: &ActivityMetrics, now: DateTime<Utc>) -> Result<CreditScore> {
    validate(metrics)?;

    let wallet_age = (metrics.wallet_age_days as f64 / 365.0 * 100.0).min(100.0);
    let tx_count = (metrics.tx_count as f64 / 100.0 * 100.0).min(100.0);
    // Saturates at 0.1 tx/day.
    let tx_frequency = (metrics.tx_frequency_per_day * 1000.0).min(100.0);
    let token_diversity = (metrics.token_diversity_count as f64 * 10.0).min(100.0);
    let balance = (metrics.balance * 5.0).min(100.0);

    let breakdown = ScoreBreakdown {
        factors: vec![
            FactorScore::new(
                "walletAge",
                wallet_age,
                WEIGHT_WALLET_AGE,
                format!("Wallet age: {} days", metrics.wallet_age_days),
            ),
            FactorScore::new(
                "txCount",
                tx_count,
                WEIGHT_TX_COUNT,
                format!("Transaction count: {}", metrics.tx_count),
            ),
            FactorScore::new(
                "txFrequency",
                tx_frequency,
                WEIGHT_TX_FREQUENCY,
                format!(
                    "Transaction frequency: {:.4} tx/day",
                    metrics.tx_frequency_per_day
                ),
            ),
            FactorScore::new(
                "tokenDiversity",
                token_diversity,
                WEIGHT_TOKEN_DIVERSITY,
                format!(
                    "Token diversity: {} unique tokens",
                    metrics.token_diversity_count
                ),
            ),
            FactorScore::new(
                "balance",
                balance,
                WEIGHT_BALANCE,
                format!("Balance: {:.4} ETH", metrics.balance),
            ),
        ],
    };

    debug_assert!((breakdown.weight_sum() - 1.0).abs() < 1e-9);
    let weighted_sum = breakdown.weighted_sum();
    let total = clamp_to_scale(round_half_away(weighted_sum), Scale::Percent);
    debug!(weighted_sum, total, "computed wallet activity score");

    Ok(CreditScore {
        total,
        scale: Scale::Percent,
        breakdown,
        confidence: None,
        computed_at: now,
    })
}

pub fn generate_recommendations(metrics: &ActivityMetrics) -> Vec<String> {
    let checks = [
        (
            metrics.wallet_age_days < MIN_WALLET_AGE_DAYS,
            "Increase wallet age by maintaining activity over time",
        ),
        (
            metrics.tx_count < MIN_TX_COUNT,
            "Increase transaction count with regular blockchain activity",
        ),
        (
            metrics.tx_frequency_per_day < MIN_TX_FREQUENCY,
            "Improve transaction frequency with more regular activity",
        ),
        (
            metrics.token_diversity_count < MIN_TOKEN_DIVERSITY,
            "Diversify token holdings across multiple assets",
        ),
        (
            metrics.balance < MIN_BALANCE,
            "Increase balance to improve financial stability score",
        ),
    ];

    checks
        .into_iter()
        .filter(|(below, _)| *below)
        .map(|(_, advice)| advice.to_string())
        .collect()
}

pub fn activity_report(metrics: &ActivityMetrics, now: DateTime<Utc>) -> Result<ActivityReport> {
    let score = compute_wallet_score(metrics, now)?;
    let rating = Rating::from_score(score.total);
    Ok(ActivityReport {
        score,
        rating,
        recommendations: generate_recommendations(metrics),
    })
}

fn validate(metrics: &ActivityMetrics) -> Result<()> {
    require_non_negative("txFrequencyPerDay", metrics.tx_frequency_per_day)?;
    require_non_negative("balance", metrics.balance)?;
    Ok(())
}
