use crate::engine::{
    elapsed_since, require_non_negative, require_percent, round_half_away, to_credit_scale,
};
use crate::error::{Result, ScoreError};
use crate::types::config::FutureTimestampPolicy;
use crate::types::inputs::{OffChainAttributes, WalletMetrics};
use crate::types::scoring::{CreditScore, FactorScore, Scale, ScoreBreakdown};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

pub const WEIGHT_WALLET_AGE: f64 = 0.20;
pub const WEIGHT_TRANSACTION_HISTORY: f64 = 0.25;
pub const WEIGHT_DEFI_ENGAGEMENT: f64 = 0.15;
pub const WEIGHT_PORTFOLIO_VALUE: f64 = 0.15;
pub const WEIGHT_KYC_STATUS: f64 = 0.10;
pub const WEIGHT_SOCIAL_PRESENCE: f64 = 0.10;
pub const WEIGHT_RISK_FACTORS: f64 = 0.05;

const TRANSACTION_SATURATION: f64 = 500.0;
const DEFI_POINTS_PER_PROTOCOL: f64 = 25.0;
const PORTFOLIO_SATURATION: f64 = 50.0;
const RISK_PENALTY_PER_FLAG: f64 = 25.0;

pub fn compute_credit_score(
    wallet: &WalletMetrics,
    off_chain: &OffChainAttributes,
    now: DateTime<Utc>,
    policy: FutureTimestampPolicy,
) -> Result<CreditScore> {
    validate(wallet, off_chain)?;

    let age_days = elapsed_since(
        "firstTransactionTimestamp",
        wallet.first_transaction_timestamp,
        now,
        policy,
    )?
    .num_days();

    let breakdown = ScoreBreakdown {
        factors: vec![
            wallet_age_factor(age_days),
            transaction_history_factor(wallet.transaction_count),
            defi_engagement_factor(&wallet.defi_protocols),
            portfolio_value_factor(wallet.balance),
            kyc_status_factor(off_chain.kyc_verified),
            social_presence_factor(off_chain.social_score),
            risk_factors_factor(&off_chain.risk_flags),
        ],
    };

    debug_assert!((breakdown.weight_sum() - 1.0).abs() < 1e-9);
    let weighted_sum = breakdown.weighted_sum();
    let total = to_credit_scale(weighted_sum);
    debug!(age_days, weighted_sum, total, "computed wallet credit score");

    Ok(CreditScore {
        total,
        scale: Scale::Credit,
        breakdown,
        confidence: None,
        computed_at: now,
    })
}

fn validate(wallet: &WalletMetrics, off_chain: &OffChainAttributes) -> Result<()> {
    require_non_negative("balance", wallet.balance)?;
    if wallet.first_transaction_timestamp > wallet.last_transaction_timestamp {
        return Err(ScoreError::invalid(format!(
            "firstTransactionTimestamp {} is after lastTransactionTimestamp {}",
            wallet.first_transaction_timestamp.to_rfc3339(),
            wallet.last_transaction_timestamp.to_rfc3339()
        )));
    }
    for holding in &wallet.token_holdings {
        require_non_negative(
            &format!("tokenHoldings[{}].amount", holding.token),
            holding.amount,
        )?;
    }
    require_percent("socialScore", off_chain.social_score)?;
    require_percent("creditHistoryScore", off_chain.credit_history_score)?;
    Ok(())
}

fn distinct_count(items: &[String]) -> usize {
    items.iter().map(String::as_str).collect::<HashSet<_>>().len()
}

fn wallet_age_factor(age_days: i64) -> FactorScore {
    let score = (age_days as f64 / 365.0 * 50.0).min(100.0);
    FactorScore::new(
        "walletAge",
        round_half_away(score),
        WEIGHT_WALLET_AGE,
        format!("Wallet age: {age_days} days"),
    )
}

fn transaction_history_factor(transaction_count: u64) -> FactorScore {
    let score = (transaction_count as f64 / TRANSACTION_SATURATION * 100.0).min(100.0);
    FactorScore::new(
        "transactionHistory",
        round_half_away(score),
        WEIGHT_TRANSACTION_HISTORY,
        format!("{transaction_count} transactions"),
    )
}

fn defi_engagement_factor(protocols: &[String]) -> FactorScore {
    let count = distinct_count(protocols);
    let score = (count as f64 * DEFI_POINTS_PER_PROTOCOL).min(100.0);
    FactorScore::new(
        "defiEngagement",
        round_half_away(score),
        WEIGHT_DEFI_ENGAGEMENT,
        format!("Active on {count} DeFi protocols"),
    )
}

fn portfolio_value_factor(balance: f64) -> FactorScore {
    let score = (balance / PORTFOLIO_SATURATION * 100.0).min(100.0);
    FactorScore::new(
        "portfolioValue",
        round_half_away(score),
        WEIGHT_PORTFOLIO_VALUE,
        format!("Portfolio value: {balance:.2} ETH"),
    )
}

fn kyc_status_factor(verified: bool) -> FactorScore {
    let (score, description) = if verified {
        (100.0, "KYC verified")
    } else {
        (0.0, "KYC not verified")
    };
    FactorScore::new("kycStatus", score, WEIGHT_KYC_STATUS, description)
}

// Passed through as-is; range is checked in `validate`.
fn social_presence_factor(social_score: f64) -> FactorScore {
    FactorScore::new(
        "socialPresence",
        social_score,
        WEIGHT_SOCIAL_PRESENCE,
        format!("Social presence score: {social_score}/100"),
    )
}

fn risk_factors_factor(flags: &[String]) -> FactorScore {
    let count = distinct_count(flags);
    let score = (100.0 - count as f64 * RISK_PENALTY_PER_FLAG).max(0.0);
    let description = match count {
        0 => "No risk flags".to_string(),
        1 => "1 risk flag".to_string(),
        n => format!("{n} risk flags"),
    };
    FactorScore::new("riskFactors", score, WEIGHT_RISK_FACTORS, description)
}
