use crate::engine::elapsed_since;
use crate::error::{Result, ScoreError};
use crate::types::config::FutureTimestampPolicy;
use crate::types::inputs::{AccountHistory, ActivityMetrics};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

pub const WEI_PER_ETH: f64 = 1e18;

pub fn derive_activity_metrics(
    history: &AccountHistory,
    now: DateTime<Utc>,
    policy: FutureTimestampPolicy,
) -> Result<ActivityMetrics> {
    let balance = parse_wei(&history.balance_wei)? / WEI_PER_ETH;

    let wallet_age_days = match history.transactions.iter().map(|tx| tx.timestamp).min() {
        Some(first) => {
            let days = elapsed_since("transactions[].timestamp", first, now, policy)?.num_days();
            u64::try_from(days).unwrap_or(0)
        }
        None => 0,
    };

    let tx_count = history.transactions.len() as u64;
    let tx_frequency_per_day = if wallet_age_days > 0 {
        tx_count as f64 / wallet_age_days as f64
    } else {
        0.0
    };

    let token_diversity_count = history
        .token_transfers
        .iter()
        .map(|transfer| transfer.contract_address.trim().to_ascii_lowercase())
        .collect::<HashSet<_>>()
        .len() as u64;

    debug!(
        wallet_age_days,
        tx_count, token_diversity_count, balance, "derived activity metrics"
    );

    Ok(ActivityMetrics {
        wallet_age_days,
        tx_count,
        tx_frequency_per_day,
        token_diversity_count,
        balance,
    })
}

fn parse_wei(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u128>()
        .map(|wei| wei as f64)
        .map_err(|e| {
            ScoreError::invalid(format!("balanceWei '{trimmed}' is not a wei amount: {e}"))
        })
}
