use crate::engine::{elapsed_since, require_non_negative, to_credit_scale, SECONDS_PER_YEAR};
use crate::error::Result;
use crate::types::config::FutureTimestampPolicy;
use crate::types::inputs::{ChainSummary, Sentiment, SocialMetrics};
use crate::types::scoring::{ComponentBreakdown, ComprehensiveScore};
use chrono::{DateTime, Utc};
use tracing::debug;

// Top-level component weights. These are separate from the per-term
// coefficients inside the blockchain and social sub-scores.
pub const WEIGHT_BLOCKCHAIN: f64 = 0.4;
pub const WEIGHT_SOCIAL: f64 = 0.3;
pub const WEIGHT_IDENTITY: f64 = 0.2;
pub const WEIGHT_RISK: f64 = 0.1;

pub const RISK_PLACEHOLDER_SCORE: f64 = 85.0;

const IDENTITY_LINKED: f64 = 100.0;
const IDENTITY_PARTIAL: f64 = 50.0;

const BASE_CONFIDENCE: f64 = 0.5;
const BLOCKCHAIN_CONFIDENCE: f64 = 0.3;
const SOCIAL_CONFIDENCE: f64 = 0.2;
const IDENTITY_CONFIDENCE: f64 = 0.2;

/// Combines per-chain activity and an optional social profile into a
/// 300-850 score with a confidence in [0, 1].
///
/// `chains` is `None` when no chain record exists for the wallet. An empty
/// record still counts toward identity but adds no blockchain confidence.
pub fn compute_comprehensive_score(
    chains: Option<&[ChainSummary]>,
    social: Option<&SocialMetrics>,
    now: DateTime<Utc>,
    policy: FutureTimestampPolicy,
) -> Result<ComprehensiveScore> {
    let summaries = chains.unwrap_or_default();
    let blockchain = blockchain_score(summaries, now, policy)?;
    let social_component = social.map(social_score).unwrap_or(0.0);

    let has_chains = !summaries.is_empty();
    let has_social = social.is_some();
    let identity = if chains.is_some() && has_social {
        IDENTITY_LINKED
    } else {
        IDENTITY_PARTIAL
    };
    let risk = RISK_PLACEHOLDER_SCORE;

    let weighted_sum = blockchain * WEIGHT_BLOCKCHAIN
        + social_component * WEIGHT_SOCIAL
        + identity * WEIGHT_IDENTITY
        + risk * WEIGHT_RISK;
    let score = to_credit_scale(weighted_sum);

    let mut confidence = BASE_CONFIDENCE;
    if has_chains {
        confidence += BLOCKCHAIN_CONFIDENCE;
    }
    if has_social {
        confidence += SOCIAL_CONFIDENCE;
    }
    if identity == IDENTITY_LINKED {
        confidence += IDENTITY_CONFIDENCE;
    }
    let confidence = confidence.min(1.0);

    debug!(
        blockchain,
        social = social_component,
        identity,
        weighted_sum,
        score,
        confidence,
        "computed comprehensive score"
    );

    Ok(ComprehensiveScore {
        score,
        breakdown: ComponentBreakdown {
            blockchain,
            social: social_component,
            identity,
            risk,
        },
        confidence,
        wallet_address: None,
        social_handle: None,
        computed_at: now,
    })
}

pub fn blockchain_score(
    chains: &[ChainSummary],
    now: DateTime<Utc>,
    policy: FutureTimestampPolicy,
) -> Result<f64> {
    if chains.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for chain in chains {
        require_non_negative(&format!("chains[{}].balance", chain.chain), chain.balance)?;
        let years = match chain.first_transaction_timestamp {
            Some(first) => {
                let field = format!("chains[{}].firstTransactionTimestamp", chain.chain);
                let elapsed = elapsed_since(&field, first, now, policy)?;
                elapsed.num_seconds() as f64 / SECONDS_PER_YEAR
            }
            None => 0.0,
        };
        let raw = chain.transaction_count as f64 * 0.5 + chain.balance * 2.0 + years * 10.0;
        total += raw.min(100.0);
    }
    Ok(total / chains.len() as f64)
}

pub fn social_score(social: &SocialMetrics) -> f64 {
    let profile = &social.profile;
    let sentiment_bonus = match social.sentiment.overall {
        Sentiment::Positive => 15.0,
        Sentiment::Neutral => 10.0,
        Sentiment::Negative => 5.0,
    };

    let raw = profile.follower_count as f64 / 100.0
        + if profile.verified { 20.0 } else { 0.0 }
        + profile.account_age_days as f64 / 365.0 * 10.0
        + sentiment_bonus
        + social.sentiment.crypto_mention_count as f64 * 0.5;
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;
    use crate::types::inputs::{SentimentSummary, SocialProfile};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn chain(
        name: &str,
        transaction_count: u64,
        balance: f64,
        age_days: Option<i64>,
    ) -> ChainSummary {
        ChainSummary {
            chain: name.to_string(),
            transaction_count,
            balance,
            first_transaction_timestamp: age_days.map(|days| now() - Duration::days(days)),
        }
    }

    fn social(
        follower_count: u64,
        verified: bool,
        account_age_days: u64,
        overall: Sentiment,
        crypto_mention_count: u64,
    ) -> SocialMetrics {
        SocialMetrics {
            profile: SocialProfile {
                follower_count,
                verified,
                account_age_days,
            },
            sentiment: SentimentSummary {
                overall,
                crypto_mention_count,
            },
        }
    }

    #[test]
    fn no_data_scores_identity_and_risk_only() {
        let result = compute_comprehensive_score(None, None, now(), FutureTimestampPolicy::Clamp)
            .expect("score should compute");
        assert_eq!(result.breakdown.blockchain, 0.0);
        assert_eq!(result.breakdown.social, 0.0);
        assert_eq!(result.breakdown.identity, 50.0);
        assert_eq!(result.breakdown.risk, 85.0);
        // 300 + 50*0.2*5.5 + 85*0.1*5.5 = 401.75
        assert_eq!(result.score, 402);
        assert!((result.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn blockchain_score_averages_capped_chains() {
        let chains = vec![
            // 100*0.5 + 10*2 + 1y*10 = 80
            chain("ethereum", 100, 10.0, Some(365)),
            // 1000*0.5 caps at 100
            chain("polygon", 1000, 0.0, None),
        ];
        let score = blockchain_score(&chains, now(), FutureTimestampPolicy::Clamp)
            .expect("score should compute");
        assert!((score - 90.0).abs() < 1e-9);
    }

    #[test]
    fn social_score_sums_terms_and_clamps() {
        // 2500/100 + 20 + 730/365*10 + 15 + 10*0.5 = 85
        let moderate = social(2_500, true, 730, Sentiment::Positive, 10);
        assert!((social_score(&moderate) - 85.0).abs() < 1e-9);

        let quiet = social(0, false, 0, Sentiment::Negative, 0);
        assert!((social_score(&quiet) - 5.0).abs() < 1e-9);

        let famous = social(1_000_000, true, 3650, Sentiment::Neutral, 400);
        assert_eq!(social_score(&famous), 100.0);
    }

    #[test]
    fn full_data_links_identity_and_caps_confidence() {
        let chains = vec![chain("ethereum", 100, 10.0, Some(365))];
        let profile = social(2_500, true, 730, Sentiment::Positive, 10);
        let result = compute_comprehensive_score(
            Some(chains.as_slice()),
            Some(&profile),
            now(),
            FutureTimestampPolicy::Clamp,
        )
        .expect("score should compute");

        assert_eq!(result.breakdown.identity, 100.0);
        assert!((result.confidence - 1.0).abs() < 1e-9);
        // 80*0.4 + 85*0.3 + 100*0.2 + 85*0.1 = 86 -> 300 + 86*5.5 = 773
        assert_eq!(result.score, 773);
    }

    #[test]
    fn social_only_keeps_partial_identity() {
        let profile = social(0, false, 0, Sentiment::Neutral, 0);
        let result = compute_comprehensive_score(
            None,
            Some(&profile),
            now(),
            FutureTimestampPolicy::Clamp,
        )
        .expect("score should compute");
        assert_eq!(result.breakdown.identity, 50.0);
        assert!((result.confidence - 0.7).abs() < 1e-9);
        assert!((300..=850).contains(&result.score));
    }

    #[test]
    fn empty_chain_record_still_links_identity() {
        let profile = social(1_000, false, 365, Sentiment::Neutral, 0);
        let result = compute_comprehensive_score(
            Some(&[][..]),
            Some(&profile),
            now(),
            FutureTimestampPolicy::Clamp,
        )
        .expect("score should compute");
        assert_eq!(result.breakdown.blockchain, 0.0);
        assert_eq!(result.breakdown.identity, 100.0);
        // 0.5 base + 0.2 social + 0.2 identity, no blockchain bonus
        assert!((result.confidence - 0.9).abs() < 1e-9);
        // social 30: 300 + (30*0.3 + 100*0.2 + 85*0.1) * 5.5 = 506.25
        assert_eq!(result.score, 506);
    }

    #[test]
    fn chains_only_add_blockchain_confidence() {
        let chains = vec![chain("ethereum", 0, 0.0, None)];
        let result = compute_comprehensive_score(
            Some(chains.as_slice()),
            None,
            now(),
            FutureTimestampPolicy::Clamp,
        )
        .expect("score should compute");
        assert!((result.confidence - 0.8).abs() < 1e-9);
        assert_eq!(result.breakdown.identity, 50.0);
    }

    #[test]
    fn future_chain_timestamp_follows_policy() {
        let chains = vec![chain("ethereum", 10, 0.0, Some(-30))];
        let clamped = blockchain_score(&chains, now(), FutureTimestampPolicy::Clamp)
            .expect("clamp should succeed");
        assert!((clamped - 5.0).abs() < 1e-9);

        let err = blockchain_score(&chains, now(), FutureTimestampPolicy::Reject)
            .expect_err("reject should fail");
        assert!(matches!(err, ScoreError::InvalidInput(_)));
    }

    #[test]
    fn negative_chain_balance_is_rejected() {
        let chains = vec![chain("ethereum", 10, -1.0, None)];
        assert!(blockchain_score(&chains, now(), FutureTimestampPolicy::Clamp).is_err());
    }
}
