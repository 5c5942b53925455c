use crate::error::{Result, ScoreError};
use crate::sources::snapshot::{same_address, same_handle};
use crate::sources::IdentityResolver;
use crate::types::inputs::IdentityLink;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

// Confidence is accumulated in hundredths to keep the 0.8 threshold exact.
const BASE_POINTS: u32 = 50;
const EMAIL_POINTS: u32 = 20;
const PAIR_POINTS: u32 = 20;
const NO_CONFLICT_POINTS: u32 = 10;
const MAX_POINTS: u32 = 100;
const VERIFIED_ABOVE_POINTS: u32 = 80;

#[derive(Debug, Clone, Default)]
pub struct IdentityClaim {
    pub wallet_address: Option<String>,
    pub social_handle: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
}

impl VerificationStatus {
    pub fn label(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_handle: Option<String>,
    pub confidence: f64,
    pub status: VerificationStatus,
    pub conflicts: Vec<IdentityLink>,
    pub matched_at: DateTime<Utc>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// A recorded link for the same pair is a repeat, not a conflict.
fn is_conflict(link: &IdentityLink, address: Option<&str>, handle: Option<&str>) -> bool {
    let same_wallet = address.is_some_and(|a| same_address(&link.wallet_address, a));
    let same_social = handle.is_some_and(|h| same_handle(&link.social_handle, h));
    !(same_wallet && same_social)
}

/// Confidence that a wallet, handle and email belong to one person.
pub fn match_identity(
    claim: &IdentityClaim,
    resolver: &dyn IdentityResolver,
    now: DateTime<Utc>,
) -> Result<IdentityMatch> {
    let address = present(claim.wallet_address.as_deref());
    let handle = present(claim.social_handle.as_deref());
    if address.is_none() && handle.is_none() {
        return Err(ScoreError::invalid(
            "identity match needs a wallet address or a social handle",
        ));
    }

    let conflicts: Vec<IdentityLink> = resolver
        .existing_links(address, handle)
        .into_iter()
        .filter(|link| is_conflict(link, address, handle))
        .collect();

    let mut points = BASE_POINTS;
    if present(claim.email.as_deref()).is_some() {
        points += EMAIL_POINTS;
    }
    if address.is_some() && handle.is_some() {
        points += PAIR_POINTS;
    }
    if conflicts.is_empty() {
        points += NO_CONFLICT_POINTS;
    }
    let points = points.min(MAX_POINTS);
    let status = if points > VERIFIED_ABOVE_POINTS {
        VerificationStatus::Verified
    } else {
        VerificationStatus::Pending
    };

    debug!(
        points,
        conflicts = conflicts.len(),
        status = status.label(),
        "computed identity match"
    );

    Ok(IdentityMatch {
        wallet_address: address.map(str::to_string),
        social_handle: handle.map(str::to_string),
        confidence: f64::from(points) / 100.0,
        status,
        conflicts,
        matched_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::snapshot::Snapshot;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn snapshot() -> Snapshot {
        serde_json::from_str(
            r#"{ "identities": [
                { "walletAddress": "0xabc", "socialHandle": "satoshi" }
            ] }"#,
        )
        .expect("snapshot should parse")
    }

    fn claim(wallet: Option<&str>, handle: Option<&str>, email: Option<&str>) -> IdentityClaim {
        IdentityClaim {
            wallet_address: wallet.map(str::to_string),
            social_handle: handle.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn full_claim_without_conflicts_caps_at_one() {
        let result = match_identity(
            &claim(Some("0xdef"), Some("hal"), Some("hal@example.com")),
            &snapshot(),
            now(),
        )
        .expect("match should compute");
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.status, VerificationStatus::Verified);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn pair_without_email_stays_pending() {
        let result = match_identity(&claim(Some("0xdef"), Some("hal"), None), &snapshot(), now())
            .expect("match should compute");
        assert_eq!(result.confidence, 0.8);
        // exactly 0.8 is not above the threshold
        assert_eq!(result.status, VerificationStatus::Pending);
    }

    #[test]
    fn wallet_alone_stays_pending() {
        let result = match_identity(&claim(Some("0xdef"), None, Some(" ")), &snapshot(), now())
            .expect("match should compute");
        assert!((result.confidence - 0.6).abs() < 1e-12);
        assert_eq!(result.status, VerificationStatus::Pending);
        assert!(result.social_handle.is_none());
    }

    #[test]
    fn conflicting_link_drops_the_bonus() {
        let result = match_identity(
            &claim(Some("0xABC"), Some("hal"), Some("hal@example.com")),
            &snapshot(),
            now(),
        )
        .expect("match should compute");
        assert!((result.confidence - 0.9).abs() < 1e-12);
        assert_eq!(result.status, VerificationStatus::Verified);
        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.conflicts[0].social_handle, "satoshi");
    }

    #[test]
    fn repeated_link_is_not_a_conflict() {
        let result = match_identity(
            &claim(Some("0xabc"), Some("@Satoshi"), None),
            &snapshot(),
            now(),
        )
        .expect("match should compute");
        assert!(result.conflicts.is_empty());
        assert!((result.confidence - 0.8).abs() < 1e-12);
    }

    #[test]
    fn claim_needs_wallet_or_handle() {
        let err = match_identity(&claim(None, Some("  "), Some("a@b.c")), &snapshot(), now())
            .expect_err("empty claim should fail");
        assert!(matches!(err, ScoreError::InvalidInput(_)));
    }
}
