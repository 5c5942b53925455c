//! Scoring policies: [`wallet`], [`activity`] and [`comprehensive`].

pub mod activity;
pub mod comprehensive;
pub mod derive;
pub mod wallet;

use crate::error::{Result, ScoreError};
use crate::types::config::FutureTimestampPolicy;
use crate::types::scoring::Scale;
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

pub const CREDIT_SPAN_MULTIPLIER: f64 = 5.5;

pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Rounds half away from zero after snapping floating dust, so a weighted
/// sum of 778.4999999999999 still rounds like 778.5.
pub fn round_half_away(value: f64) -> f64 {
    ((value * 1e9).round() / 1e9).round()
}

pub fn to_credit_scale(weighted_sum: f64) -> u32 {
    let (floor, _) = Scale::Credit.bounds();
    let raw = round_half_away(f64::from(floor) + weighted_sum * CREDIT_SPAN_MULTIPLIER);
    clamp_to_scale(raw, Scale::Credit)
}

pub fn clamp_to_scale(value: f64, scale: Scale) -> u32 {
    let (floor, ceiling) = scale.bounds();
    value.clamp(f64::from(floor), f64::from(ceiling)) as u32
}

pub fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ScoreError::invalid(format!(
            "{field} must be a finite non-negative number (found {value})"
        )));
    }
    Ok(())
}

pub fn require_percent(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ScoreError::invalid(format!(
            "{field} must be between 0 and 100 (found {value})"
        )));
    }
    Ok(())
}

pub fn elapsed_since(
    field: &str,
    since: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: FutureTimestampPolicy,
) -> Result<Duration> {
    let elapsed = now.signed_duration_since(since);
    if elapsed >= Duration::zero() {
        return Ok(elapsed);
    }
    match policy {
        FutureTimestampPolicy::Clamp => {
            warn!(
                field,
                timestamp = %since.to_rfc3339(),
                "timestamp is in the future; treating age as zero"
            );
            Ok(Duration::zero())
        }
        FutureTimestampPolicy::Reject => Err(ScoreError::invalid(format!(
            "{field} {} is later than the scoring time {}",
            since.to_rfc3339(),
            now.to_rfc3339()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round_half_away(778.5), 779.0);
        assert_eq!(round_half_away(778.499_999_999_999_9), 779.0);
        assert_eq!(round_half_away(778.49), 778.0);
        assert_eq!(round_half_away(0.5), 1.0);
    }

    #[test]
    fn credit_scale_is_bounded() {
        assert_eq!(to_credit_scale(0.0), 300);
        assert_eq!(to_credit_scale(100.0), 850);
        assert_eq!(to_credit_scale(250.0), 850);
        assert_eq!(to_credit_scale(-40.0), 300);
        assert_eq!(to_credit_scale(87.0), 779);
    }

    #[test]
    fn non_negative_check_rejects_nan_and_negatives() {
        assert!(require_non_negative("balance", 0.0).is_ok());
        assert!(require_non_negative("balance", f64::NAN).is_err());
        assert!(require_non_negative("balance", f64::INFINITY).is_err());
        let err = require_non_negative("balance", -1.0).expect_err("negative should fail");
        assert!(matches!(err, ScoreError::InvalidInput(_)));
        assert!(err.to_string().contains("balance"));
    }

    #[test]
    fn percent_check_enforces_range() {
        assert!(require_percent("socialScore", 100.0).is_ok());
        assert!(require_percent("socialScore", 100.5).is_err());
        assert!(require_percent("socialScore", -0.1).is_err());
    }

    #[test]
    fn future_timestamp_clamps_or_rejects() {
        let future = now() + Duration::days(3);
        let clamped = elapsed_since("first", future, now(), FutureTimestampPolicy::Clamp)
            .expect("clamp policy should succeed");
        assert_eq!(clamped, Duration::zero());

        let err = elapsed_since("first", future, now(), FutureTimestampPolicy::Reject)
            .expect_err("reject policy should fail");
        assert!(err.to_string().contains("later than the scoring time"));
    }

    #[test]
    fn past_timestamp_reports_elapsed_time() {
        let past = now() - Duration::days(10);
        let elapsed = elapsed_since("first", past, now(), FutureTimestampPolicy::Reject)
            .expect("past timestamp should succeed");
        assert_eq!(elapsed.num_days(), 10);
    }
}
