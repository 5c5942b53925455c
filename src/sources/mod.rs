pub mod identity;
pub mod snapshot;

use crate::engine::comprehensive::compute_comprehensive_score;
use crate::error::{Result, ScoreError};
use crate::types::config::FutureTimestampPolicy;
use crate::types::inputs::{ChainSummary, IdentityLink, SocialMetrics};
use crate::types::scoring::ComprehensiveScore;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub trait ChainActivitySource {
    /// Per-chain summaries for `address`, or `None` if the address is unknown.
    fn chain_summaries(&self, address: &str) -> Result<Option<Vec<ChainSummary>>>;
}

pub trait SocialProfileSource {
    fn social_profile(&self, handle: &str) -> Result<Option<SocialMetrics>>;
}

pub trait IdentityResolver {
    fn linked_handle(&self, address: &str) -> Option<String>;
    fn linked_address(&self, handle: &str) -> Option<String>;
    fn existing_links(&self, address: Option<&str>, handle: Option<&str>) -> Vec<IdentityLink>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Wallet,
    Social,
}

#[derive(Debug, Clone, Default)]
pub struct ComprehensiveInput {
    pub wallet_address: Option<String>,
    pub social_handle: Option<String>,
    pub chains: Option<Vec<ChainSummary>>,
    pub social: Option<SocialMetrics>,
}

pub fn gather_comprehensive_input(
    identifier: &str,
    kind: IdentifierKind,
    chains: &dyn ChainActivitySource,
    social: &dyn SocialProfileSource,
    identities: &dyn IdentityResolver,
) -> Result<ComprehensiveInput> {
    let (wallet_address, social_handle) = match kind {
        IdentifierKind::Wallet => (
            Some(identifier.to_string()),
            identities.linked_handle(identifier),
        ),
        IdentifierKind::Social => (
            identities.linked_address(identifier),
            Some(identifier.to_string()),
        ),
    };
    debug!(?wallet_address, ?social_handle, "resolved identity");

    let chain_data = match &wallet_address {
        Some(address) => chains.chain_summaries(address)?,
        None => None,
    };
    let social_data = match &social_handle {
        Some(handle) => social.social_profile(handle)?,
        None => None,
    };

    let linked = match kind {
        IdentifierKind::Wallet => social_handle.is_some(),
        IdentifierKind::Social => wallet_address.is_some(),
    };
    if chain_data.is_none() && social_data.is_none() && !linked {
        return Err(ScoreError::UnknownIdentifier(identifier.to_string()));
    }

    Ok(ComprehensiveInput {
        wallet_address,
        social_handle,
        chains: chain_data,
        social: social_data,
    })
}

pub fn score_identifier(
    identifier: &str,
    kind: IdentifierKind,
    chains: &dyn ChainActivitySource,
    social: &dyn SocialProfileSource,
    identities: &dyn IdentityResolver,
    now: DateTime<Utc>,
    policy: FutureTimestampPolicy,
) -> Result<ComprehensiveScore> {
    let input = gather_comprehensive_input(identifier, kind, chains, social, identities)?;
    info!(
        identifier,
        chains = input.chains.as_ref().map_or(0, Vec::len),
        has_social = input.social.is_some(),
        "scoring identifier"
    );

    let mut score = compute_comprehensive_score(
        input.chains.as_deref(),
        input.social.as_ref(),
        now,
        policy,
    )?;
    score.wallet_address = input.wallet_address;
    score.social_handle = input.social_handle;
    Ok(score)
}
