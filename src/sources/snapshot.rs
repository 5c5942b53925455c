use crate::error::{Result, ScoreError};
use crate::sources::{ChainActivitySource, IdentityResolver, SocialProfileSource};
use crate::types::inputs::{ChainSummary, IdentityLink, SocialMetrics};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub chains: BTreeMap<String, Vec<ChainSummary>>,
    #[serde(default)]
    pub social: BTreeMap<String, SocialMetrics>,
    #[serde(default)]
    pub identities: Vec<IdentityLink>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScoreError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ScoreError::malformed(path, &e))
    }
}

pub(crate) fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

// Handles compare without a leading '@'.
pub(crate) fn same_handle(a: &str, b: &str) -> bool {
    a.trim_start_matches('@')
        .eq_ignore_ascii_case(b.trim_start_matches('@'))
}

// Exact key first, then the first key in sorted order that matches loosely.
fn lookup<'a, T>(
    map: &'a BTreeMap<String, T>,
    key: &str,
    matches: fn(&str, &str) -> bool,
) -> Option<&'a T> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(candidate, _)| matches(candidate, key))
            .map(|(_, value)| value)
    })
}

impl ChainActivitySource for Snapshot {
    fn chain_summaries(&self, address: &str) -> Result<Option<Vec<ChainSummary>>> {
        Ok(lookup(&self.chains, address, same_address).cloned())
    }
}

impl SocialProfileSource for Snapshot {
    fn social_profile(&self, handle: &str) -> Result<Option<SocialMetrics>> {
        Ok(lookup(&self.social, handle, same_handle).cloned())
    }
}

impl IdentityResolver for Snapshot {
    fn linked_handle(&self, address: &str) -> Option<String> {
        self.identities
            .iter()
            .find(|link| same_address(&link.wallet_address, address))
            .map(|link| link.social_handle.clone())
    }

    fn linked_address(&self, handle: &str) -> Option<String> {
        self.identities
            .iter()
            .find(|link| same_handle(&link.social_handle, handle))
            .map(|link| link.wallet_address.clone())
    }

    fn existing_links(&self, address: Option<&str>, handle: Option<&str>) -> Vec<IdentityLink> {
        self.identities
            .iter()
            .filter(|link| {
                address.is_some_and(|a| same_address(&link.wallet_address, a))
                    || handle.is_some_and(|h| same_handle(&link.social_handle, h))
            })
            .cloned()
            .collect()
    }
}
