use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMetrics {
    pub balance: f64,
    pub transaction_count: u64,
    pub first_transaction_timestamp: DateTime<Utc>,
    pub last_transaction_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub defi_protocols: Vec<String>,
    #[serde(default)]
    pub token_holdings: Vec<TokenHolding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    pub token: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffChainAttributes {
    #[serde(default)]
    pub kyc_verified: bool,
    pub social_score: f64,
    /// Carried through for collaborators; not part of the weighted formula.
    #[serde(default)]
    pub credit_history_score: f64,
    #[serde(default)]
    pub risk_flags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletScoreRequest {
    pub wallet: WalletMetrics,
    pub off_chain: OffChainAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetrics {
    pub wallet_age_days: u64,
    pub tx_count: u64,
    pub tx_frequency_per_day: f64,
    pub token_diversity_count: u64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountHistory {
    /// Balance in wei as a decimal integer string.
    pub balance_wei: String,
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
    #[serde(default)]
    pub token_transfers: Vec<TokenTransfer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub contract_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMetrics {
    pub profile: SocialProfile,
    pub sentiment: SentimentSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProfile {
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub account_age_days: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    pub overall: Sentiment,
    #[serde(default)]
    pub crypto_mention_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSummary {
    pub chain: String,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub balance: f64,
    pub first_transaction_timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityLink {
    pub wallet_address: String,
    pub social_handle: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_request_parses_camel_case_fields() {
        let json = r#"{
            "wallet": {
                "balance": 12.5,
                "transactionCount": 40,
                "firstTransactionTimestamp": "2024-01-01T00:00:00Z",
                "lastTransactionTimestamp": "2025-01-01T00:00:00Z",
                "defiProtocols": ["aave", "uniswap"]
            },
            "offChain": {
                "kycVerified": true,
                "socialScore": 55,
                "riskFlags": ["sanctions"]
            }
        }"#;

        let request: WalletScoreRequest = serde_json::from_str(json).expect("request should parse");
        assert_eq!(request.wallet.transaction_count, 40);
        assert_eq!(request.wallet.defi_protocols.len(), 2);
        assert!(request.wallet.token_holdings.is_empty());
        assert!(request.off_chain.kyc_verified);
        assert_eq!(request.off_chain.credit_history_score, 0.0);
        assert_eq!(request.off_chain.risk_flags, vec!["sanctions".to_string()]);
    }

    #[test]
    fn sentiment_uses_lowercase_labels() {
        let sentiment: Sentiment = serde_json::from_str("\"negative\"").expect("should parse");
        assert_eq!(sentiment, Sentiment::Negative);
        assert!(serde_json::from_str::<Sentiment>("\"angry\"").is_err());
    }
}
