pub mod json;
pub mod md;

use crate::error::ScoreError;
use crate::sources::identity::IdentityMatch;
use crate::types::scoring::{ActivityReport, ComprehensiveScore, CreditScore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

impl OutputFormat {
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Md,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ScoreDocument<'a> {
    Wallet(&'a CreditScore),
    Activity(&'a ActivityReport),
    Comprehensive(&'a ComprehensiveScore),
    Identity(&'a IdentityMatch),
}

pub fn render(document: ScoreDocument<'_>, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(&document).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::to_markdown(document)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_format_defaults_to_markdown() {
        assert_eq!(OutputFormat::from_config(None), OutputFormat::Md);
        assert_eq!(OutputFormat::from_config(Some("md")), OutputFormat::Md);
        assert_eq!(OutputFormat::from_config(Some("json")), OutputFormat::Json);
    }
}
