use crate::error::ScoreError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub future_timestamps: FutureTimestampPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FutureTimestampPolicy {
    #[default]
    Clamp,
    Reject,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<String>,
}

impl ScoreConfig {
    pub fn future_timestamps(&self) -> FutureTimestampPolicy {
        self.engine.future_timestamps
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if let Some(format) = &self.output.format {
            if !matches!(format.as_str(), "md" | "json") {
                return Err(ScoreError::ConfigParse(format!(
                    "unsupported output.format: {format}"
                )));
            }
        }
        Ok(())
    }
}
