use crate::report::ScoreDocument;

pub fn to_json(document: &ScoreDocument<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}
