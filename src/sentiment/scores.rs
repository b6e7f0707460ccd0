use super::SentimentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One entry of the model's reply
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SentimentScores {
    #[serde(rename = "POSITIVE")]
    pub positive: f64,
    #[serde(rename = "NEGATIVE")]
    pub negative: f64,
    #[serde(rename = "NEUTRAL")]
    pub neutral: f64,
}

/// Row index (as the model echoed it) to scores
pub type SentimentMap = BTreeMap<String, SentimentScores>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Parse the model's text content into validated entries.
pub fn parse_model_output(content: &str) -> Result<SentimentMap, SentimentError> {
    let value: Value = serde_json::from_str(content.trim()).map_err(SentimentError::InvalidJson)?;

    let Value::Object(entries) = value else {
        return Err(SentimentError::NotAnObject);
    };

    entries
        .into_iter()
        .map(|(index, entry)| match serde_json::from_value::<SentimentScores>(entry) {
            Ok(scores) => Ok((index, scores)),
            Err(e) => Err(SentimentError::MalformedEntry {
                index,
                reason: e.to_string(),
            }),
        })
        .collect()
}

impl AverageScores {
    /// Arithmetic mean of each field over the entries actually returned.
    /// Values are not range-checked.
    pub fn from_entries(entries: &SentimentMap) -> Result<Self, SentimentError> {
        if entries.is_empty() {
            return Err(SentimentError::Empty);
        }

        let (positive, negative, neutral) = entries.values().fold(
            (0.0, 0.0, 0.0),
            |(p, n, u), s| (p + s.positive, n + s.negative, u + s.neutral),
        );
        let total = entries.len() as f64;

        Ok(Self {
            positive: positive / total,
            negative: negative / total,
            neutral: neutral / total,
        })
    }
}
