//! Sentiment scoring delegated to an external chat-completion model.

pub mod client;
pub mod prompt;
pub mod scores;

pub use client::ChatCompletionClient;
pub use scores::{AverageScores, parse_model_output};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("no API key configured (expected in ${0})")]
    MissingApiKey(String),

    #[error("failed to encode reviews for the prompt: {0}")]
    Prompt(#[source] serde_json::Error),

    #[error("request to sentiment provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("sentiment provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("sentiment provider returned no choices")]
    NoChoices,

    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("model output is not a JSON object")]
    NotAnObject,

    #[error("model output entry '{index}' is malformed: {reason}")]
    MalformedEntry { index: String, reason: String },

    #[error("model output has no entries")]
    Empty,
}

impl SentimentError {
    /// True when the provider answered but its content could not be used.
    pub fn is_model_output(&self) -> bool {
        matches!(
            self,
            SentimentError::InvalidJson(_)
                | SentimentError::NotAnObject
                | SentimentError::MalformedEntry { .. }
                | SentimentError::Empty
        )
    }
}

/// A model that scores a list of reviews and returns its raw text reply.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    async fn score(&self, reviews: &[String]) -> Result<String, SentimentError>;

    fn model_name(&self) -> &str;
}
