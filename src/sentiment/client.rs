use super::prompt::{SYSTEM_PROMPT, render_reviews};
use super::{SentimentError, SentimentModel};
use crate::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// OpenAI-compatible chat-completion client
pub struct ChatCompletionClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    json_mode: bool,
    api_key_env: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(config: &LlmConfig) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            json_mode: config.json_mode,
            api_key_env: config.api_key_env.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn build_request<'a>(&'a self, user_content: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: self.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }
}

#[async_trait]
impl SentimentModel for ChatCompletionClient {
    async fn score(&self, reviews: &[String]) -> Result<String, SentimentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SentimentError::MissingApiKey(self.api_key_env.clone()))?;

        let user_content = render_reviews(reviews).map_err(SentimentError::Prompt)?;
        let request = self.build_request(&user_content);

        info!(model = %self.model, reviews = reviews.len(), "Requesting sentiment scores");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SentimentError::Status { status, body });
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(SentimentError::NoChoices)?;

        debug!(bytes = content.len(), "Received model reply");

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn config(json_mode: bool, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            json_mode,
            api_key: api_key.map(str::to_string),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn request_carries_fixed_settings() {
        let client = ChatCompletionClient::new(&config(false, Some("key"))).unwrap();
        let request = client.build_request(r#"[{"index":0,"review":"ok"}]"#);
        let body: Value = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "mixtral-8x7b-32768");
        assert_eq!(body["max_tokens"], 32768);
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], r#"[{"index":0,"review":"ok"}]"#);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn json_mode_sets_response_format() {
        let client = ChatCompletionClient::new(&config(true, Some("key"))).unwrap();
        let body = serde_json::to_value(client.build_request("[]")).unwrap();
        assert_eq!(body["response_format"], json!({"type": "json_object"}));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let mut cfg = config(false, None);
        cfg.base_url = "http://localhost:8080/v1/".to_string();
        let client = ChatCompletionClient::new(&cfg).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let client = ChatCompletionClient::new(&config(false, None)).unwrap();
        let err = client.score(&["fine".to_string()]).await.unwrap_err();
        assert!(matches!(err, SentimentError::MissingApiKey(var) if var == "GROQ_API_KEY"));
    }

    #[test]
    fn reply_without_content_has_no_choices() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());

        let parsed: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
