//! Chat-completion API client.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. The client is
//! constructed once at startup from explicit configuration and passed down;
//! nothing in the pipelines reads credentials from the environment directly.
//!
//! The [`AskAsync`] trait is the seam between the pipelines and the network:
//! production code uses [`ChatClient`], tests substitute a canned
//! implementation. Calls are single-shot and blocking per the pipeline's
//! sequential model; there is no retry, rate-limit, or streaming handling.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Trait for async LLM interaction.
pub trait AskAsync {
    /// Send a prompt to the LLM and receive its free-text reply.
    async fn ask(&self, prompt: &str) -> Result<String>;
}

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl ChatClient {
    /// Build a client for the given endpoint and model.
    ///
    /// A trailing slash on `base_url` is tolerated.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

impl AskAsync for ChatClient {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn ask(&self, prompt: &str) -> Result<String> {
        let t0 = Instant::now();
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let parsed: ChatResponse = response.json().await?;

        let dt = t0.elapsed();
        let Some(choice) = parsed.choices.into_iter().next() else {
            warn!(elapsed_ms = dt.as_millis() as u128, "Reply contained no choices");
            return Err(Error::Api("reply contained no choices".to_string()));
        };
        info!(
            elapsed_ms = dt.as_millis() as u128,
            bytes = choice.message.content.len(),
            "Chat completion succeeded"
        );
        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let client = ChatClient::new("https://api.openai.com/v1", "sk-secret", "gpt-4o-mini");
        let debug = format!("{client:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ChatClient::new("https://api.openai.com/v1/", "k", "m");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "Generate the quiz questions",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Generate the quiz questions");
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Q1?,a,b,c,d,A"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Q1?,a,b,c,d,A");
    }
}
