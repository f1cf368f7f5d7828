//! Text-generation client abstraction.
//!
//! The core treats "send a prompt, get text back" as an opaque external
//! operation behind the [`TextGenerator`] trait. The shipped
//! implementation speaks the OpenAI-compatible chat-completions protocol
//! used by DeepSeek and friends.

use crate::config::AiConfig;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Errors from the external text-generation service. Absorbed by the
/// synthesizer; they never fail a report request outright.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeneratorError {
    #[error("network error: {0}")]
    Network(String),
    #[error("generation request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("malformed completion payload: {0}")]
    MalformedResponse(String),
}

/// An external service that turns a prompt into text.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: String) -> BoxFuture<'_, Result<String, GeneratorError>>;

    /// Model identifier, for logging and report provenance.
    fn model_name(&self) -> &str;
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// OpenAI-compatible chat-completions client.
pub struct ChatCompletionsGenerator {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    request_timeout: Duration,
}

impl ChatCompletionsGenerator {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            request_timeout: config.request_timeout,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

impl TextGenerator for ChatCompletionsGenerator {
    fn generate(&self, prompt: String) -> BoxFuture<'_, Result<String, GeneratorError>> {
        Box::pin(async move {
            let request = ChatRequest {
                model: self.model.clone(),
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt,
                }],
                max_tokens: self.max_tokens,
                stream: false,
            };

            let mut builder = self
                .client
                .post(self.completions_url())
                .timeout(self.request_timeout)
                .json(&request);
            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout(self.request_timeout)
                } else {
                    GeneratorError::Network(e.to_string())
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(GeneratorError::UpstreamStatus(status.as_u16()));
            }

            let completion: ChatResponse = response
                .json()
                .await
                .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

            let content = completion
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| {
                    GeneratorError::MalformedResponse("completion has no choices".to_string())
                })?;

            debug!("Received {} characters from {}", content.len(), self.model);
            Ok(content.trim().to_string())
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Scriptable generator for tests: replays a canned response or fails.
pub struct MockGenerator {
    outcome: Result<String, GeneratorError>,
}

impl MockGenerator {
    pub fn responding(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(GeneratorError::Network(
                "connection refused".to_string(),
            )),
        }
    }
}

impl TextGenerator for MockGenerator {
    fn generate(&self, _prompt: String) -> BoxFuture<'_, Result<String, GeneratorError>> {
        Box::pin(async move { self.outcome.clone() })
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
