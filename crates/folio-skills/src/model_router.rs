//! Model Router: sends a contextual prompt to an OpenAI-compatible chat completions API.

use folio_core::LlmConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Strategy reported by the gateway: local pattern matching only, or live completions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmMode {
    #[default]
    Local,
    Live,
}

impl LlmMode {
    /// Live exactly when a non-blank credential is configured.
    pub fn from_config(config: &LlmConfig) -> Self {
        match config.credential() {
            Some(_) => LlmMode::Live,
            None => LlmMode::Local,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmMode::Local => "local",
            LlmMode::Live => "live",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response format: {0}")]
    MalformedPayload(String),
    #[error("completion had no content")]
    EmptyCompletion,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Routes a prompt to the configured completions endpoint. One attempt per call, no retry.
pub struct ModelRouter {
    config: LlmConfig,
    client: reqwest::Client,
}

impl ModelRouter {
    pub fn from_config(config: LlmConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(RemoteError::Client)?;
        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends `{system, user}` messages and returns the trimmed first completion.
    pub async fn generate(&self, system: &str, prompt: &str) -> Result<String, RemoteError> {
        let key = self.config.credential().ok_or(RemoteError::MissingCredential)?;
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let raw = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .ok()
                .and_then(|env| env.error)
                .and_then(|err| err.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletion =
            serde_json::from_str(&raw).map_err(|e| RemoteError::MalformedPayload(e.to_string()))?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(RemoteError::EmptyCompletion)
    }

    fn transport_error(&self, e: reqwest::Error) -> RemoteError {
        if e.is_timeout() {
            RemoteError::Timeout(self.config.timeout_secs)
        } else {
            RemoteError::Transport(e)
        }
    }
}
