//! Minimal OpenAI client for our one use-case.
//!
//! We only call chat.completions and request plain text. Calls are
//! instrumented and log model name, latency, and response sizes (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::Prompts;

/// Failure at the provider boundary. Every variant renders as a
/// human-readable message; nothing above this layer sees a panic.
#[derive(Error, Debug)]
pub enum ApiError {
  #[error("request failed: {0}")]
  Transport(String),
  #[error("OpenAI HTTP {status}: {message}")]
  Provider { status: u16, message: String },
  #[error("malformed response: {0}")]
  Malformed(String),
  #[error("empty completion")]
  EmptyCompletion,
}

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  /// No timeout override: the transport's defaults apply.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4.1".into());

    let client = reqwest::Client::builder().build().ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// Rewrite an exercise around the student's context. Exactly one round
  /// trip; the reply text comes back unmodified apart from outer trimming.
  #[instrument(level = "info", skip(self, prompts, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn personalize(&self, prompts: &Prompts, prompt: &str) -> Result<String, ApiError> {
    let start = std::time::Instant::now();
    let result = self.chat_plain(&prompts.personalize_system, prompt).await;
    let elapsed = start.elapsed();

    match &result {
      Ok(text) => info!(?elapsed, reply_len = text.len(), "Personalization reply received"),
      Err(e) => error!(?elapsed, error = %e, "Personalization call failed"),
    }
    result
  }

  /// Plain-text chat completion.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_plain(&self, system: &str, user: &str) -> Result<String, ApiError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
    };

    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "mappi-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req)
      .send()
      .await
      .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      return Err(ApiError::Provider { status, message });
    }

    let body: ChatCompletionResponse =
      res.json().await.map_err(|e| ApiError::Malformed(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body
      .choices
      .first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default()
      .trim()
      .to_string();

    if text.is_empty() {
      return Err(ApiError::EmptyCompletion);
    }
    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
}
#[derive(Serialize)]
struct ChatMessageReq {
  role: String,
  content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)]
  usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice {
  message: ChatMessageResp,
}
#[derive(Deserialize)]
struct ChatMessageResp {
  content: Option<String>,
}
#[derive(Deserialize)]
struct Usage {
  #[serde(default)]
  prompt_tokens: Option<u32>,
  #[serde(default)]
  completion_tokens: Option<u32>,
  #[serde(default)]
  total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap {
    error: EObj,
  }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
  }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
