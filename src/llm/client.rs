use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API key is invalid")]
    InvalidApiKey,
    #[error("Rate limited, try again later")]
    RateLimited,
    #[error("Response blocked by the safety filter")]
    SafetyBlocked,
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Response parsing error: {0}")]
    ParseError(String),
    #[error("Message must not be empty")]
    EmptyMessage,
}

impl LLMError {
    /// Map a failed HTTP exchange onto the error kinds callers act on.
    pub fn from_response(status: u16, body: &str) -> Self {
        if body.contains("API_KEY_INVALID") || body.contains("API key not valid") {
            LLMError::InvalidApiKey
        } else if status == 429
            || body.contains("RATE_LIMIT")
            || body.contains("RESOURCE_EXHAUSTED")
        {
            LLMError::RateLimited
        } else if body.contains("SAFETY") {
            LLMError::SafetyBlocked
        } else {
            LLMError::ApiError {
                status,
                message: body.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMConfig {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
    pub top_p: f32,
    pub timeout: Duration,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.9,
            max_output_tokens: Some(2048),
            top_p: 0.95,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.role == "system"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// Anything that can turn a conversation into a reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, messages: Vec<Message>) -> Result<String, LLMError>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    config: LLMConfig,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, LLMError> {
        Self::with_config(api_key, LLMConfig::default())
    }

    pub fn with_config(api_key: String, config: LLMConfig) -> Result<Self, LLMError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Client for the configured model. The key comes from
    /// [`ApiConfig::resolve_key`], so an environment key wins over `supplied_key`.
    pub fn from_config(config: &ApiConfig, supplied_key: Option<&str>) -> crate::Result<Self> {
        let api_key = config.resolve_key(supplied_key)?;
        let llm_config = LLMConfig {
            model: config.model.clone(),
            ..LLMConfig::default()
        };
        Ok(Self::with_config(api_key, llm_config)?)
    }

    /// Build the request body. System messages become the system
    /// instruction; assistant turns are sent with the `model` role.
    pub fn build_payload(&self, messages: &[Message]) -> Value {
        let system_text = messages
            .iter()
            .filter(|m| m.is_system())
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let contents: Vec<Value> = messages
            .iter()
            .filter(|m| !m.is_system())
            .map(|m| {
                let role = if m.role == "assistant" { "model" } else { "user" };
                json!({
                    "role": role,
                    "parts": [{ "text": m.content }]
                })
            })
            .collect();

        let mut generation_config = json!({
            "temperature": self.config.temperature,
            "topP": self.config.top_p,
        });
        if let Some(max) = self.config.max_output_tokens {
            generation_config["maxOutputTokens"] = json!(max);
        }

        let mut payload = json!({
            "contents": contents,
            "generationConfig": generation_config,
        });
        if !system_text.is_empty() {
            payload["systemInstruction"] = json!({ "parts": [{ "text": system_text }] });
        }
        payload
    }

    /// Generate a completion from messages
    pub async fn complete(&self, messages: &[Message]) -> Result<LLMResponse, LLMError> {
        let url = format!(
            "{}/models/{}:generateContent",
            DEFAULT_BASE_URL, self.config.model
        );
        let payload = self.build_payload(messages);
        log::debug!(
            "Sending {} message(s) to {}",
            messages.len(),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Gemini request failed with {}: {}", status, error_text);
            return Err(LLMError::from_response(status.as_u16(), &error_text));
        }

        let response_text = response.text().await?;
        parse_response(&response_text, &self.config.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, messages: Vec<Message>) -> Result<String, LLMError> {
        let response = self.complete(&messages).await?;
        if let Some(usage) = &response.usage {
            log::debug!(
                "{} used {} tokens ({} prompt, {} completion)",
                response.model,
                usage.total_tokens,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }
        Ok(response.content)
    }
}

/// Parse a `generateContent` response body.
pub fn parse_response(response_text: &str, default_model: &str) -> Result<LLMResponse, LLMError> {
    let json: Value = serde_json::from_str(response_text)
        .map_err(|e| LLMError::ParseError(format!("Invalid JSON: {}", e)))?;

    if json["promptFeedback"]["blockReason"].as_str().is_some() {
        return Err(LLMError::SafetyBlocked);
    }

    let candidates = json["candidates"]
        .as_array()
        .ok_or_else(|| LLMError::ParseError("Missing 'candidates' field".to_string()))?;

    let first = candidates
        .first()
        .ok_or_else(|| LLMError::ParseError("Empty candidates array".to_string()))?;

    let finish_reason = first["finishReason"].as_str().map(|s| s.to_string());

    let content: String = first["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if content.is_empty() {
        return match finish_reason.as_deref() {
            Some("SAFETY") => Err(LLMError::SafetyBlocked),
            _ => Err(LLMError::ParseError("Candidate has no text".to_string())),
        };
    }

    let usage = json.get("usageMetadata").map(|u| Usage {
        prompt_tokens: u["promptTokenCount"].as_u64().unwrap_or(0) as u32,
        completion_tokens: u["candidatesTokenCount"].as_u64().unwrap_or(0) as u32,
        total_tokens: u["totalTokenCount"].as_u64().unwrap_or(0) as u32,
    });

    let model = json["modelVersion"]
        .as_str()
        .unwrap_or(default_model)
        .to_string();

    Ok(LLMResponse {
        content,
        usage,
        model,
        finish_reason,
    })
}
