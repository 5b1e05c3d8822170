use secrecy::{ExposeSecret, SecretBox};
use std::env;
use thiserror::Error;

use crate::llm::client::DEFAULT_MODEL;

pub const API_KEY_VAR: &str = "GOOGLE_AI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No API key: set GOOGLE_AI_API_KEY or pass --api-key")]
    MissingApiKey,
    #[error("Invalid API key format: {0}")]
    InvalidKeyFormat(String),
}

/// Configuration for the text-generation service
#[derive(Debug)]
pub struct ApiConfig {
    env_key: Option<SecretBox<String>>,
    pub model: String,
}

impl ApiConfig {
    /// Load API configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (for development)
        dotenvy::dotenv().ok();

        let env_key = match env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => {
                Self::validate_key_format(&key)?;
                Some(SecretBox::new(Box::new(key.trim().to_string())))
            }
            _ => None,
        };

        let model = env::var(MODEL_VAR)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self { env_key, model })
    }

    /// Basic sanity checks on a key before it is sent anywhere
    fn validate_key_format(key: &str) -> Result<(), ConfigError> {
        let key = key.trim();
        if key.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidKeyFormat(
                "API key must not contain whitespace".to_string(),
            ));
        }
        // Google AI Studio keys start with "AIza"; proxies may hand out others.
        if !key.starts_with("AIza") {
            log::warn!("API key does not look like a Google AI key");
        }
        Ok(())
    }

    pub fn has_env_key(&self) -> bool {
        self.env_key.is_some()
    }

    /// The key to call the service with. The environment key wins; a key
    /// supplied by the caller is the fallback.
    pub fn resolve_key(&self, supplied: Option<&str>) -> Result<String, ConfigError> {
        if let Some(key) = &self.env_key {
            return Ok(key.expose_secret().clone());
        }
        match supplied.map(str::trim) {
            Some(key) if !key.is_empty() => {
                Self::validate_key_format(key)?;
                Ok(key.to_string())
            }
            _ => Err(ConfigError::MissingApiKey),
        }
    }
}

/// Load configuration with helpful error messages for development
pub fn load_config() -> Result<ApiConfig, ConfigError> {
    match ApiConfig::load() {
        Ok(config) => {
            log::info!(
                "Loaded configuration (model: {}, env key: {})",
                config.model,
                if config.has_env_key() { "yes" } else { "no" }
            );
            Ok(config)
        }
        Err(e) => {
            log::error!("Configuration error: {}", e);
            Err(e)
        }
    }
}
