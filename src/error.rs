use thiserror::Error;

use crate::config::ConfigError;
use crate::llm::client::LLMError;

pub type Result<T> = std::result::Result<T, FortuneError>;

#[derive(Error, Debug)]
pub enum FortuneError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid hour block: {0} (expected 0-11)")]
    InvalidHour(u32),

    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FortuneError {
    /// True for the precondition failures that make a birth tuple unusable.
    pub fn is_invalid_birth_tuple(&self) -> bool {
        matches!(
            self,
            FortuneError::InvalidMonth(_)
                | FortuneError::InvalidHour(_)
                | FortuneError::InvalidDate { .. }
        )
    }
}
