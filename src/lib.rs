pub mod config;
pub mod error;
pub mod fortune;
pub mod llm;
pub mod speech;

pub use error::{FortuneError, Result};
pub use fortune::{FortuneReport, FortuneRequest};
