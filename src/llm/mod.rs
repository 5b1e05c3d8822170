pub mod client;
pub mod context;
pub mod integration;
pub mod prompts;

pub use client::*;
pub use context::*;
pub use integration::*;
pub use prompts::*;
