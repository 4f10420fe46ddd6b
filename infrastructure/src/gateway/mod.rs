//! LLM gateway adapters

pub mod openai;
pub mod retry;

pub use openai::OpenAiChatGateway;
pub use retry::{RetryingGateway, with_backoff};
