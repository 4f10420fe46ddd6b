//! LLM Gateway port
//!
//! Defines the interface for single-shot language-model completions. The
//! orchestrator treats the model as opaque: prompt in, text out, may fail.
//! Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying with backoff is worthwhile
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited(_) | GatewayError::Timeout | GatewayError::ConnectionError(_)
        )
    }
}

/// Gateway for LLM completions
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Run one completion with a system prompt and a user prompt
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, GatewayError>;
}
