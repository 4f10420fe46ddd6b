//! Application layer for ijma
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DeliberationParams;
pub use ports::{
    expert::{ExpertAgent, ExpertError},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    retrieval::{PassageRetriever, RetrievalError},
};
pub use use_cases::run_enhancement::{RunEnhancementInput, RunEnhancementUseCase};
