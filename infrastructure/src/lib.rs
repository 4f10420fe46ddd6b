//! Infrastructure layer for ijma
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod experts;
pub mod gateway;
pub mod retrieval;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use experts::{ExpertProfile, LlmExpert, default_panel, default_profiles, panel_from_names};
pub use gateway::{OpenAiChatGateway, RetryingGateway};
pub use retrieval::FileCorpusRetriever;
