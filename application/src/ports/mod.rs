//! Ports (interfaces) for external collaborators

pub mod expert;
pub mod llm_gateway;
pub mod progress;
pub mod retrieval;

pub use expert::{ExpertAgent, ExpertError};
pub use llm_gateway::{GatewayError, LlmGateway};
pub use progress::{NoProgress, ProgressNotifier};
pub use retrieval::{PassageRetriever, RetrievalError};
