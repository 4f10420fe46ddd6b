//! Expert agent port
//!
//! One [`ExpertAgent`] evaluates a proposal from a specialized viewpoint.
//! The orchestrator receives the panel as explicit constructor arguments;
//! there are no process-wide agent singletons. Any timeout/retry policy an
//! expert needs lives inside its implementation; the deliberation loop only
//! adds a fan-out-boundary timeout on top.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use ijma_domain::{Contribution, ExpertOpinion};
use thiserror::Error;

/// Errors that can occur during an expert consultation
#[derive(Error, Debug)]
pub enum ExpertError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Expert failed: {0}")]
    Failed(String),
}

/// A capability that evaluates a proposal from one domain viewpoint
#[async_trait]
pub trait ExpertAgent: Send + Sync {
    /// Stable agent name used to tag contributions (e.g. "shariah_compliance")
    fn name(&self) -> &str;

    /// Evaluate the current proposal given the prior discussion
    async fn consult(
        &self,
        proposal: &str,
        history: &[Contribution],
    ) -> Result<ExpertOpinion, ExpertError>;
}
