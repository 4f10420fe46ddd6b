//! LLM-backed expert agent
//!
//! Adapts the [`LlmGateway`] port into one [`ExpertAgent`]: builds the
//! expert prompt, runs the completion, and parses the free-text response
//! into a structured opinion. Parsing is best-effort; an unstructured
//! response degrades to an analysis-only opinion rather than an error.

use async_trait::async_trait;
use ijma_application::ports::expert::{ExpertAgent, ExpertError};
use ijma_application::ports::llm_gateway::LlmGateway;
use ijma_domain::{Contribution, ExpertOpinion, PromptTemplate, parse_opinion};
use std::sync::Arc;

/// Identity and viewpoint of one domain expert
#[derive(Debug, Clone)]
pub struct ExpertProfile {
    /// Stable agent name used to tag contributions
    pub name: String,
    /// One-line description of the expert's evaluation perspective
    pub perspective: String,
}

impl ExpertProfile {
    pub fn new(name: impl Into<String>, perspective: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            perspective: perspective.into(),
        }
    }
}

/// [`ExpertAgent`] implementation backed by a language model
pub struct LlmExpert<G> {
    profile: ExpertProfile,
    system_prompt: String,
    gateway: Arc<G>,
}

impl<G: LlmGateway> LlmExpert<G> {
    pub fn new(profile: ExpertProfile, gateway: Arc<G>) -> Self {
        let system_prompt = PromptTemplate::expert_system(&profile.perspective);
        Self {
            profile,
            system_prompt,
            gateway,
        }
    }
}

#[async_trait]
impl<G: LlmGateway> ExpertAgent for LlmExpert<G> {
    fn name(&self) -> &str {
        &self.profile.name
    }

    async fn consult(
        &self,
        proposal: &str,
        history: &[Contribution],
    ) -> Result<ExpertOpinion, ExpertError> {
        let prompt = PromptTemplate::expert_prompt(proposal, history);
        let response = self.gateway.complete(&self.system_prompt, &prompt).await?;
        Ok(parse_opinion(&self.profile.name, &response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ijma_application::ports::llm_gateway::GatewayError;

    struct CannedGateway(String);

    #[async_trait]
    impl LlmGateway for CannedGateway {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, GatewayError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_structured_response_is_parsed() {
        let response = "Looks workable.\n\nCONCERNS:\n- Custody undefined\n\nRECOMMENDATIONS:\n- Add custody clause\n";
        let expert = LlmExpert::new(
            ExpertProfile::new("shariah_compliance", "Shariah compliance of contract structures"),
            Arc::new(CannedGateway(response.to_string())),
        );

        let opinion = expert.consult("Proposal", &[]).await.unwrap();
        assert_eq!(opinion.concerns.len(), 1);
        assert_eq!(opinion.concerns[0].domain, "shariah_compliance");
        assert_eq!(opinion.recommendations.len(), 1);
    }

    #[tokio::test]
    async fn test_unstructured_response_degrades_to_analysis() {
        let expert = LlmExpert::new(
            ExpertProfile::new("practicality", "operational practicality"),
            Arc::new(CannedGateway("No issues from my side.".to_string())),
        );

        let opinion = expert.consult("Proposal", &[]).await.unwrap();
        assert_eq!(opinion.analysis, "No issues from my side.");
        assert!(opinion.concerns.is_empty());
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        struct Failing;

        #[async_trait]
        impl LlmGateway for Failing {
            async fn complete(&self, _s: &str, _p: &str) -> Result<String, GatewayError> {
                Err(GatewayError::Timeout)
            }
        }

        let expert = LlmExpert::new(
            ExpertProfile::new("risk_management", "risk"),
            Arc::new(Failing),
        );
        let result = expert.consult("Proposal", &[]).await;
        assert!(matches!(result, Err(ExpertError::Gateway(GatewayError::Timeout))));
    }
}
