//! Default expert panel
//!
//! The standard five-domain panel. The orchestrator takes the panel as an
//! explicit constructor argument, so callers can build a subset or add
//! their own agents alongside these.

use super::llm_expert::{ExpertProfile, LlmExpert};
use ijma_application::ports::expert::ExpertAgent;
use ijma_application::ports::llm_gateway::LlmGateway;
use std::sync::Arc;

/// Profiles of the five standard expert domains
pub fn default_profiles() -> Vec<ExpertProfile> {
    vec![
        ExpertProfile::new(
            "shariah_compliance",
            "Shariah compliance of contract structures, prohibitions (riba, gharar), \
             and alignment with Shariah Standards",
        ),
        ExpertProfile::new(
            "financial_accounting",
            "recognition, measurement, and disclosure treatment under Islamic \
             financial accounting principles",
        ),
        ExpertProfile::new(
            "standards_consistency",
            "terminological and structural consistency with the rest of the \
             standards corpus and avoidance of cross-standard conflicts",
        ),
        ExpertProfile::new(
            "practicality",
            "operational implementability for Islamic financial institutions of \
             varying size and maturity",
        ),
        ExpertProfile::new(
            "risk_management",
            "credit, market, and operational risk implications of the proposed \
             treatment",
        ),
    ]
}

/// Build the full default panel over one gateway
pub fn default_panel<G: LlmGateway + 'static>(gateway: &Arc<G>) -> Vec<Arc<dyn ExpertAgent>> {
    default_profiles()
        .into_iter()
        .map(|profile| {
            Arc::new(LlmExpert::new(profile, Arc::clone(gateway))) as Arc<dyn ExpertAgent>
        })
        .collect()
}

/// Build a panel restricted to the named domains; unknown names are skipped
pub fn panel_from_names<G: LlmGateway + 'static>(
    gateway: &Arc<G>,
    names: &[String],
) -> Vec<Arc<dyn ExpertAgent>> {
    default_profiles()
        .into_iter()
        .filter(|profile| names.iter().any(|n| n == &profile.name))
        .map(|profile| {
            Arc::new(LlmExpert::new(profile, Arc::clone(gateway))) as Arc<dyn ExpertAgent>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ijma_application::ports::llm_gateway::GatewayError;

    struct NullGateway;

    #[async_trait]
    impl LlmGateway for NullGateway {
        async fn complete(&self, _s: &str, _p: &str) -> Result<String, GatewayError> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_default_panel_has_five_distinct_experts() {
        let gateway = Arc::new(NullGateway);
        let panel = default_panel(&gateway);
        assert_eq!(panel.len(), 5);

        let mut names: Vec<_> = panel.iter().map(|e| e.name().to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"shariah_compliance".to_string()));
    }

    #[test]
    fn test_panel_from_names_filters_and_skips_unknown() {
        let gateway = Arc::new(NullGateway);
        let panel = panel_from_names(
            &gateway,
            &[
                "risk_management".to_string(),
                "practicality".to_string(),
                "no_such_domain".to_string(),
            ],
        );
        assert_eq!(panel.len(), 2);
    }
}
