//! Prompt templates for the enhancement flow

use crate::deliberation::{Contribution, Point};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the review stage
    pub fn review_system() -> &'static str {
        r#"You are a senior reviewer of Islamic finance accounting standards.
Your task is to analyze a standard against a triggering scenario and identify
where the standard falls short. Ground your analysis in the provided excerpts.
Be specific: cite clauses where possible and keep each finding self-contained."#
    }

    /// User prompt for the review stage
    pub fn review_prompt(standard_id: &str, trigger_scenario: &str, retrieved_context: &str) -> String {
        let mut prompt = format!(
            r#"Standard under review: FAS {}

Trigger scenario:
{}
"#,
            standard_id, trigger_scenario
        );

        if !retrieved_context.trim().is_empty() {
            prompt.push_str(&format!(
                "\nRelevant excerpts from the standard:\n{}\n",
                retrieved_context
            ));
        }

        prompt.push_str(
            r#"
Provide:
1. An analysis of how well the standard covers the scenario (2-4 paragraphs)
2. Under a header "ENHANCEMENT AREAS:", a bullet list of candidate areas to amend"#,
        );

        prompt
    }

    /// System prompt for proposal generation and refinement
    pub fn proposal_system() -> &'static str {
        r#"You are a standards drafter for Islamic finance regulation.
Your task is to draft precise amendment text for an accounting standard.
Structure proposals with numbered clauses, keep existing terminology, and
mark every addition or modification explicitly. Never remove Shariah
requirements. Output only the proposal text."#
    }

    /// User prompt for the initial proposal
    pub fn initial_proposal_prompt(
        standard_id: &str,
        trigger_scenario: &str,
        retrieved_context: &str,
        analysis: &str,
        enhancement_areas: &[String],
    ) -> String {
        let mut prompt = format!(
            r#"Draft an enhancement proposal for FAS {}.

Trigger scenario:
{}

Reviewer analysis:
{}
"#,
            standard_id, trigger_scenario, analysis
        );

        if !enhancement_areas.is_empty() {
            prompt.push_str("\nCandidate enhancement areas:\n");
            for area in enhancement_areas {
                prompt.push_str(&format!("- {}\n", area));
            }
        }

        if !retrieved_context.trim().is_empty() {
            prompt.push_str(&format!("\nStandard excerpts:\n{}\n", retrieved_context));
        }

        prompt.push_str(
            "\nProduce a structured proposal with: scope of the amendment, \
proposed clause text, and rationale for each change.",
        );

        prompt
    }

    /// User prompt for a refinement call during deliberation
    pub fn refinement_prompt(
        current_proposal: &str,
        concerns: &[Point],
        recommendations: &[Point],
    ) -> String {
        let mut prompt = format!(
            r#"Current proposal:
{}

The expert panel raised the following points this round.
"#,
            current_proposal
        );

        if !concerns.is_empty() {
            prompt.push_str("\nConcerns:\n");
            for point in concerns {
                prompt.push_str(&format!("- [{}] {}\n", point.domain, point.description));
            }
        }

        if !recommendations.is_empty() {
            prompt.push_str("\nRecommendations:\n");
            for point in recommendations {
                prompt.push_str(&format!("- [{}] {}\n", point.domain, point.description));
            }
        }

        prompt.push_str(
            "\nRevise the proposal to address these points. Keep everything \
that was not challenged. If no revision is warranted, return the proposal unchanged.",
        );

        prompt
    }

    /// System prompt for a domain expert, parameterized by perspective
    pub fn expert_system(perspective: &str) -> String {
        format!(
            r#"You are a domain expert evaluating a proposed amendment to an
Islamic finance accounting standard. Your perspective: {}.

Respond with:
1. A short free-text analysis from your perspective
2. A "CONCERNS:" section with a bullet list of specific objections (empty if none)
3. A "RECOMMENDATIONS:" section with a bullet list of concrete improvements

Keep each bullet to one sentence so positions can be compared across experts."#,
            perspective
        )
    }

    /// User prompt for one expert consultation
    pub fn expert_prompt(proposal: &str, history: &[Contribution]) -> String {
        let mut prompt = format!(
            r#"Proposed amendment under discussion:
{}
"#,
            proposal
        );

        let prior: Vec<_> = history.iter().filter(|c| c.is_valid()).collect();
        if !prior.is_empty() {
            prompt.push_str("\nPrior discussion:\n");
            for contribution in prior {
                prompt.push_str(&format!(
                    "\n--- Round {} / {} ---\n{}\n",
                    contribution.round, contribution.agent_name, contribution.content.analysis
                ));
            }
        }

        prompt.push_str("\nEvaluate the proposal from your perspective.");
        prompt
    }

    /// System prompt for the validation stage
    pub fn validation_system() -> &'static str {
        r#"You are a final validator of standard amendment proposals.
Check the proposal for internal consistency, Shariah compliance, and
completeness against the scenario it was drafted for. Summarize your
verdict and list any residual gaps."#
    }

    /// User prompt for the validation stage
    pub fn validation_prompt(standard_id: &str, trigger_scenario: &str, proposal: &str) -> String {
        format!(
            r#"Standard: FAS {}

Original trigger scenario:
{}

Final proposal:
{}

Provide a validation summary: verdict, strengths, and residual gaps."#,
            standard_id, trigger_scenario, proposal
        )
    }

    /// System prompt for the cross-standard impact stage
    pub fn cross_impact_system() -> &'static str {
        r#"You are an analyst of the interactions between Islamic finance
accounting standards. Given an amendment to one standard, identify which
other standards are affected and how, and flag any conflicts the amendment
would introduce."#
    }

    /// User prompt for the cross-standard impact stage
    pub fn cross_impact_prompt(standard_id: &str, proposal: &str) -> String {
        format!(
            r#"The following amendment is proposed for FAS {}:

{}

Identify affected standards, the nature of each impact, and any conflicts."#,
            standard_id, proposal
        )
    }
}
