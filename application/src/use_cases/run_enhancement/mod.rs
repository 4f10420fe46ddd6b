//! Run Enhancement use case
//!
//! Orchestrates one full standards-enhancement run:
//! Review -> Proposal -> DeliberationLoop -> Validation -> optional
//! CrossImpact -> result assembly.
//!
//! Failure semantics: the initial review and proposal are load-bearing, so
//! unusable output there aborts the run with a failed result carrying a
//! context snapshot. Every later collaborator failure degrades into a
//! placeholder field and the run still reports completion.

mod deliberation;

use crate::config::DeliberationParams;
use crate::ports::expert::ExpertAgent;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::retrieval::PassageRetriever;
use deliberation::DeliberationLoop;
use ijma_domain::{
    EnhancementContext, EnhancementResult, Phase, PromptTemplate, ReviewResult, StandardId,
    TriggerScenario, parse_points,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Default number of passages requested from the retriever for the review stage
const DEFAULT_REVIEW_PASSAGES: usize = 5;

/// Input for the RunEnhancement use case
#[derive(Debug, Clone)]
pub struct RunEnhancementInput {
    /// Standard to enhance
    pub standard_id: StandardId,
    /// Scenario motivating the enhancement
    pub trigger_scenario: TriggerScenario,
    /// Whether to run the cross-standard impact stage after validation
    pub include_cross_standard_analysis: bool,
    /// Deliberation control parameters
    pub params: DeliberationParams,
    /// Number of passages the review stage requests from the retriever
    pub review_passages: usize,
}

impl RunEnhancementInput {
    pub fn new(
        standard_id: impl Into<StandardId>,
        trigger_scenario: impl Into<TriggerScenario>,
    ) -> Self {
        Self {
            standard_id: standard_id.into(),
            trigger_scenario: trigger_scenario.into(),
            include_cross_standard_analysis: false,
            params: DeliberationParams::default(),
            review_passages: DEFAULT_REVIEW_PASSAGES,
        }
    }

    pub fn with_cross_standard_analysis(mut self) -> Self {
        self.include_cross_standard_analysis = true;
        self
    }

    pub fn with_params(mut self, params: DeliberationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_review_passages(mut self, review_passages: usize) -> Self {
        self.review_passages = review_passages.max(1);
        self
    }
}

/// Use case for running a standards-enhancement deliberation
pub struct RunEnhancementUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    retriever: Arc<dyn PassageRetriever>,
    experts: Vec<Arc<dyn ExpertAgent>>,
}

impl<G: LlmGateway + 'static> RunEnhancementUseCase<G> {
    /// Create the use case with its collaborators injected explicitly
    pub fn new(
        gateway: Arc<G>,
        retriever: Arc<dyn PassageRetriever>,
        experts: Vec<Arc<dyn ExpertAgent>>,
    ) -> Self {
        Self {
            gateway,
            retriever,
            experts,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunEnhancementInput) -> EnhancementResult {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunEnhancementInput,
        progress: &dyn ProgressNotifier,
    ) -> EnhancementResult {
        let mut context =
            EnhancementContext::new(input.standard_id.clone(), input.trigger_scenario.clone());

        info!(
            "Starting enhancement run for standard {} with {} experts",
            input.standard_id,
            self.experts.len()
        );

        // Phase 1: Review
        progress.on_phase_start(
            &Phase::Review,
            &format!("Reviewing standard {}", input.standard_id),
        );
        let review = self.review(&input).await;
        if !review.is_usable() {
            return EnhancementResult::failed(
                &context,
                "Review produced no usable analysis or context",
            );
        }
        context.record_review(&review);
        progress.on_phase_complete(
            &Phase::Review,
            &format!(
                "{} candidate enhancement areas identified",
                review.enhancement_areas.len()
            ),
        );

        // Phase 2: Initial proposal (fatal on failure or empty output)
        progress.on_phase_start(&Phase::Proposal, "Drafting initial proposal");
        let proposal = match self.propose_initial(&input, &review).await {
            Ok(text) => text,
            Err(e) => {
                return EnhancementResult::failed(
                    &context,
                    format!("Initial proposal generation failed: {}", e),
                );
            }
        };
        if let Err(e) = context.set_initial_proposal(proposal) {
            return EnhancementResult::failed(
                &context,
                format!("Initial proposal generation failed: {}", e),
            );
        }
        progress.on_phase_complete(&Phase::Proposal, "Initial proposal drafted");

        // Phase 3: Deliberation
        progress.on_phase_start(
            &Phase::Deliberation,
            &format!(
                "{} experts, up to {} rounds",
                self.experts.len(),
                input.params.max_rounds
            ),
        );
        let looper = DeliberationLoop::new(Arc::clone(&self.gateway), &self.experts, &input.params);
        let outcome = looper.run(&mut context, progress).await;
        progress.on_phase_complete(&Phase::Deliberation, &outcome.to_string());

        // Phase 4: Validation (degrades, never aborts)
        progress.on_phase_start(&Phase::Validation, "Validating final proposal");
        let validation_summary = match self.validate(&input, &context).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Validation stage failed: {}", e);
                format!("Validation failed: {}", e)
            }
        };
        progress.on_phase_complete(&Phase::Validation, "Validation recorded");

        // Phase 5: Cross-standard impact (optional; degrades, never aborts)
        let cross_standard_analysis = if input.include_cross_standard_analysis {
            progress.on_phase_start(&Phase::CrossImpact, "Analyzing cross-standard impact");
            let analysis = match self.cross_impact(&input, &context).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    warn!("Cross-impact stage failed: {}", e);
                    format!("Cross-standard analysis failed: {}", e)
                }
            };
            progress.on_phase_complete(&Phase::CrossImpact, "Cross-standard analysis recorded");
            Some(analysis)
        } else {
            None
        };

        EnhancementResult::completed(&context, outcome, validation_summary, cross_standard_analysis)
    }

    /// Review stage: retrieve context and produce the initial analysis.
    ///
    /// Fails softly. Retrieval failure yields empty context; model failure
    /// yields a diagnostic analysis. Only a doubly-empty result is treated
    /// as fatal, by the caller.
    async fn review(&self, input: &RunEnhancementInput) -> ReviewResult {
        let query = format!("FAS {} {}", input.standard_id, input.trigger_scenario);

        let retrieved_context = match self.retriever.retrieve(&query, input.review_passages).await {
            Ok(passages) => passages.join("\n\n"),
            Err(e) => {
                warn!("Passage retrieval failed, continuing without context: {}", e);
                String::new()
            }
        };

        let prompt = PromptTemplate::review_prompt(
            input.standard_id.as_str(),
            input.trigger_scenario.content(),
            &retrieved_context,
        );

        match self
            .gateway
            .complete(PromptTemplate::review_system(), &prompt)
            .await
        {
            Ok(analysis) => {
                let enhancement_areas = parse_points(&analysis);
                ReviewResult::new(analysis, enhancement_areas, retrieved_context)
            }
            Err(e) => {
                warn!("Review analysis failed: {}", e);
                ReviewResult::new(
                    format!("Review analysis unavailable: {}", e),
                    Vec::new(),
                    retrieved_context,
                )
            }
        }
    }

    /// Proposal stage, first call: produce the initial structured proposal
    async fn propose_initial(
        &self,
        input: &RunEnhancementInput,
        review: &ReviewResult,
    ) -> Result<String, GatewayError> {
        let prompt = PromptTemplate::initial_proposal_prompt(
            input.standard_id.as_str(),
            input.trigger_scenario.content(),
            &review.retrieved_context,
            &review.analysis,
            &review.enhancement_areas,
        );
        self.gateway
            .complete(PromptTemplate::proposal_system(), &prompt)
            .await
    }

    /// Validation stage: single-shot check of the final proposal
    async fn validate(
        &self,
        input: &RunEnhancementInput,
        context: &EnhancementContext,
    ) -> Result<String, GatewayError> {
        let prompt = PromptTemplate::validation_prompt(
            input.standard_id.as_str(),
            input.trigger_scenario.content(),
            context.current_proposal(),
        );
        self.gateway
            .complete(PromptTemplate::validation_system(), &prompt)
            .await
    }

    /// Cross-standard impact stage: single-shot, optional
    async fn cross_impact(
        &self,
        input: &RunEnhancementInput,
        context: &EnhancementContext,
    ) -> Result<String, GatewayError> {
        let prompt = PromptTemplate::cross_impact_prompt(
            input.standard_id.as_str(),
            context.current_proposal(),
        );
        self.gateway
            .complete(PromptTemplate::cross_impact_system(), &prompt)
            .await
    }
}
