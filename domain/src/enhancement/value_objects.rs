//! Enhancement value objects - stage outputs and the final run result

use crate::core::{StandardId, TriggerScenario};
use crate::deliberation::{ConsensusMetrics, Contribution, Point};
use crate::enhancement::context::EnhancementContext;
use crate::enhancement::entities::{LoopOutcome, RunStatus};
use serde::{Deserialize, Serialize};

/// Output of the review stage
///
/// The review stage fails softly: on retrieval or model failure it still
/// returns a record with an empty context and a diagnostic analysis. A
/// review is only unusable when both fields came back empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    /// Initial analysis of the standard against the trigger scenario
    pub analysis: String,
    /// Candidate enhancement areas extracted from the analysis
    pub enhancement_areas: Vec<String>,
    /// Passages retrieved for the standard, concatenated
    pub retrieved_context: String,
}

impl ReviewResult {
    pub fn new(
        analysis: impl Into<String>,
        enhancement_areas: Vec<String>,
        retrieved_context: impl Into<String>,
    ) -> Self {
        Self {
            analysis: analysis.into(),
            enhancement_areas,
            retrieved_context: retrieved_context.into(),
        }
    }

    /// Diagnostic record produced when review itself failed
    pub fn degraded(diagnostic: impl Into<String>) -> Self {
        Self {
            analysis: diagnostic.into(),
            enhancement_areas: Vec::new(),
            retrieved_context: String::new(),
        }
    }

    /// Both analysis and context empty means the orchestrator must abort
    pub fn is_usable(&self) -> bool {
        !(self.analysis.trim().is_empty() && self.retrieved_context.trim().is_empty())
    }
}

/// Complete result of an enhancement run
///
/// Always present, whether the run completed or failed. A completed run's
/// proposal may still carry unresolved concerns; they stay visible in
/// `accumulated_concerns` and `final_unresolved_points`.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancementResult {
    pub standard_id: StandardId,
    pub trigger_scenario: TriggerScenario,
    pub status: RunStatus,
    /// Best proposal produced so far (final on success)
    pub proposal_text: String,
    /// Full audit trail of expert contributions and error placeholders
    pub discussion_history: Vec<Contribution>,
    /// One metrics record per round that had at least one valid contribution
    pub consensus_metrics_per_round: Vec<ConsensusMetrics>,
    pub accumulated_concerns: Vec<Point>,
    pub accumulated_recommendations: Vec<Point>,
    /// Open points (unresolved + disputed) from the last scored round
    pub final_unresolved_points: Vec<String>,
    /// Rounds actually executed
    pub rounds_completed: usize,
    /// Terminal state of the deliberation loop, if it was entered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_outcome: Option<LoopOutcome>,
    pub validation_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_standard_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Snapshot of the context at failure time, for diagnosis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_snapshot: Option<EnhancementContext>,
}

impl EnhancementResult {
    /// Assemble a completed result from the run's context
    pub fn completed(
        context: &EnhancementContext,
        outcome: LoopOutcome,
        validation_summary: impl Into<String>,
        cross_standard_analysis: Option<String>,
    ) -> Self {
        let final_unresolved_points = context
            .latest_metrics()
            .map(|m| m.open_points().cloned().collect())
            .unwrap_or_default();

        Self {
            standard_id: context.standard_id().clone(),
            trigger_scenario: context.trigger_scenario().clone(),
            status: RunStatus::Completed,
            proposal_text: context.current_proposal().to_string(),
            discussion_history: context.discussion_history().to_vec(),
            consensus_metrics_per_round: context.metrics_history().to_vec(),
            accumulated_concerns: context.accumulated_concerns().to_vec(),
            accumulated_recommendations: context.accumulated_recommendations().to_vec(),
            final_unresolved_points,
            rounds_completed: context.current_round(),
            loop_outcome: Some(outcome),
            validation_summary: validation_summary.into(),
            cross_standard_analysis,
            error: None,
            context_snapshot: None,
        }
    }

    /// Assemble a failed result carrying a snapshot of the context so far
    pub fn failed(context: &EnhancementContext, error: impl Into<String>) -> Self {
        Self {
            standard_id: context.standard_id().clone(),
            trigger_scenario: context.trigger_scenario().clone(),
            status: RunStatus::Failed,
            proposal_text: context.current_proposal().to_string(),
            discussion_history: context.discussion_history().to_vec(),
            consensus_metrics_per_round: context.metrics_history().to_vec(),
            accumulated_concerns: context.accumulated_concerns().to_vec(),
            accumulated_recommendations: context.accumulated_recommendations().to_vec(),
            final_unresolved_points: Vec::new(),
            rounds_completed: context.current_round(),
            loop_outcome: None,
            validation_summary: String::new(),
            cross_standard_analysis: None,
            error: Some(error.into()),
            context_snapshot: Some(context.clone()),
        }
    }

    /// Agreement score of the last scored round, if any round was scored
    pub fn final_agreement_score(&self) -> Option<f64> {
        self.consensus_metrics_per_round
            .last()
            .map(|m| m.agreement_score)
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::ConsensusEvaluator;
    use crate::deliberation::ExpertOpinion;

    fn context_with_proposal() -> EnhancementContext {
        let mut ctx = EnhancementContext::new(
            StandardId::new("28"),
            TriggerScenario::new("Deferred payment murabaha via platform"),
        );
        ctx.set_initial_proposal("Initial proposal").unwrap();
        ctx
    }

    #[test]
    fn test_review_usability() {
        assert!(ReviewResult::new("analysis", vec![], "").is_usable());
        assert!(ReviewResult::new("", vec![], "context").is_usable());
        assert!(!ReviewResult::new("  ", vec![], "").is_usable());
        assert!(ReviewResult::degraded("retrieval failed: timeout").is_usable());
    }

    #[test]
    fn test_completed_result_carries_open_points() {
        let mut ctx = context_with_proposal();
        let round = ctx.begin_round();

        let a = ExpertOpinion::new("").with_concerns(vec![
            Point::new("x", "Shared concern"),
            Point::new("x", "Solo concern"),
        ]);
        let b = ExpertOpinion::new("").with_concerns(vec![Point::new("y", "Shared concern")]);
        ctx.append_contribution(Contribution::success("x", round, a.clone()));
        ctx.append_contribution(Contribution::success("y", round, b.clone()));

        let metrics = ConsensusEvaluator::default().score(round, &[&a, &b], 2);
        ctx.record_metrics(metrics);

        let result = EnhancementResult::completed(
            &ctx,
            LoopOutcome::MaxRoundsReached,
            "Validation passed",
            None,
        );

        assert!(result.is_completed());
        assert_eq!(result.rounds_completed, 1);
        assert!(result.final_unresolved_points.contains(&"Solo concern".to_string()));
        assert!(result.final_agreement_score().is_some());
        assert!(result.context_snapshot.is_none());
    }

    #[test]
    fn test_failed_result_carries_snapshot() {
        let ctx = EnhancementContext::new(
            StandardId::new("4"),
            TriggerScenario::new("scenario"),
        );
        let result = EnhancementResult::failed(&ctx, "Initial proposal generation failed");

        assert!(!result.is_completed());
        assert_eq!(result.error.as_deref(), Some("Initial proposal generation failed"));
        assert!(result.context_snapshot.is_some());
        assert_eq!(result.rounds_completed, 0);
    }

    #[test]
    fn test_status_serializes_as_string() {
        let ctx = context_with_proposal();
        let result =
            EnhancementResult::completed(&ctx, LoopOutcome::Skipped, "not validated", None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["proposal_text"], "Initial proposal");
    }
}
