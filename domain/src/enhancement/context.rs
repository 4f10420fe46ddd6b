//! Enhancement run context
//!
//! [`EnhancementContext`] is the single mutable record threaded through one
//! enhancement run. It is owned exclusively by one orchestrator run: the
//! parallel expert calls only ever see snapshots, and all writes happen on
//! the sequential loop. The API keeps the audit-trail fields append-only.

use crate::core::{DomainError, StandardId, TriggerScenario};
use crate::deliberation::{ConsensusMetrics, Contribution, ExpertOpinion, Point};
use crate::enhancement::value_objects::ReviewResult;
use serde::Serialize;

/// Mutable state of one enhancement run
#[derive(Debug, Clone, Serialize)]
pub struct EnhancementContext {
    standard_id: StandardId,
    trigger_scenario: TriggerScenario,
    reviewer_retrieved_context: String,
    initial_reviewer_analysis: String,
    initial_proposal_text: String,
    current_proposal_text: String,
    accumulated_concerns: Vec<Point>,
    accumulated_recommendations: Vec<Point>,
    discussion_history: Vec<Contribution>,
    current_round: usize,
    consensus_metrics_history: Vec<ConsensusMetrics>,
}

impl EnhancementContext {
    pub fn new(standard_id: StandardId, trigger_scenario: TriggerScenario) -> Self {
        Self {
            standard_id,
            trigger_scenario,
            reviewer_retrieved_context: String::new(),
            initial_reviewer_analysis: String::new(),
            initial_proposal_text: String::new(),
            current_proposal_text: String::new(),
            accumulated_concerns: Vec::new(),
            accumulated_recommendations: Vec::new(),
            discussion_history: Vec::new(),
            current_round: 0,
            consensus_metrics_history: Vec::new(),
        }
    }

    // ==================== Inputs ====================

    pub fn standard_id(&self) -> &StandardId {
        &self.standard_id
    }

    pub fn trigger_scenario(&self) -> &TriggerScenario {
        &self.trigger_scenario
    }

    // ==================== Review ====================

    /// Record the review stage output (set once)
    pub fn record_review(&mut self, review: &ReviewResult) {
        self.reviewer_retrieved_context = review.retrieved_context.clone();
        self.initial_reviewer_analysis = review.analysis.clone();
    }

    pub fn retrieved_context(&self) -> &str {
        &self.reviewer_retrieved_context
    }

    pub fn reviewer_analysis(&self) -> &str {
        &self.initial_reviewer_analysis
    }

    // ==================== Proposal ====================

    /// Record the initial proposal. Write-once; empty text is an error
    /// because the run must abort before entering the loop.
    pub fn set_initial_proposal(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyProposal);
        }
        if !self.initial_proposal_text.is_empty() {
            return Err(DomainError::ProposalAlreadySet);
        }
        self.initial_proposal_text = text.clone();
        self.current_proposal_text = text;
        Ok(())
    }

    /// Apply a refinement result to the working proposal.
    ///
    /// Empty or byte-identical text counts as "no change" and is dropped.
    /// Returns whether the proposal actually changed.
    pub fn apply_refinement(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || text == self.current_proposal_text {
            return false;
        }
        self.current_proposal_text = text.to_string();
        true
    }

    pub fn initial_proposal(&self) -> &str {
        &self.initial_proposal_text
    }

    pub fn current_proposal(&self) -> &str {
        &self.current_proposal_text
    }

    // ==================== Rounds ====================

    /// Start the next deliberation round and return its number (1-indexed)
    pub fn begin_round(&mut self) -> usize {
        self.current_round += 1;
        self.current_round
    }

    /// Number of rounds executed so far
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    // ==================== Audit trail (append-only) ====================

    /// Append one contribution record (success or error placeholder)
    pub fn append_contribution(&mut self, contribution: Contribution) {
        debug_assert!(contribution.round <= self.current_round);
        self.discussion_history.push(contribution);
    }

    pub fn discussion_history(&self) -> &[Contribution] {
        &self.discussion_history
    }

    /// Valid opinions across the full accumulated history
    pub fn valid_opinions(&self) -> Vec<&ExpertOpinion> {
        self.discussion_history
            .iter()
            .filter(|c| c.is_valid())
            .map(|c| &c.content)
            .collect()
    }

    /// Valid opinions for one specific round
    pub fn round_opinions(&self, round: usize) -> Vec<&ExpertOpinion> {
        self.discussion_history
            .iter()
            .filter(|c| c.round == round && c.is_valid())
            .map(|c| &c.content)
            .collect()
    }

    /// Append this round's points to the accumulated lists
    pub fn accumulate_points(&mut self, concerns: Vec<Point>, recommendations: Vec<Point>) {
        self.accumulated_concerns.extend(concerns);
        self.accumulated_recommendations.extend(recommendations);
    }

    pub fn accumulated_concerns(&self) -> &[Point] {
        &self.accumulated_concerns
    }

    pub fn accumulated_recommendations(&self) -> &[Point] {
        &self.accumulated_recommendations
    }

    /// Record the consensus metrics of a scored round
    pub fn record_metrics(&mut self, metrics: ConsensusMetrics) {
        self.consensus_metrics_history.push(metrics);
    }

    pub fn metrics_history(&self) -> &[ConsensusMetrics] {
        &self.consensus_metrics_history
    }

    /// Metrics of the most recently scored round, if any
    pub fn latest_metrics(&self) -> Option<&ConsensusMetrics> {
        self.consensus_metrics_history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::ConsensusEvaluator;

    fn context() -> EnhancementContext {
        EnhancementContext::new(
            StandardId::new("10"),
            TriggerScenario::new("Digital asset collateral"),
        )
    }

    #[test]
    fn test_initial_proposal_write_once() {
        let mut ctx = context();
        ctx.set_initial_proposal("Proposal v1").unwrap();
        assert_eq!(ctx.initial_proposal(), "Proposal v1");
        assert_eq!(ctx.current_proposal(), "Proposal v1");

        let err = ctx.set_initial_proposal("Proposal v2").unwrap_err();
        assert!(matches!(err, DomainError::ProposalAlreadySet));
    }

    #[test]
    fn test_empty_initial_proposal_rejected() {
        let mut ctx = context();
        let err = ctx.set_initial_proposal("   ").unwrap_err();
        assert!(matches!(err, DomainError::EmptyProposal));
    }

    #[test]
    fn test_refinement_noop_on_identical_text() {
        let mut ctx = context();
        ctx.set_initial_proposal("Proposal v1").unwrap();

        assert!(!ctx.apply_refinement("Proposal v1"));
        assert!(!ctx.apply_refinement(""));
        assert_eq!(ctx.current_proposal(), "Proposal v1");

        assert!(ctx.apply_refinement("Proposal v2"));
        assert_eq!(ctx.current_proposal(), "Proposal v2");
        assert_eq!(ctx.initial_proposal(), "Proposal v1");
    }

    #[test]
    fn test_round_counting_and_history() {
        let mut ctx = context();
        let round = ctx.begin_round();
        assert_eq!(round, 1);

        ctx.append_contribution(Contribution::success(
            "risk_management",
            round,
            ExpertOpinion::new("fine"),
        ));
        ctx.append_contribution(Contribution::failure("practicality", round, "timeout"));

        assert_eq!(ctx.discussion_history().len(), 2);
        assert_eq!(ctx.valid_opinions().len(), 1);
        assert_eq!(ctx.round_opinions(1).len(), 1);
        assert!(ctx.round_opinions(2).is_empty());
        assert!(
            ctx.discussion_history()
                .iter()
                .all(|c| c.round <= ctx.current_round())
        );
    }

    #[test]
    fn test_accumulated_points_grow() {
        let mut ctx = context();
        ctx.accumulate_points(vec![Point::new("a", "c1")], vec![Point::new("a", "r1")]);
        ctx.accumulate_points(vec![Point::new("b", "c2")], vec![]);

        assert_eq!(ctx.accumulated_concerns().len(), 2);
        assert_eq!(ctx.accumulated_recommendations().len(), 1);
    }

    #[test]
    fn test_metrics_history() {
        let mut ctx = context();
        assert!(ctx.latest_metrics().is_none());

        let opinion = ExpertOpinion::new("");
        let metrics = ConsensusEvaluator::default().score(1, &[&opinion], 3);
        ctx.record_metrics(metrics);

        assert_eq!(ctx.metrics_history().len(), 1);
        assert_eq!(ctx.latest_metrics().unwrap().round, 1);
    }

    #[test]
    fn test_record_review() {
        let mut ctx = context();
        let review = ReviewResult::new(
            "The standard lacks custody guidance.",
            vec!["custody".to_string()],
            "FAS 10 excerpt...",
        );
        ctx.record_review(&review);

        assert_eq!(ctx.retrieved_context(), "FAS 10 excerpt...");
        assert!(ctx.reviewer_analysis().contains("custody"));
    }
}
