//! Deliberation loop
//!
//! Drives successive rounds of expert fan-out, consensus scoring, and
//! proposal refinement. Per round: collect every expert's opinion in
//! parallel (gather-all, no early exit), append all records to the audit
//! trail, score the round if anything valid came back, then either stop on
//! consensus or call the proposal stage in refinement mode. Rounds are
//! strictly sequential; all context writes happen here after the gather.

use crate::config::DeliberationParams;
use crate::ports::expert::ExpertAgent;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use ijma_domain::{
    ConsensusEvaluator, Contribution, EnhancementContext, LoopOutcome, Point, PromptTemplate,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub(crate) struct DeliberationLoop<'a, G: LlmGateway + 'static> {
    gateway: Arc<G>,
    experts: &'a [Arc<dyn ExpertAgent>],
    evaluator: ConsensusEvaluator,
    params: &'a DeliberationParams,
}

impl<'a, G: LlmGateway + 'static> DeliberationLoop<'a, G> {
    pub fn new(
        gateway: Arc<G>,
        experts: &'a [Arc<dyn ExpertAgent>],
        params: &'a DeliberationParams,
    ) -> Self {
        Self {
            gateway,
            experts,
            evaluator: ConsensusEvaluator::new(params.consensus_threshold),
            params,
        }
    }

    /// Run the loop to a terminal state, mutating `context` as the single writer
    pub async fn run(
        &self,
        context: &mut EnhancementContext,
        progress: &dyn ProgressNotifier,
    ) -> LoopOutcome {
        if self.experts.is_empty() || self.params.max_rounds == 0 {
            info!("Deliberation skipped: no experts or zero round budget");
            return LoopOutcome::Skipped;
        }

        for _ in 0..self.params.max_rounds {
            let round = context.begin_round();
            info!("Starting deliberation round {}/{}", round, self.params.max_rounds);
            progress.on_round_start(round, self.params.max_rounds);

            // COLLECTING: fan out to every expert, gather all results
            let contributions = self.collect_round(round, context, progress).await;

            let mut round_concerns: Vec<Point> = Vec::new();
            let mut round_recommendations: Vec<Point> = Vec::new();

            for contribution in contributions {
                if contribution.is_valid() {
                    round_concerns.extend(contribution.content.concerns.iter().cloned());
                    round_recommendations
                        .extend(contribution.content.recommendations.iter().cloned());
                }
                context.append_contribution(contribution);
            }
            context.accumulate_points(round_concerns.clone(), round_recommendations.clone());

            // SCORING: only rounds with at least one valid contribution
            let round_opinions = context.round_opinions(round);
            if round_opinions.is_empty() {
                warn!("Round {} produced no valid contributions", round);
                progress.on_round_complete(round, None);
            } else {
                let metrics = self
                    .evaluator
                    .score(round, &round_opinions, self.experts.len());
                let agreement = metrics.agreement_score;
                let participation = metrics.participation;
                info!(
                    "Round {} scored: agreement {:.2}, participation {:.2}",
                    round, agreement, participation
                );
                progress.on_round_complete(round, Some(agreement));
                context.record_metrics(metrics);

                // Stopping rule: the round's agreement score AND its
                // participation floor must hold simultaneously.
                if self.evaluator.meets_threshold(agreement)
                    && participation >= self.params.min_participation
                {
                    info!("Consensus reached in round {}", round);
                    return LoopOutcome::ConsensusReached;
                }
            }

            // REFINING: no consensus, feed this round's points back
            match self
                .refine(context, &round_concerns, &round_recommendations)
                .await
            {
                Ok(text) => {
                    if context.apply_refinement(&text) {
                        debug!("Proposal refined in round {}", round);
                        progress.on_proposal_refined(round);
                    } else {
                        debug!("Refinement returned no usable change in round {}", round);
                    }
                }
                Err(e) => {
                    warn!("Refinement call failed, keeping current proposal: {}", e);
                }
            }
        }

        info!("Round budget exhausted without consensus");
        LoopOutcome::MaxRoundsReached
    }

    /// Fan out one concurrent consultation per expert and gather all results.
    ///
    /// Every expert resolves to exactly one record: a valid contribution, or
    /// an error placeholder on failure or fan-out-boundary timeout. A single
    /// expert's failure never aborts the round.
    async fn collect_round(
        &self,
        round: usize,
        context: &EnhancementContext,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Contribution> {
        let mut join_set = JoinSet::new();
        // Experts whose task has not yet resolved to a record; whatever is
        // left after the gather (panicked or cancelled tasks) gets an error
        // placeholder so every expert leaves exactly one record per round.
        let mut pending: Vec<String> = self.experts.iter().map(|e| e.name().to_string()).collect();

        for expert in self.experts {
            let expert = Arc::clone(expert);
            let proposal = context.current_proposal().to_string();
            let history = context.discussion_history().to_vec();
            let timeout = self.params.expert_timeout();

            join_set.spawn(async move {
                let name = expert.name().to_string();
                let result =
                    tokio::time::timeout(timeout, expert.consult(&proposal, &history)).await;
                (name, result)
            });
        }

        let mut contributions = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((name, Ok(Ok(opinion)))) => {
                    info!("Expert {} contributed in round {}", name, round);
                    progress.on_expert_complete(&name, true);
                    Self::settle(&mut pending, &name);
                    contributions.push(Contribution::success(name, round, opinion));
                }
                Ok((name, Ok(Err(e)))) => {
                    warn!("Expert {} failed in round {}: {}", name, round, e);
                    progress.on_expert_complete(&name, false);
                    Self::settle(&mut pending, &name);
                    contributions.push(Contribution::failure(name, round, e.to_string()));
                }
                Ok((name, Err(_))) => {
                    warn!("Expert {} timed out in round {}", name, round);
                    progress.on_expert_complete(&name, false);
                    Self::settle(&mut pending, &name);
                    contributions.push(Contribution::failure(
                        name,
                        round,
                        format!("timed out after {}s", self.params.expert_timeout_secs),
                    ));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        for name in pending {
            warn!("Expert {} task aborted in round {}", name, round);
            progress.on_expert_complete(&name, false);
            contributions.push(Contribution::failure(
                name,
                round,
                "expert task aborted before completion",
            ));
        }

        contributions
    }

    fn settle(pending: &mut Vec<String>, name: &str) {
        if let Some(i) = pending.iter().position(|n| n == name) {
            pending.remove(i);
        }
    }

    /// Call the proposal stage in refinement mode
    async fn refine(
        &self,
        context: &EnhancementContext,
        concerns: &[Point],
        recommendations: &[Point],
    ) -> Result<String, crate::ports::llm_gateway::GatewayError> {
        let prompt =
            PromptTemplate::refinement_prompt(context.current_proposal(), concerns, recommendations);
        self.gateway
            .complete(PromptTemplate::proposal_system(), &prompt)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::expert::ExpertError;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use ijma_domain::{ExpertOpinion, StandardId, TriggerScenario};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubGateway {
        refinement_text: String,
        refinement_calls: AtomicUsize,
    }

    impl StubGateway {
        fn new(refinement_text: &str) -> Self {
            Self {
                refinement_text: refinement_text.to_string(),
                refinement_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for StubGateway {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, GatewayError> {
            self.refinement_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.refinement_text.clone())
        }
    }

    struct StubExpert {
        name: String,
        concerns: Vec<String>,
        fail: bool,
        panic: bool,
        delay: Option<std::time::Duration>,
    }

    impl StubExpert {
        fn agreeing(name: &str, concern: &str) -> Arc<dyn ExpertAgent> {
            Arc::new(Self {
                name: name.to_string(),
                concerns: vec![concern.to_string()],
                fail: false,
                panic: false,
                delay: None,
            })
        }

        fn failing(name: &str) -> Arc<dyn ExpertAgent> {
            Arc::new(Self {
                name: name.to_string(),
                concerns: vec![],
                fail: true,
                panic: false,
                delay: None,
            })
        }

        fn panicking(name: &str) -> Arc<dyn ExpertAgent> {
            Arc::new(Self {
                name: name.to_string(),
                concerns: vec![],
                fail: false,
                panic: true,
                delay: None,
            })
        }

        fn hanging(name: &str, delay: std::time::Duration) -> Arc<dyn ExpertAgent> {
            Arc::new(Self {
                name: name.to_string(),
                concerns: vec!["late point".to_string()],
                fail: false,
                panic: false,
                delay: Some(delay),
            })
        }
    }

    #[async_trait]
    impl ExpertAgent for StubExpert {
        fn name(&self) -> &str {
            &self.name
        }

        async fn consult(
            &self,
            _proposal: &str,
            _history: &[Contribution],
        ) -> Result<ExpertOpinion, ExpertError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.panic {
                panic!("expert task blew up");
            }
            if self.fail {
                return Err(ExpertError::Failed("model unavailable".into()));
            }
            Ok(ExpertOpinion::new("analysis").with_concerns(
                self.concerns
                    .iter()
                    .map(|c| Point::new(&self.name, c))
                    .collect(),
            ))
        }
    }

    fn context() -> EnhancementContext {
        let mut ctx = EnhancementContext::new(
            StandardId::new("10"),
            TriggerScenario::new("test scenario"),
        );
        ctx.set_initial_proposal("Initial proposal").unwrap();
        ctx
    }

    #[tokio::test]
    async fn test_skipped_when_no_experts() {
        let gateway = Arc::new(StubGateway::new("refined"));
        let experts: Vec<Arc<dyn ExpertAgent>> = vec![];
        let params = DeliberationParams::default();
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        assert_eq!(outcome, LoopOutcome::Skipped);
        assert_eq!(ctx.current_round(), 0);
        assert!(ctx.discussion_history().is_empty());
    }

    #[tokio::test]
    async fn test_skipped_when_zero_round_budget() {
        let gateway = Arc::new(StubGateway::new("refined"));
        let experts = vec![StubExpert::agreeing("a", "point")];
        let params = DeliberationParams::default().with_max_rounds(0);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        assert_eq!(outcome, LoopOutcome::Skipped);
        assert_eq!(ctx.current_proposal(), "Initial proposal");
    }

    #[tokio::test]
    async fn test_consensus_stops_without_refinement() {
        let gateway = Arc::new(StubGateway::new("refined"));
        let experts = vec![
            StubExpert::agreeing("a", "Shared concern"),
            StubExpert::agreeing("b", "Shared concern"),
            StubExpert::agreeing("c", "Shared concern"),
        ];
        let params = DeliberationParams::default().with_max_rounds(2);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        assert_eq!(outcome, LoopOutcome::ConsensusReached);
        assert_eq!(ctx.current_round(), 1);
        assert_eq!(ctx.metrics_history().len(), 1);
        assert!(ctx.latest_metrics().unwrap().agreement_score >= 0.8);
        // No refinement call was issued for the consensus round
        assert_eq!(gateway.refinement_calls.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.current_proposal(), "Initial proposal");
    }

    #[tokio::test]
    async fn test_single_expert_failure_is_isolated() {
        let gateway = Arc::new(StubGateway::new("Initial proposal"));
        let experts = vec![
            StubExpert::agreeing("a", "Shared concern"),
            StubExpert::agreeing("b", "Shared concern"),
            StubExpert::agreeing("c", "Shared concern"),
            StubExpert::agreeing("d", "Shared concern"),
            StubExpert::failing("e"),
        ];
        let params = DeliberationParams::default().with_max_rounds(1);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        // 4/5 participation meets the 0.8 floor and everyone agrees
        assert_eq!(outcome, LoopOutcome::ConsensusReached);
        assert_eq!(ctx.discussion_history().len(), 5);
        assert_eq!(ctx.valid_opinions().len(), 4);
        let errors: Vec<_> = ctx
            .discussion_history()
            .iter()
            .filter(|c| !c.is_valid())
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].agent_name, "e");
    }

    #[tokio::test]
    async fn test_participation_floor_blocks_early_stop() {
        let gateway = Arc::new(StubGateway::new("Initial proposal"));
        // 3 of 5 respond, all perfectly aligned: score 1.0 but participation 0.6
        let experts = vec![
            StubExpert::agreeing("a", "Shared concern"),
            StubExpert::agreeing("b", "Shared concern"),
            StubExpert::agreeing("c", "Shared concern"),
            StubExpert::failing("d"),
            StubExpert::failing("e"),
        ];
        let params = DeliberationParams::default().with_max_rounds(2);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        assert_eq!(outcome, LoopOutcome::MaxRoundsReached);
        assert_eq!(ctx.current_round(), 2);
        // Score threshold alone was met every round
        assert!(ctx.metrics_history().iter().all(|m| m.agreement_score >= 0.8));
    }

    #[tokio::test]
    async fn test_all_experts_failing_runs_to_budget() {
        let gateway = Arc::new(StubGateway::new("refined"));
        let experts = vec![StubExpert::failing("a"), StubExpert::failing("b")];
        let params = DeliberationParams::default().with_max_rounds(2);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        assert_eq!(outcome, LoopOutcome::MaxRoundsReached);
        assert_eq!(ctx.current_round(), 2);
        assert!(ctx.metrics_history().is_empty());
        assert_eq!(ctx.discussion_history().len(), 4);
        // Refinement was still attempted each round, with empty feedback
        assert_eq!(gateway.refinement_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_expert_becomes_error_contribution() {
        let gateway = Arc::new(StubGateway::new("Initial proposal"));
        let experts = vec![
            StubExpert::agreeing("a", "Shared concern"),
            StubExpert::hanging("slow", std::time::Duration::from_secs(600)),
        ];
        let params = DeliberationParams::default()
            .with_max_rounds(1)
            .with_expert_timeout_secs(120);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        assert_eq!(outcome, LoopOutcome::MaxRoundsReached);
        let slow = ctx
            .discussion_history()
            .iter()
            .find(|c| c.agent_name == "slow")
            .unwrap();
        assert!(!slow.is_valid());
        assert!(slow.error.as_deref().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_panicked_expert_still_leaves_error_record() {
        let gateway = Arc::new(StubGateway::new("Initial proposal"));
        let experts = vec![
            StubExpert::agreeing("fine", "Shared concern"),
            StubExpert::panicking("panicker"),
        ];
        let params = DeliberationParams::default().with_max_rounds(1);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        // Every configured expert resolves to exactly one record per round
        assert_eq!(outcome, LoopOutcome::MaxRoundsReached);
        assert_eq!(ctx.discussion_history().len(), 2);
        let record = ctx
            .discussion_history()
            .iter()
            .find(|c| c.agent_name == "panicker")
            .unwrap();
        assert!(!record.is_valid());
        assert!(record.error.as_deref().unwrap().contains("aborted"));
        assert_eq!(ctx.valid_opinions().len(), 1);
    }

    #[tokio::test]
    async fn test_refinement_updates_proposal() {
        let gateway = Arc::new(StubGateway::new("Refined proposal v2"));
        // Disagreeing experts: no consensus, refinement each round
        let experts = vec![
            StubExpert::agreeing("a", "Point from a"),
            StubExpert::agreeing("b", "Point from b"),
        ];
        let params = DeliberationParams::default().with_max_rounds(1);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        let outcome = looper.run(&mut ctx, &NoProgress).await;

        assert_eq!(outcome, LoopOutcome::MaxRoundsReached);
        assert_eq!(ctx.current_proposal(), "Refined proposal v2");
        assert_eq!(ctx.initial_proposal(), "Initial proposal");
        assert_eq!(ctx.accumulated_concerns().len(), 2);
    }

    #[tokio::test]
    async fn test_history_rounds_never_exceed_current_round() {
        let gateway = Arc::new(StubGateway::new("changed"));
        let experts = vec![
            StubExpert::agreeing("a", "Point from a"),
            StubExpert::agreeing("b", "Point from b"),
        ];
        let params = DeliberationParams::default().with_max_rounds(3);
        let looper = DeliberationLoop::new(Arc::clone(&gateway), &experts, &params);

        let mut ctx = context();
        looper.run(&mut ctx, &NoProgress).await;

        assert!(
            ctx.discussion_history()
                .iter()
                .all(|c| c.round >= 1 && c.round <= ctx.current_round())
        );
        assert_eq!(ctx.discussion_history().len(), 6);
    }
}
