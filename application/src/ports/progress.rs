//! Progress notification port
//!
//! Side-channel notifications emitted at phase transitions. They carry no
//! control-flow significance; consumers may ignore them entirely.

use ijma_domain::Phase;

/// Callback for progress updates during an enhancement run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts, with a human-readable detail string
    fn on_phase_start(&self, phase: &Phase, detail: &str);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase, detail: &str);

    // ==================== Deliberation Callbacks ====================

    /// Called when a deliberation round starts
    fn on_round_start(&self, _round: usize, _max_rounds: usize) {}

    /// Called when one expert's contribution resolves within a round
    fn on_expert_complete(&self, _agent: &str, _success: bool) {}

    /// Called after a round is scored; `agreement` is None when the round
    /// had no valid contributions
    fn on_round_complete(&self, _round: usize, _agreement: Option<f64>) {}

    /// Called when a refinement call actually changed the proposal
    fn on_proposal_refined(&self, _round: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _detail: &str) {}
    fn on_phase_complete(&self, _phase: &Phase, _detail: &str) {}
}
