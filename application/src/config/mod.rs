//! Deliberation control parameters

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters governing the deliberation loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliberationParams {
    /// Maximum number of deliberation rounds; 0 skips the loop entirely
    pub max_rounds: usize,
    /// Agreement score required to stop early, in [0, 1]
    pub consensus_threshold: f64,
    /// Minimum fraction of configured experts that must contribute validly
    /// in a round for the consensus check to be allowed to stop the loop
    pub min_participation: f64,
    /// Per-expert-call timeout applied at the fan-out boundary, seconds
    pub expert_timeout_secs: u64,
}

impl Default for DeliberationParams {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            consensus_threshold: 0.8,
            min_participation: 0.8,
            expert_timeout_secs: 120,
        }
    }
}

impl DeliberationParams {
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_consensus_threshold(mut self, threshold: f64) -> Self {
        self.consensus_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_min_participation(mut self, floor: f64) -> Self {
        self.min_participation = floor.clamp(0.0, 1.0);
        self
    }

    pub fn with_expert_timeout_secs(mut self, secs: u64) -> Self {
        self.expert_timeout_secs = secs;
        self
    }

    pub fn expert_timeout(&self) -> Duration {
        Duration::from_secs(self.expert_timeout_secs)
    }
}
