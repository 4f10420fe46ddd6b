//! Enhancement run entities

use serde::{Deserialize, Serialize};

/// Phase of an enhancement run, used for progress reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Retrieve context and analyze the target standard
    Review,
    /// Generate the initial structured proposal
    Proposal,
    /// Round-based expert deliberation
    Deliberation,
    /// Single-shot validation of the final proposal
    Validation,
    /// Optional cross-standard impact analysis
    CrossImpact,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Review => "review",
            Phase::Proposal => "proposal",
            Phase::Deliberation => "deliberation",
            Phase::Validation => "validation",
            Phase::CrossImpact => "cross_impact",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal state of the deliberation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopOutcome {
    /// Agreement score and participation floor both met
    ConsensusReached,
    /// Round budget exhausted without consensus; not an error
    MaxRoundsReached,
    /// Zero rounds ran: no experts configured or max_rounds == 0
    Skipped,
}

impl std::fmt::Display for LoopOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopOutcome::ConsensusReached => write!(f, "consensus reached"),
            LoopOutcome::MaxRoundsReached => write!(f, "max rounds reached"),
            LoopOutcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// Overall status of an enhancement run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }
}
