//! Per-expert, per-round contribution records
//!
//! One [`Contribution`] is appended to the discussion history for every
//! configured expert in every round, whether the expert's call succeeded
//! or failed. Records are never mutated after append; together they form
//! the full audit trail of a deliberation.

use super::point::Point;
use serde::{Deserialize, Serialize};

/// Structured output of a single expert consultation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpertOpinion {
    /// Free-text analysis from the expert's viewpoint
    pub analysis: String,
    /// Concerns raised against the current proposal
    pub concerns: Vec<Point>,
    /// Recommendations for improving the proposal
    pub recommendations: Vec<Point>,
}

impl ExpertOpinion {
    pub fn new(analysis: impl Into<String>) -> Self {
        Self {
            analysis: analysis.into(),
            concerns: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn with_concerns(mut self, concerns: Vec<Point>) -> Self {
        self.concerns = concerns;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<Point>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// All points raised in this opinion, concerns first
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.concerns.iter().chain(self.recommendations.iter())
    }
}

/// Kind of a discussion record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    /// A valid expert contribution
    Discussion,
    /// Placeholder recorded when the expert call failed
    DiscussionError,
}

/// One expert's output (or failure record) for a given round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    /// Record kind
    #[serde(rename = "type")]
    pub kind: ContributionKind,
    /// Round this contribution belongs to (1-indexed)
    pub round: usize,
    /// Wall-clock timestamp (milliseconds since epoch)
    pub timestamp: u64,
    /// Name of the contributing expert agent
    pub agent_name: String,
    /// The expert's opinion; empty concerns/recommendations on error
    pub content: ExpertOpinion,
    /// Error message if the expert call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Contribution {
    /// Create a valid contribution from a successful expert call
    pub fn success(agent_name: impl Into<String>, round: usize, opinion: ExpertOpinion) -> Self {
        Self {
            kind: ContributionKind::Discussion,
            round,
            timestamp: current_timestamp(),
            agent_name: agent_name.into(),
            content: opinion,
            error: None,
        }
    }

    /// Create an error placeholder for a failed expert call
    pub fn failure(agent_name: impl Into<String>, round: usize, error: impl Into<String>) -> Self {
        Self {
            kind: ContributionKind::DiscussionError,
            round,
            timestamp: current_timestamp(),
            agent_name: agent_name.into(),
            content: ExpertOpinion::default(),
            error: Some(error.into()),
        }
    }

    /// Whether this record is a valid discussion contribution
    pub fn is_valid(&self) -> bool {
        matches!(self.kind, ContributionKind::Discussion)
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
