//! Consensus metrics and scoring
//!
//! [`ConsensusEvaluator`] turns one round's expert opinions into a
//! [`ConsensusMetrics`] value object. Support for a point is the fraction
//! of contributions mentioning it, with exact wording as the equality
//! relation — no semantic deduplication.

use super::contribution::ExpertOpinion;
use super::parsing::parse_points;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Agreement metrics for one scored deliberation round (Value Object)
///
/// Immutable once produced; one record per round that had at least one
/// valid contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusMetrics {
    /// Round these metrics were computed for (1-indexed)
    pub round: usize,
    /// Fraction of distinct points that reached the consensus threshold,
    /// in [0, 1]; 0.0 when no points were raised at all
    pub agreement_score: f64,
    /// Points supported by at least the consensus threshold
    pub resolved_points: Vec<String>,
    /// Points with middling support (>= 0.5 but below the threshold)
    pub unresolved_points: Vec<String>,
    /// Points supported by fewer than half the contributions
    pub disagreement_points: Vec<String>,
    /// Fraction of configured experts that contributed validly this round
    pub participation: f64,
}

impl ConsensusMetrics {
    /// Total number of distinct points observed in the round
    pub fn total_points(&self) -> usize {
        self.resolved_points.len() + self.unresolved_points.len() + self.disagreement_points.len()
    }

    /// Points still open after the round: unresolved plus disputed
    pub fn open_points(&self) -> impl Iterator<Item = &String> {
        self.unresolved_points
            .iter()
            .chain(self.disagreement_points.iter())
    }
}

/// Scores a round of expert opinions into consensus metrics
///
/// # Example
///
/// ```
/// use ijma_domain::deliberation::{ConsensusEvaluator, ExpertOpinion, Point};
///
/// let a = ExpertOpinion::new("").with_concerns(vec![Point::new("a", "Define custody")]);
/// let b = ExpertOpinion::new("").with_concerns(vec![Point::new("b", "Define custody")]);
///
/// let evaluator = ConsensusEvaluator::default();
/// let metrics = evaluator.score(1, &[&a, &b], 2);
/// assert_eq!(metrics.agreement_score, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ConsensusEvaluator {
    consensus_threshold: f64,
}

impl Default for ConsensusEvaluator {
    fn default() -> Self {
        Self {
            consensus_threshold: 0.8,
        }
    }
}

impl ConsensusEvaluator {
    /// Create an evaluator with a custom consensus threshold (clamped to [0, 1])
    pub fn new(consensus_threshold: f64) -> Self {
        Self {
            consensus_threshold: consensus_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.consensus_threshold
    }

    /// Score one round's valid contributions.
    ///
    /// `configured_experts` is the size of the full panel, used for the
    /// participation ratio; `opinions` holds only the round's valid
    /// contributions.
    pub fn score(
        &self,
        round: usize,
        opinions: &[&ExpertOpinion],
        configured_experts: usize,
    ) -> ConsensusMetrics {
        let participation = if configured_experts == 0 {
            0.0
        } else {
            opinions.len() as f64 / configured_experts as f64
        };

        // Distinct points in first-mention order, with the number of
        // contributions mentioning each (at most once per contribution).
        let mut order: Vec<String> = Vec::new();
        let mut mentions: Vec<usize> = Vec::new();

        for opinion in opinions {
            let mut seen: HashSet<String> = HashSet::new();

            let structured = opinion.points().map(|p| p.key().to_string());
            let from_analysis = parse_points(&opinion.analysis).into_iter();

            for point in structured.chain(from_analysis) {
                if point.is_empty() || !seen.insert(point.clone()) {
                    continue;
                }
                match order.iter().position(|p| *p == point) {
                    Some(i) => mentions[i] += 1,
                    None => {
                        order.push(point);
                        mentions.push(1);
                    }
                }
            }
        }

        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        let mut disagreement = Vec::new();
        let total_contributions = opinions.len().max(1);

        for (point, count) in order.into_iter().zip(mentions) {
            let support = count as f64 / total_contributions as f64;
            if support < 0.5 {
                disagreement.push(point);
            } else if support >= self.consensus_threshold {
                resolved.push(point);
            } else {
                unresolved.push(point);
            }
        }

        let total_points = resolved.len() + unresolved.len() + disagreement.len();
        let agreement_score = if total_points == 0 {
            0.0
        } else {
            resolved.len() as f64 / total_points as f64
        };

        ConsensusMetrics {
            round,
            agreement_score,
            resolved_points: resolved,
            unresolved_points: unresolved,
            disagreement_points: disagreement,
            participation,
        }
    }

    /// Whether an agreement score meets the consensus threshold
    pub fn meets_threshold(&self, agreement_score: f64) -> bool {
        agreement_score >= self.consensus_threshold
    }
}
