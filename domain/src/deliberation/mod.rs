//! Deliberation domain model
//!
//! Core types for the round-based multi-expert deliberation:
//!
//! - [`Point`] - A tagged concern or recommendation
//! - [`ExpertOpinion`] / [`Contribution`] - Per-expert round records
//! - [`ConsensusEvaluator`] / [`ConsensusMetrics`] - Agreement scoring
//! - [`parsing`] - Best-effort point extraction from free-form LLM text

pub mod consensus;
pub mod contribution;
pub mod parsing;
pub mod point;

pub use consensus::{ConsensusEvaluator, ConsensusMetrics};
pub use contribution::{Contribution, ContributionKind, ExpertOpinion};
pub use parsing::{parse_opinion, parse_points};
pub use point::Point;
