//! Domain layer for ijma
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Deliberation
//!
//! An enhancement run refines a proposed amendment to a regulatory standard
//! through rounds of multi-expert deliberation:
//!
//! - **Contribution**: one expert's structured opinion (or failure record) per round
//! - **Consensus**: measured agreement over the points experts raised, used
//!   as the loop's stopping condition
//!
//! ## Enhancement
//!
//! [`EnhancementContext`] is the single mutable record threaded through a
//! run; [`EnhancementResult`] is the immutable final report.

pub mod core;
pub mod deliberation;
pub mod enhancement;
pub mod prompt;

// Re-export commonly used types
pub use crate::core::{DomainError, StandardId, TriggerScenario};
pub use deliberation::{
    ConsensusEvaluator, ConsensusMetrics, Contribution, ContributionKind, ExpertOpinion, Point,
    parse_opinion, parse_points,
};
pub use enhancement::{
    EnhancementContext, EnhancementResult, LoopOutcome, Phase, ReviewResult, RunStatus,
};
pub use prompt::PromptTemplate;
