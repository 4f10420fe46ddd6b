//! Enhancement run model
//!
//! State and result types for one standards-enhancement run:
//!
//! - [`EnhancementContext`] - Mutable per-run state with append-only audit trail
//! - [`ReviewResult`] / [`EnhancementResult`] - Stage output and final result
//! - [`Phase`], [`LoopOutcome`], [`RunStatus`] - Run lifecycle markers

pub mod context;
pub mod entities;
pub mod value_objects;

pub use context::EnhancementContext;
pub use entities::{LoopOutcome, Phase, RunStatus};
pub use value_objects::{EnhancementResult, ReviewResult};
