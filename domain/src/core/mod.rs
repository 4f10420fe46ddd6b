//! Core domain primitives

pub mod error;
pub mod standard;

pub use error::DomainError;
pub use standard::{StandardId, TriggerScenario};
