//! Use cases

pub mod run_enhancement;

pub use run_enhancement::{RunEnhancementInput, RunEnhancementUseCase};
