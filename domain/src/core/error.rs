//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Initial proposal was empty")]
    EmptyProposal,

    #[error("Initial proposal already recorded")]
    ProposalAlreadySet,
}
