//! Passage retrieval port
//!
//! "Retrieve relevant passages" is an opaque collaborator: query string in,
//! ordered list of text chunks out. Index construction is out of scope.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during passage retrieval
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Retrieval index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Retriever of passages relevant to a query, most relevant first
#[async_trait]
pub trait PassageRetriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, RetrievalError>;
}
