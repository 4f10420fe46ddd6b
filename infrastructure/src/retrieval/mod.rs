//! Passage retrieval adapters
//!
//! [`FileCorpusRetriever`] serves paragraphs from a directory of standard
//! texts, ranked by keyword overlap with the query. Index construction
//! proper is out of scope; this adapter exists so the review stage has a
//! working "retrieve relevant passages" collaborator.

use async_trait::async_trait;
use ijma_application::ports::retrieval::{PassageRetriever, RetrievalError};
use std::path::Path;
use tracing::{debug, warn};

/// Minimum characters for a paragraph to be indexed as a chunk
const MIN_CHUNK_LEN: usize = 40;

/// Keyword-overlap retriever over an in-memory chunk list
pub struct FileCorpusRetriever {
    chunks: Vec<String>,
}

impl FileCorpusRetriever {
    /// Build from pre-chunked passages (used in tests and embedding hosts)
    pub fn from_chunks(chunks: Vec<String>) -> Self {
        Self { chunks }
    }

    /// Empty retriever: every query returns no passages
    pub fn empty() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Load every `.md` and `.txt` file under `dir`, split into paragraphs.
    ///
    /// Unreadable files are skipped with a warning; a missing or empty
    /// directory yields an empty corpus, which the review stage treats as
    /// "no context", not as an error.
    pub fn from_dir(dir: &Path) -> Result<Self, RetrievalError> {
        let mut chunks = Vec::new();

        for pattern in ["**/*.md", "**/*.txt"] {
            let full = dir.join(pattern);
            let paths = glob::glob(&full.to_string_lossy())
                .map_err(|e| RetrievalError::IndexUnavailable(e.to_string()))?;

            for entry in paths {
                let path = match entry {
                    Ok(p) => p,
                    Err(e) => {
                        warn!("Skipping unreadable corpus entry: {}", e);
                        continue;
                    }
                };
                match std::fs::read_to_string(&path) {
                    Ok(text) => {
                        chunks.extend(split_paragraphs(&text));
                    }
                    Err(e) => {
                        warn!("Skipping corpus file {}: {}", path.display(), e);
                    }
                }
            }
        }

        debug!("Indexed {} corpus chunks from {}", chunks.len(), dir.display());
        Ok(Self { chunks })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn score(chunk: &str, terms: &[String]) -> usize {
        let lower = chunk.to_lowercase();
        terms.iter().filter(|t| lower.contains(t.as_str())).count()
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|p| p.trim())
        .filter(|p| p.len() >= MIN_CHUNK_LEN)
        .map(|p| p.to_string())
        .collect()
}

fn query_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.len() > 3)
        .collect()
}

#[async_trait]
impl PassageRetriever for FileCorpusRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, RetrievalError> {
        let terms = query_terms(query);
        if terms.is_empty() || self.chunks.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, &String)> = self
            .chunks
            .iter()
            .map(|chunk| (Self::score(chunk, &terms), chunk))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Highest overlap first; stable within equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(_, chunk)| chunk.clone())
            .collect())
    }
}
