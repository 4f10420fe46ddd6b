//! File configuration schema

use ijma_application::DeliberationParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration loaded from TOML files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub deliberation: DeliberationSection,
    pub gateway: GatewaySection,
    pub retrieval: RetrievalSection,
    pub experts: ExpertsSection,
}

/// `[deliberation]` section: loop control parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliberationSection {
    pub max_rounds: usize,
    pub consensus_threshold: f64,
    pub min_participation: f64,
    pub expert_timeout_secs: u64,
}

impl Default for DeliberationSection {
    fn default() -> Self {
        let params = DeliberationParams::default();
        Self {
            max_rounds: params.max_rounds,
            consensus_threshold: params.consensus_threshold,
            min_participation: params.min_participation,
            expert_timeout_secs: params.expert_timeout_secs,
        }
    }
}

impl DeliberationSection {
    pub fn to_params(&self) -> DeliberationParams {
        DeliberationParams::default()
            .with_max_rounds(self.max_rounds)
            .with_consensus_threshold(self.consensus_threshold)
            .with_min_participation(self.min_participation)
            .with_expert_timeout_secs(self.expert_timeout_secs)
    }
}

/// `[gateway]` section: chat-completions endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key; never the key itself
    pub api_key_env: String,
    pub max_retries: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_retries: 3,
        }
    }
}

/// `[retrieval]` section: corpus location and result count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSection {
    pub corpus_dir: Option<PathBuf>,
    pub top_k: usize,
}

impl Default for RetrievalSection {
    fn default() -> Self {
        Self {
            corpus_dir: None,
            top_k: 5,
        }
    }
}

/// `[experts]` section: which default panel domains to enable
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertsSection {
    pub enabled: Vec<String>,
}

impl Default for ExpertsSection {
    fn default() -> Self {
        Self {
            enabled: crate::experts::default_profiles()
                .into_iter()
                .map(|p| p.name)
                .collect(),
        }
    }
}
