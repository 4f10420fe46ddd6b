//! Expert agent adapters

pub mod llm_expert;
pub mod panel;

pub use llm_expert::{ExpertProfile, LlmExpert};
pub use panel::{default_panel, default_profiles, panel_from_names};
