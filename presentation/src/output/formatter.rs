//! Output formatter trait

use ijma_domain::EnhancementResult;

/// Trait for formatting enhancement results
pub trait OutputFormatter {
    /// Format the complete enhancement result
    fn format(&self, result: &EnhancementResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &EnhancementResult) -> String;

    /// Format the proposal text only (concise output)
    fn format_proposal_only(&self, result: &EnhancementResult) -> String;
}
