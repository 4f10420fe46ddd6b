//! Console output formatter for enhancement results

use crate::output::formatter::OutputFormatter;
use chrono::Local;
use colored::Colorize;
use ijma_domain::{EnhancementResult, LoopOutcome};

/// Formats enhancement results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete enhancement result
    pub fn format(result: &EnhancementResult) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Standard Enhancement Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} FAS {}\n",
            "Standard:".cyan().bold(),
            result.standard_id
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Scenario:".cyan().bold(),
            result.trigger_scenario
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Generated:".cyan().bold(),
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        if let Some(error) = &result.error {
            output.push_str(&Self::section_header("Run Failed"));
            output.push_str(&format!("\n{}\n", error.red()));
            output.push_str(&Self::footer());
            return output;
        }

        // Deliberation summary
        output.push_str(&Self::section_header("Deliberation"));
        output.push_str(&format!(
            "\nRounds completed: {}\n",
            result.rounds_completed
        ));
        if let Some(outcome) = &result.loop_outcome {
            let outcome_text = match outcome {
                LoopOutcome::ConsensusReached => outcome.to_string().green(),
                LoopOutcome::MaxRoundsReached => outcome.to_string().yellow(),
                LoopOutcome::Skipped => outcome.to_string().dimmed(),
            };
            output.push_str(&format!("Outcome: {}\n", outcome_text));
        }
        for metrics in &result.consensus_metrics_per_round {
            output.push_str(&format!(
                "  round {}: agreement {:.2}, participation {:.2}, {} resolved / {} open\n",
                metrics.round,
                metrics.agreement_score,
                metrics.participation,
                metrics.resolved_points.len(),
                metrics.unresolved_points.len() + metrics.disagreement_points.len(),
            ));
        }

        // Proposal
        output.push_str(&Self::section_header("Enhancement Proposal"));
        output.push_str(&format!("\n{}\n", result.proposal_text));

        // Open points
        if !result.final_unresolved_points.is_empty() {
            output.push_str(&format!("\n{}\n", "Unresolved Points:".yellow().bold()));
            for point in &result.final_unresolved_points {
                output.push_str(&format!("  * {}\n", point));
            }
        }

        // Accumulated concerns
        if !result.accumulated_concerns.is_empty() {
            output.push_str(&format!("\n{}\n", "Expert Concerns:".cyan().bold()));
            for point in &result.accumulated_concerns {
                output.push_str(&format!("  * [{}] {}\n", point.domain, point.description));
            }
        }

        // Validation
        output.push_str(&Self::section_header("Validation"));
        output.push_str(&format!("\n{}\n", result.validation_summary));

        // Cross-standard analysis (if run)
        if let Some(analysis) = &result.cross_standard_analysis {
            output.push_str(&Self::section_header("Cross-Standard Impact"));
            output.push_str(&format!("\n{}\n", analysis));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &EnhancementResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the proposal text only (concise output)
    pub fn format_proposal_only(result: &EnhancementResult) -> String {
        let mut output = String::new();

        if let Some(error) = &result.error {
            output.push_str(&format!("{} {}\n", "Run failed:".red().bold(), error));
            return output;
        }

        output.push_str(&format!(
            "{}\n\n",
            format!("=== Enhancement Proposal (FAS {}) ===", result.standard_id)
                .cyan()
                .bold()
        ));
        output.push_str(&result.proposal_text);
        output.push('\n');

        if let Some(score) = result.final_agreement_score() {
            output.push_str(&format!(
                "\n{} {:.2}\n",
                "Final agreement:".dimmed(),
                score
            ));
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &EnhancementResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &EnhancementResult) -> String {
        Self::format_json(result)
    }

    fn format_proposal_only(&self, result: &EnhancementResult) -> String {
        Self::format_proposal_only(result)
    }
}
