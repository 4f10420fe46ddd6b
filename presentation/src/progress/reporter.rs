//! Progress reporting for enhancement runs

use colored::Colorize;
use ijma_application::ports::progress::ProgressNotifier;
use ijma_domain::Phase;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during an enhancement run with spinners and round bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
            round_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap()
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("  {prefix:.bold} [{bar:30.cyan/blue}] round {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &Phase) -> &'static str {
        match phase {
            Phase::Review => "Phase 1: Review",
            Phase::Proposal => "Phase 2: Proposal",
            Phase::Deliberation => "Phase 3: Deliberation",
            Phase::Validation => "Phase 4: Validation",
            Phase::CrossImpact => "Phase 5: Cross-Impact",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, detail: &str) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message(detail.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        *self.phase_bar.lock().unwrap() = Some(pb);
    }

    fn on_phase_complete(&self, _phase: &Phase, detail: &str) {
        if let Some(pb) = self.round_bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.phase_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} {}", "done".green(), detail));
        }
    }

    fn on_round_start(&self, round: usize, max_rounds: usize) {
        let mut guard = self.round_bar.lock().unwrap();
        let pb = guard.get_or_insert_with(|| {
            let pb = self.multi.add(ProgressBar::new(max_rounds as u64));
            pb.set_style(Self::round_style());
            pb.set_prefix("deliberating");
            pb
        });
        pb.set_position(round as u64);
        pb.set_message(String::new());
    }

    fn on_expert_complete(&self, agent: &str, success: bool) {
        if let Some(pb) = self.round_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), agent)
            } else {
                format!("{} {}", "x".red(), agent)
            };
            pb.set_message(status);
        }
    }

    fn on_round_complete(&self, _round: usize, agreement: Option<f64>) {
        if let Some(pb) = self.round_bar.lock().unwrap().as_ref() {
            match agreement {
                Some(score) => pb.set_message(format!("agreement {:.2}", score)),
                None => pb.set_message("no valid contributions".yellow().to_string()),
            }
        }
    }

    fn on_proposal_refined(&self, round: usize) {
        if let Some(pb) = self.round_bar.lock().unwrap().as_ref() {
            pb.set_message(format!("proposal refined after round {}", round));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, detail: &str) {
        println!(
            "{} {} {}",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            detail
        );
    }

    fn on_phase_complete(&self, _phase: &Phase, detail: &str) {
        println!("   {} {}", "done".green(), detail);
    }

    fn on_round_start(&self, round: usize, max_rounds: usize) {
        println!("   round {}/{}", round, max_rounds);
    }

    fn on_expert_complete(&self, agent: &str, success: bool) {
        if success {
            println!("     {} {}", "v".green(), agent);
        } else {
            println!("     {} {} (failed)", "x".red(), agent);
        }
    }

    fn on_round_complete(&self, round: usize, agreement: Option<f64>) {
        match agreement {
            Some(score) => println!("   round {} agreement: {:.2}", round, score),
            None => println!("   round {}: no valid contributions", round),
        }
    }
}
