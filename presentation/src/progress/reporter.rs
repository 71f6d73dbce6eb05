//! Progress reporting for turns and question answers

use boardroom_application::TurnProgressNotifier;
use boardroom_domain::{Director, DirectorId, Statement, TurnDecision};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with spinners: one per turn, one per answering director
pub struct ProgressReporter {
    multi: MultiProgress,
    turn: Mutex<Option<ProgressBar>>,
    answers: Mutex<HashMap<DirectorId, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            turn: Mutex::new(None),
            answers: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn spinner(&self, prefix: String, message: &str) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn turn_label(decision: &TurnDecision, director: &Director) -> String {
        format!(
            "R{}.{} {}",
            decision.round, decision.sequence_in_round, director.name
        )
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for ProgressReporter {
    fn on_turn_scheduled(&self, decision: &TurnDecision, director: &Director) {
        let message = if decision.is_rebuttal {
            "preparing a rebuttal..."
        } else {
            "thinking..."
        };
        let pb = self.spinner(Self::turn_label(decision, director), message);
        if let Ok(mut turn) = self.turn.lock() {
            *turn = Some(pb);
        }
    }

    fn on_turn_recorded(&self, statement: &Statement, _director: &Director) {
        if let Some(pb) = self.turn.lock().ok().and_then(|mut t| t.take()) {
            pb.finish_with_message(format!(
                "{} ({} tokens)",
                "done".green(),
                statement.tokens_used
            ));
        }
    }

    fn on_turn_failed(&self, _director: &Director, reason: &str) {
        if let Some(pb) = self.turn.lock().ok().and_then(|mut t| t.take()) {
            pb.abandon_with_message(format!("{} {}", "failed:".red(), reason));
        }
    }

    fn on_answer_start(&self, director: &Director) {
        let pb = self.spinner(director.name.clone(), "answering...");
        if let Ok(mut answers) = self.answers.lock() {
            answers.insert(director.id.clone(), pb);
        }
    }

    fn on_answer_complete(&self, director: &Director, success: bool) {
        let pb = self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.remove(&director.id));
        if let Some(pb) = pb {
            if success {
                pb.finish_with_message(format!("{}", "answered".green()));
            } else {
                pb.abandon_with_message(format!("{}", "failed".red()));
            }
        }
    }
}

/// Simple line-based progress for non-interactive terminals
pub struct SimpleProgress;

impl TurnProgressNotifier for SimpleProgress {
    fn on_turn_scheduled(&self, decision: &TurnDecision, director: &Director) {
        eprintln!(
            "{} {}{}",
            "->".cyan(),
            ProgressReporter::turn_label(decision, director).bold(),
            if decision.is_rebuttal { " (rebuttal)" } else { "" }
        );
    }

    fn on_turn_recorded(&self, statement: &Statement, director: &Director) {
        eprintln!(
            "  {} {} ({} tokens)",
            "v".green(),
            director.name,
            statement.tokens_used
        );
    }

    fn on_turn_failed(&self, director: &Director, reason: &str) {
        eprintln!("  {} {} ({})", "x".red(), director.name, reason);
    }

    fn on_answer_complete(&self, director: &Director, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), director.name);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), director.name);
        }
    }
}
