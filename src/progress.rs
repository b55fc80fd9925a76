//! Progress display while resolving and downloading
//!
//! A single spinner is kept for the whole command and its message is swapped
//! per step. Ticking starts with the first step, so commands that never
//! reach the network draw nothing. When disabled the bar is hidden and every
//! call is a no-op.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Spinner shown during network and extraction work
pub struct Progress {
    bar: ProgressBar,
    ticking: AtomicBool,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        Self {
            bar,
            ticking: AtomicBool::new(false),
        }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            ticking: AtomicBool::new(false),
        }
    }

    /// Returns true if nothing will be drawn
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    /// Returns true once the spinner has started animating
    pub fn is_ticking(&self) -> bool {
        self.ticking.load(Ordering::Relaxed)
    }

    /// Show what is currently being worked on
    pub fn step(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
        if !self.bar.is_hidden() && !self.ticking.swap(true, Ordering::Relaxed) {
            self.bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    /// Print a completed step above the spinner
    pub fn done(&self, message: &str) {
        if !self.bar.is_hidden() {
            self.bar.println(format!("{} {}", "✓".green(), message));
        }
    }

    /// Remove the spinner from the terminal
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
