//! Text output formatter for human-readable display

use crate::output::{OutputFormatter, Report, Verbosity};
use crate::pipeline::FetchOutcome;
use colored::Colorize;
use std::io::Write;

/// Text formatter
pub struct TextFormatter {
    verbosity: Verbosity,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn format_outcome(&self, outcome: &FetchOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let dep = &outcome.dependency;
        let version = match &outcome.previous {
            Some(prev) if outcome.changed_version() => format!(
                "{} → {}",
                prev.semver.dimmed(),
                dep.semver.green().bold()
            ),
            _ => dep.semver.green().bold().to_string(),
        };

        writeln!(writer, "  {} {}", dep.original_spec.bold(), version)?;

        if self.verbosity == Verbosity::Verbose {
            writeln!(
                writer,
                "    tag {}, commit {}, {} files",
                outcome.tag,
                dep.hash.dimmed(),
                outcome.files
            )?;
        }

        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        match report {
            Report::Initialized {
                manifest_path,
                target_dir,
            } => {
                writeln!(
                    writer,
                    "{} Created {} (target directory: {})",
                    "✓".green(),
                    manifest_path.display(),
                    target_dir
                )?;
            }
            Report::Fetched {
                target_dir,
                outcomes,
            } => {
                if outcomes.is_empty() {
                    writeln!(writer, "{}", "No dependencies recorded.".dimmed())?;
                    return Ok(());
                }

                writeln!(
                    writer,
                    "{} {} into {}:",
                    "Fetched".green().bold(),
                    plural(outcomes.len()),
                    target_dir
                )?;
                for outcome in outcomes {
                    self.format_outcome(outcome, writer)?;
                }
            }
        }

        Ok(())
    }
}

fn plural(count: usize) -> String {
    if count == 1 {
        "1 dependency".to_string()
    } else {
        format!("{} dependencies", count)
    }
}
