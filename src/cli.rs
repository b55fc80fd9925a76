//! CLI argument parsing module for pkgit

use crate::config::Settings;
use crate::manifest::DEFAULT_MANIFEST_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Parse timeout string in format: Ns (seconds), Nm (minutes), or bare N (seconds)
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty timeout string".to_string());
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else {
        (s, 1)
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number in timeout: {}", num_str))?;
    if num == 0 {
        return Err("timeout must be greater than zero".to_string());
    }

    Ok(Duration::from_secs(num * multiplier))
}

/// Minimal source-hosted package manager
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pkgit",
    version,
    about = "Fetch tagged GitHub releases into your project"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the manifest file; a relative target directory is resolved
    /// next to it
    #[arg(long, global = true, default_value = DEFAULT_MANIFEST_FILE)]
    pub manifest: PathBuf,

    /// Override the hosting provider's API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Abort network requests after this long (e.g., 30s, 2m)
    #[arg(long, global = true, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Enable verbose output (debug logging)
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

/// pkgit commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a manifest in the current directory
    Init {
        /// Directory dependencies are extracted into (default: pkgit)
        target_dir: Option<String>,
    },
    /// Resolve and fetch one dependency, e.g. octocat/Hello-World@1.0.0
    Get {
        /// Dependency spec: [host/]owner/repo[@version]
        spec: String,
    },
    /// Fetch every dependency recorded in the manifest
    Install,
}

impl CliArgs {
    /// Build runtime settings from the arguments
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default().with_manifest_path(&self.manifest);
        if let Some(ref url) = self.api_url {
            settings = settings.with_api_url(url);
        }
        if let Some(timeout) = self.timeout {
            settings = settings.with_timeout(timeout);
        }
        if self.quiet || self.json {
            settings = settings.without_progress();
        }
        settings
    }

    /// Default log filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
