//! pkgit - Minimal source-hosted package manager
//!
//! Commands:
//! - `pkgit init [dir]`: create pkgit.req targeting `dir` (default: pkgit)
//! - `pkgit get owner/repo[@version]`: fetch one tagged release
//! - `pkgit install`: re-fetch everything recorded in pkgit.req

use anyhow::Context;
use clap::Parser;
use pkgit::cli::{CliArgs, Command};
use pkgit::output::{create_formatter, OutputConfig, Report};
use pkgit::pipeline::Pkgit;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let settings = args.settings();
    log::debug!("pkgit v{} using {}", env!("CARGO_PKG_VERSION"), settings.manifest_path.display());

    let pkgit = Pkgit::from_settings(&settings)?;

    let report = match &args.command {
        Command::Init { target_dir } => {
            let manifest = pkgit.init(target_dir.as_deref())?;
            Report::Initialized {
                manifest_path: pkgit.store().path().to_path_buf(),
                target_dir: manifest.target_dir,
            }
        }
        Command::Get { spec } => {
            let manifest = pkgit.load()?;
            let (manifest, outcome) = pkgit
                .get_one(manifest, spec)
                .await
                .with_context(|| format!("could not get {}", spec))?;
            Report::Fetched {
                target_dir: manifest.target_dir,
                outcomes: vec![outcome],
            }
        }
        Command::Install => {
            let manifest = pkgit.load()?;
            let (manifest, outcomes) = pkgit
                .install_all(manifest)
                .await
                .context("install aborted")?;
            Report::Fetched {
                target_dir: manifest.target_dir,
                outcomes,
            }
        }
    };

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose, args.quiet));
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
