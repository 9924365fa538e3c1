//! `sieve` reads SARIF reports produced by linters, keeps the findings that
//! land on lines a pull request added, and publishes them as a GitHub check
//! run with inline annotations.
//!
//! Every option falls back to the environment GitHub Actions provides, so
//! inside a workflow the binary usually runs without arguments.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod pipeline;
mod ui;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser};
use sieve_github::DEFAULT_API_URL;

use crate::ui::colors;

#[derive(Debug, Parser)]
#[command(name = "sieve", version, styles = ui::clap_styles())]
struct Cli {
    /// Comma-separated SARIF report paths.
    #[arg(long, env = "SARIF_REPORTS", value_name = "PATHS")]
    sarif_reports: Option<String>,

    /// The action's `sarif_reports` input; preferred over `--sarif-reports` when non-empty.
    #[arg(long, env = "INPUT_SARIF_REPORTS", hide = true)]
    action_input: Option<String>,

    /// Token used to authenticate against the GitHub API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository that receives the check run, as `owner/name`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Path to the webhook payload of the triggering `pull_request` event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Root of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Checkout directory that absolute SARIF paths are made relative to.
    #[arg(long, env = "GITHUB_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Read the diff from a file instead of fetching it from the pull request.
    #[arg(long, value_name = "PATH")]
    diff_file: Option<PathBuf>,

    /// Print the check-run payload as JSON instead of publishing it.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = parse_cli();

    if let Err(e) = pipeline::run(&cli) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn build_about() -> String {
    format!(
        r"
  {} annotates a pull request with the linter findings on the lines it added.

  Reads one or more SARIF reports, drops everything outside the diff, and
  publishes the rest as a check run that fails on any remaining error.",
        colors::accent().apply_to("sieve").bold()
    )
}
