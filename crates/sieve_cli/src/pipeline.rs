//! One end-to-end run: resolve the configuration, index the diff, classify
//! every reported location, then publish or print the check run.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, bail};
use sieve_core::prelude::*;
use sieve_github::{GitHubClient, PullRequest, Repository};
#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::Cli;
use crate::ui;

/// The repository and pull request a run reports back to.
#[derive(Debug)]
struct Remote {
    client: GitHubClient,
    repo: Repository,
    pull_request: PullRequest,
}

impl Remote {
    fn connect(cli: &Cli) -> anyhow::Result<Self> {
        let token = cli
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .context("no GitHub token (set GITHUB_TOKEN or pass --token)")?;

        let repo: Repository = cli
            .repository
            .as_deref()
            .context("no repository (set GITHUB_REPOSITORY or pass --repository)")?
            .parse()?;

        let event_path = cli
            .event_path
            .as_deref()
            .context("no event payload (set GITHUB_EVENT_PATH or pass --event-path)")?;

        let pull_request = PullRequest::from_event_file(event_path)?;
        let client = GitHubClient::new(token, &cli.api_url)?;

        Ok(Self {
            client,
            repo,
            pull_request,
        })
    }
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.action_input.as_deref(), cli.sarif_reports.as_deref())?;

    let workspace = match &cli.workspace {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("failed to determine the working directory")?,
    };
    let paths = PathNormalizer::new(&workspace);

    let remote = if cli.dry_run && cli.diff_file.is_some() {
        None
    } else {
        Some(Remote::connect(cli)?)
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create async runtime: {e}"))?;

    let diff = match (&cli.diff_file, &remote) {
        (Some(path), _) => {
            fs::read_to_string(path).with_context(|| format!("failed to read diff file '{}'", path.display()))?
        }
        (None, Some(remote)) => {
            let number = remote.pull_request.number;
            rt.block_on(remote.client.fetch_diff(&remote.repo, number))
                .with_context(|| format!("failed to fetch the diff of pull request #{number}"))?
        }
        (None, None) => bail!("no diff to check against (pass --diff-file or run on a pull_request event)"),
    };

    let payload = analyse(&diff, &config, &paths)?;

    let total = payload.counts.total();
    ui::print_info(&format!(
        "{total} {} on changed lines across {} {}",
        ui::pluralise_word(total, "annotation", "annotations"),
        config.report_count(),
        ui::pluralise_word(config.report_count(), "report", "reports"),
    ));

    match remote {
        Some(remote) if !cli.dry_run => {
            let id = rt
                .block_on(
                    remote
                        .client
                        .create_check_run(&remote.repo, &remote.pull_request.head_sha, &payload),
                )
                .context("failed to publish the check run")?;

            ui::print_info(&format!("published check run {} to {}", id.0, remote.repo));
        }
        _ => println!("{}", serde_json::to_string_pretty(&payload)?),
    }

    ui::print_conclusion(&payload.output.summary, payload.conclusion);

    Ok(())
}

/// The action input wins over `SARIF_REPORTS` unless it is blank.
fn resolve_config(action_input: Option<&str>, sarif_reports: Option<&str>) -> Result<Config, ConfigError> {
    let list = action_input
        .filter(|input| !input.trim().is_empty())
        .or(sarif_reports)
        .unwrap_or_default();

    Config::from_report_list(list)
}

/// Indexes `diff` and classifies every configured report against it.
fn analyse(diff: &str, config: &Config, paths: &PathNormalizer) -> Result<CheckRunPayload, SieveError> {
    let changed = ChangedLines::from_diff(diff)?;

    #[cfg(feature = "tracing")]
    debug!(
        files = changed.file_count(),
        lines = changed.line_count(),
        "indexed added lines"
    );

    let violations = collect_violations(config, &changed, paths)?;

    #[cfg(feature = "tracing")]
    debug!(
        violations = violations.len(),
        on_changed_lines = violations.iter().filter(|v| v.was_changed()).count(),
        "classified violations"
    );

    Ok(build_check_run(&violations))
}

/// Reads each report in order. Unreadable reports are skipped with a
/// warning; a report that is not valid SARIF aborts the run.
fn collect_violations(
    config: &Config,
    changed: &ChangedLines,
    paths: &PathNormalizer,
) -> Result<Vec<Violation>, SieveError> {
    let mut violations = Vec::new();

    for report in config.sarif_reports() {
        let content = match fs::read_to_string(report) {
            Ok(content) => content,
            Err(e) => {
                skip_report(report, &e);
                continue;
            }
        };

        let log = SarifLog::from_json(&content).map_err(|source| SieveError::Report {
            path: report.to_path_buf(),
            source,
        })?;

        violations.extend(extract_violations(&log, changed, paths));
    }

    Ok(violations)
}

fn skip_report(path: &Path, error: &io::Error) {
    #[cfg(feature = "tracing")]
    warn!(path = %path.display(), %error, "skipping unreadable report");

    ui::print_warning(&format!("skipping report '{}': {error}", path.display()));
}
