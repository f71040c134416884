//! checks commands - Report and wait for check results
//!
//! Checks only run while a release is a draft. `status` summarizes a
//! revision, the per-status commands list results grouped by path, and
//! `wait` polls until no checks are running.

use std::time::Duration;

use anyhow::{bail, Result};

use super::block_on;
use crate::api::ApiClient;
use crate::cli::Context;
use crate::ui::{display, output};

/// Phase in which checks run.
const DRAFT_PHASE: &str = "release_candidate_draft";

/// Shortest poll interval allowed against a server with verified TLS.
const MIN_INTERVAL_MS: u64 = 500;

/// List the results with one status, grouped by path.
pub fn by_status(
    ctx: &Context,
    status: &str,
    project: &str,
    version: &str,
    revision: &str,
    members: bool,
) -> Result<()> {
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.checks_list(project, version, revision).await?) })?;
    for line in display::checks_display_status(status, &results.checks, members) {
        output::print(line);
    }
    Ok(())
}

/// Summarize the results of a revision, by default the latest.
pub fn status(
    ctx: &Context,
    project: &str,
    version: &str,
    revision: Option<String>,
    verbose: bool,
) -> Result<()> {
    let api = ctx.api()?;
    block_on(status_async(&api, project, version, revision, verbose))
}

async fn status_async(
    api: &ApiClient,
    project: &str,
    version: &str,
    revision: Option<String>,
    verbose: bool,
) -> Result<()> {
    let release = api.release_get(project, version).await?.release;
    if release.phase != DRAFT_PHASE {
        output::print("Checks are not applicable for this release phase.");
        output::print("Checks are only performed during the draft phase.");
        return Ok(());
    }

    let revision = match revision.or(release.latest_revision_number) {
        Some(revision) => revision,
        None => bail!("No revision number found."),
    };

    let results = api.checks_list(project, version, &revision).await?;
    for line in display::checks_display(&results.checks, verbose) {
        output::print(line);
    }
    Ok(())
}

/// Poll until no checks are running or `timeout` seconds have passed.
pub fn wait(
    ctx: &Context,
    project: &str,
    version: &str,
    revision: Option<&str>,
    timeout: f64,
    interval_ms: u64,
) -> Result<()> {
    let host = ctx.host()?;
    validate_interval(host.verify_tls, timeout, interval_ms)?;
    let api = ctx.api()?;
    block_on(wait_async(&api, project, version, revision, timeout, interval_ms))?;
    output::print("Checks completed.");
    Ok(())
}

fn validate_interval(verify_tls: bool, timeout: f64, interval_ms: u64) -> Result<()> {
    if verify_tls && interval_ms < MIN_INTERVAL_MS {
        bail!("Interval must be at least 500ms.");
    }
    if interval_ms as f64 / 1000.0 > timeout {
        bail!("Interval must be less than timeout.");
    }
    Ok(())
}

async fn wait_async(
    api: &ApiClient,
    project: &str,
    version: &str,
    revision: Option<&str>,
    mut timeout: f64,
    interval_ms: u64,
) -> Result<()> {
    let interval = Duration::from_millis(interval_ms);
    loop {
        let ongoing = api.checks_ongoing(project, version, revision).await?.ongoing;
        if ongoing == 0 {
            return Ok(());
        }
        tracing::debug!(ongoing, remaining = timeout, "checks still running");
        tokio::time::sleep(interval).await;
        timeout -= interval.as_secs_f64();
        if timeout <= 0.0 {
            bail!("Timeout waiting for checks to complete.");
        }
    }
}
