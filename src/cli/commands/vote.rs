//! vote commands - Start, tabulate, and resolve release votes

use std::path::Path;

use anyhow::{Context as _, Result};

use super::block_on;
use crate::api::{ProjectVersion, VoteResolveArgs, VoteStartArgs};
use crate::cli::args::Resolution;
use crate::cli::Context;
use crate::ui::output;

/// Options for `vote start`.
#[derive(Debug, Clone, Copy)]
pub struct StartOptions<'a> {
    pub project: &'a str,
    pub version: &'a str,
    pub revision: &'a str,
    pub mailing_list: &'a str,
    /// Vote duration in hours.
    pub duration: u32,
    pub subject: Option<&'a str>,
    /// File holding the email body.
    pub body: Option<&'a Path>,
}

impl StartOptions<'_> {
    fn to_args(self, body_text: Option<String>) -> VoteStartArgs {
        VoteStartArgs {
            project: self.project.to_string(),
            version: self.version.to_string(),
            revision: self.revision.to_string(),
            email_to: self.mailing_list.to_string(),
            vote_duration: self.duration,
            subject: self
                .subject
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("[VOTE] Release {} {}", self.project, self.version)),
            body: body_text.filter(|b| !b.is_empty()).unwrap_or_else(|| {
                format!(
                    "Release {} {} is ready for voting.",
                    self.project, self.version
                )
            }),
        }
    }
}

/// Mark a vote as passed or failed.
pub fn resolve(ctx: &Context, project: &str, version: &str, resolution: Resolution) -> Result<()> {
    let api = ctx.api()?;
    let args = VoteResolveArgs {
        project: project.to_string(),
        version: version.to_string(),
        resolution: resolution.as_str().to_string(),
    };
    block_on(async { Ok(api.vote_resolve(&args).await?) })?;
    output::print(format!("Vote marked as {}.", resolution.as_str()));
    Ok(())
}

/// Start a vote and print the email task.
pub fn start(ctx: &Context, options: StartOptions<'_>) -> Result<()> {
    let body_text = match options.body {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?,
        ),
        None => None,
    };
    let args = options.to_args(body_text);
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.vote_start(&args).await?) })?;
    output::print(output::json_compact(&results.task));
    Ok(())
}

/// Print the tabulated vote.
pub fn tabulate(ctx: &Context, project: &str, version: &str) -> Result<()> {
    let api = ctx.api()?;
    let args = ProjectVersion::new(project, version);
    let results = block_on(async { Ok(api.vote_tabulate(&args).await?) })?;
    output::print(output::json_pretty(&results));
    Ok(())
}
