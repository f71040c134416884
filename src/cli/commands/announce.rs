//! announce command - Announce a finished release

use anyhow::{bail, Result};

use super::block_on;
use crate::api::ReleaseAnnounceArgs;
use crate::cli::Context;
use crate::ui::output;

/// Options for `announce`.
#[derive(Debug, Clone, Copy)]
pub struct AnnounceOptions<'a> {
    pub project: &'a str,
    pub version: &'a str,
    pub revision: &'a str,
    pub mailing_list: &'a str,
    pub subject: Option<&'a str>,
    pub body: Option<&'a str>,
    pub path_suffix: Option<&'a str>,
}

impl AnnounceOptions<'_> {
    fn to_args(self) -> ReleaseAnnounceArgs {
        let or_default = |value: Option<&str>, default: String| {
            value
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(default)
        };
        ReleaseAnnounceArgs {
            project: self.project.to_string(),
            version: self.version.to_string(),
            revision: self.revision.to_string(),
            email_to: self.mailing_list.to_string(),
            subject: or_default(
                self.subject,
                format!("[ANNOUNCE] Release {} {}", self.project, self.version),
            ),
            body: or_default(
                self.body,
                format!(
                    "Release {} {} has been announced.",
                    self.project, self.version
                ),
            ),
            path_suffix: self.path_suffix.unwrap_or_default().to_string(),
        }
    }
}

/// Announce a release.
pub fn announce(ctx: &Context, options: AnnounceOptions<'_>) -> Result<()> {
    let args = options.to_args();
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.release_announce(&args).await?) })?;
    if !results.success {
        bail!("Failed to announce release.");
    }
    output::print("Announcement sent.");
    Ok(())
}
