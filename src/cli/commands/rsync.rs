//! rsync command - Upload a directory into a release over SSH
//!
//! Runs the system `rsync` against the server's SSH endpoint on port 2222,
//! logging in as the configured ASF UID.

use std::process::Command;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;

/// SSH command used as the rsync transport.
const SSH_TRANSPORT: &str = "ssh -p 2222";

/// Normalize the local source so rsync copies its contents.
fn source_dir(source: &str) -> String {
    if source.ends_with('/') {
        source.to_string()
    } else {
        format!("{}/", source)
    }
}

/// Normalize the target directory within the release.
///
/// A leading `./` or `/` is removed. A non-empty target gets a trailing
/// slash; an empty one means the release root.
fn target_dir(target: &str) -> String {
    let target = target
        .strip_prefix("./")
        .or_else(|| target.strip_prefix('/'))
        .unwrap_or(target);
    if target.is_empty() || target.ends_with('/') {
        target.to_string()
    } else {
        format!("{}/", target)
    }
}

/// The rsync destination for a release directory.
pub fn remote_target(
    asf_uid: &str,
    domain: &str,
    project: &str,
    version: &str,
    target: &str,
) -> String {
    format!(
        "{}@{}:/{}/{}/{}",
        asf_uid,
        domain,
        project,
        version,
        target_dir(target)
    )
}

/// Upload `source` into `target` within a release.
pub fn rsync(
    ctx: &Context,
    project: &str,
    version: &str,
    source: &str,
    target: &str,
) -> Result<()> {
    let Some(asf_uid) = ctx.store()?.asf_uid()? else {
        bail!("Please configure asf.uid before uploading.");
    };
    let host = ctx.host()?;
    let source = source_dir(source);
    let remote = remote_target(&asf_uid, host.domain(), project, version, target);

    tracing::debug!(%source, %remote, "running rsync");
    let status = Command::new("rsync")
        .args(["-av", "-e", SSH_TRANSPORT])
        .arg(&source)
        .arg(&remote)
        .status()
        .context("failed to run rsync")?;

    if !status.success() {
        bail!("rsync failed: {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_gets_trailing_slash() {
        assert_eq!(source_dir("."), "./");
        assert_eq!(source_dir("dist/"), "dist/");
    }

    #[test]
    fn target_normalization() {
        assert_eq!(target_dir("/"), "");
        assert_eq!(target_dir("./"), "");
        assert_eq!(target_dir("source"), "source/");
        assert_eq!(target_dir("/source/"), "source/");
        assert_eq!(target_dir("./a/b"), "a/b/");
    }

    #[test]
    fn remote_uses_domain_without_port() {
        assert_eq!(
            remote_target("alice", "localhost.apache.org", "p", "1.0", "/"),
            "alice@localhost.apache.org:/p/1.0/"
        );
        assert_eq!(
            remote_target("alice", "release-test.apache.org", "p", "1.0", "dist"),
            "alice@release-test.apache.org:/p/1.0/dist/"
        );
    }
}
