//! release commands - Create, inspect, and populate releases

use std::path::Path;

use anyhow::{Context as _, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{block_on, flag};
use crate::api::{ProjectVersion, ReleaseUploadArgs};
use crate::cli::Context;
use crate::ui::{display, output};

/// Print a release as JSON.
pub fn info(ctx: &Context, project: &str, version: &str) -> Result<()> {
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.release_get(project, version).await?) })?;
    output::print(output::json_compact(&results.release));
    Ok(())
}

/// Print the releases of a project as a table.
pub fn list_releases(ctx: &Context, project: &str) -> Result<()> {
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.project_releases(project).await?) })?;
    for line in display::releases_display(&results.releases) {
        output::print(line);
    }
    Ok(())
}

/// Create a release and print it as JSON.
pub fn start(ctx: &Context, project: &str, version: &str) -> Result<()> {
    let api = ctx.api()?;
    let args = ProjectVersion::new(project, version);
    let results = block_on(async { Ok(api.release_create(&args).await?) })?;
    output::print(output::json_compact(&results.release));
    Ok(())
}

/// Print every path in a release revision.
pub fn list(ctx: &Context, project: &str, version: &str, revision: Option<&str>) -> Result<()> {
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.release_paths(project, version, revision).await?) })?;
    for rel_path in &results.rel_paths {
        output::print(rel_path);
    }
    Ok(())
}

/// Print every revision number of a release.
pub fn revisions(ctx: &Context, project: &str, version: &str) -> Result<()> {
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.release_revisions(project, version).await?) })?;
    for revision in &results.revisions {
        output::print(revision);
    }
    Ok(())
}

/// Upload one file into a release and print the new revision.
pub fn upload(
    ctx: &Context,
    project: &str,
    version: &str,
    relpath: &str,
    filepath: &Path,
) -> Result<()> {
    let content = std::fs::read(filepath)
        .with_context(|| format!("failed to read '{}'", filepath.display()))?;
    tracing::debug!(bytes = content.len(), relpath, "uploading file");

    let args = ReleaseUploadArgs {
        project: project.to_string(),
        version: version.to_string(),
        relpath: relpath.to_string(),
        content: STANDARD.encode(&content),
    };
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.release_upload(&args).await?) })?;
    output::print(output::json_compact(&results.revision));
    Ok(())
}

/// Delete a draft release and print whether it succeeded.
pub fn draft_delete(ctx: &Context, project: &str, version: &str) -> Result<()> {
    let api = ctx.api()?;
    let args = ProjectVersion::new(project, version);
    let results = block_on(async { Ok(api.release_draft_delete(&args).await?) })?;
    output::print(flag(results.success));
    Ok(())
}
