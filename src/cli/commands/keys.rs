//! keys commands - Manage OpenPGP signing keys

use std::path::Path;

use anyhow::{anyhow, Context as _, Result};

use super::{block_on, flag};
use crate::api::{KeyAddArgs, KeyDeleteArgs, KeysUploadArgs};
use crate::cli::Context;
use crate::ui::output;

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Split a comma-separated committee list. An empty list names none.
fn committee_names(committees: &str) -> Vec<String> {
    if committees.is_empty() {
        Vec::new()
    } else {
        committees.split(',').map(str::to_string).collect()
    }
}

/// Add a public key for the configured user and print its fingerprint.
pub fn add(ctx: &Context, path: &Path, committees: &str) -> Result<()> {
    let key = read_text(path)?;
    let asfuid = ctx
        .store()?
        .asf_uid()?
        .ok_or_else(|| anyhow!("Please configure asf.uid before adding a key."))?;
    let args = KeyAddArgs {
        asfuid,
        key,
        committees: committee_names(committees),
    };
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.key_add(&args).await?) })?;
    output::print(results.fingerprint);
    Ok(())
}

/// Delete a key by fingerprint.
pub fn delete(ctx: &Context, fingerprint: &str) -> Result<()> {
    let api = ctx.api()?;
    let args = KeyDeleteArgs {
        fingerprint: fingerprint.to_string(),
    };
    let results = block_on(async { Ok(api.key_delete(&args).await?) })?;
    output::print(flag(results.success));
    Ok(())
}

/// Print a key as JSON.
pub fn get(ctx: &Context, fingerprint: &str) -> Result<()> {
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.key_get(fingerprint).await?) })?;
    output::print(output::json_compact(&results.key));
    Ok(())
}

/// Upload a KEYS file for a committee.
pub fn upload(ctx: &Context, path: &Path, committee: &str) -> Result<()> {
    let args = KeysUploadArgs {
        filetext: read_text(path)?,
        committee: committee.to_string(),
    };
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.keys_upload(&args).await?) })?;
    for result in &results.results {
        output::print(output::json_compact(result));
    }
    output::print(format!(
        "Successfully uploaded {} keys.",
        results.success_count
    ));
    output::print(format!("Failed to upload {} keys.", results.error_count));
    Ok(())
}

/// Print the keys of a user, one JSON object per line.
pub fn user(ctx: &Context, asf_uid: Option<String>) -> Result<()> {
    let asf_uid = ctx.asf_uid(asf_uid, "No ASF UID provided and asf.uid not configured.")?;
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.keys_user(&asf_uid).await?) })?;
    for key in &results.keys {
        output::print(output::json_compact(key));
    }
    Ok(())
}
