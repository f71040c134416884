//! ssh commands - Manage SSH keys used for rsync uploads

use anyhow::Result;

use super::{block_on, flag};
use crate::api::{SshKeyAddArgs, SshKeyDeleteArgs};
use crate::cli::Context;
use crate::ui::output;

/// Add an SSH public key and print its fingerprint.
pub fn add(ctx: &Context, text: &str) -> Result<()> {
    let api = ctx.api()?;
    let args = SshKeyAddArgs {
        text: text.to_string(),
    };
    let results = block_on(async { Ok(api.ssh_key_add(&args).await?) })?;
    output::print(results.fingerprint);
    Ok(())
}

/// Delete an SSH key by fingerprint.
pub fn delete(ctx: &Context, fingerprint: &str) -> Result<()> {
    let api = ctx.api()?;
    let args = SshKeyDeleteArgs {
        fingerprint: fingerprint.to_string(),
    };
    let results = block_on(async { Ok(api.ssh_key_delete(&args).await?) })?;
    output::print(flag(results.success));
    Ok(())
}

/// Print the SSH keys of a user as a JSON array.
pub fn list(ctx: &Context, asf_uid: Option<String>) -> Result<()> {
    let asf_uid = ctx.asf_uid(asf_uid, "No ASF UID provided and asf.uid not configured.")?;
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.ssh_keys_list(&asf_uid).await?) })?;
    output::print(output::json_compact(&results.data));
    Ok(())
}
