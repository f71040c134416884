//! config commands - Set, show, and drop configuration values
//!
//! Keys use dot notation (`asf.uid`, `tokens.jwt`). Every access goes
//! through the locked [`ConfigStore`](crate::config::ConfigStore).

use std::fs;

use anyhow::{bail, Result};

use crate::cli::Context;
use crate::config::display_value;
use crate::ui::output;

/// Set a configuration value.
pub fn set(ctx: &Context, path: &str, value: &str) -> Result<()> {
    let changed = ctx.store()?.set_string(path, value)?;
    tracing::debug!(key = path, changed, "set configuration value");
    output::print(format!("Set {} to {}.", path, output::json_spaced(value)));
    Ok(())
}

/// Show a configuration value.
pub fn show(ctx: &Context, path: &str) -> Result<()> {
    match ctx.store()?.get_value(path)? {
        Some(value) if !value.is_null() => {
            output::print(display_value(&value));
            Ok(())
        }
        _ => bail!("Could not find {} in the configuration file.", path),
    }
}

/// Remove a configuration value.
pub fn drop(ctx: &Context, path: &str) -> Result<()> {
    if ctx.store()?.drop_key(path)?.is_none() {
        bail!("Could not find {} in the configuration file", path);
    }
    output::print(format!("Removed {}.", path));
    Ok(())
}

/// Print the configuration file as stored.
pub fn file(ctx: &Context) -> Result<()> {
    let path = ctx.store()?.path();
    if !path.exists() {
        bail!("No configuration file found.");
    }
    let contents = fs::read_to_string(path)?;
    print!("{}", contents);
    Ok(())
}

/// Print the configuration file path.
pub fn path(ctx: &Context) -> Result<()> {
    output::print(ctx.store()?.path().display());
    Ok(())
}
