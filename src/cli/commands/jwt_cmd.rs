//! jwt commands - Inspect and refresh the stored JWT

use anyhow::{bail, Result};
use serde_json::Value;

use super::{block_on, config_cmd};
use crate::auth::{jwt, JWT_KEY};
use crate::cli::Context;
use crate::ui::{display, output};

/// Claims holding Unix timestamps.
const TIMESTAMP_CLAIMS: [&str; 3] = ["exp", "iat", "nbf"];

/// Print the decoded claims of the stored JWT.
pub fn dump(ctx: &Context) -> Result<()> {
    let Some(token) = ctx.jwt_manager()?.stored()? else {
        bail!("No JWT stored in configuration.");
    };
    let claims = jwt::dump(&token)?;
    output::print(output::json_spaced(&claims));
    Ok(())
}

/// Print the claims of the stored JWT one per line.
pub fn info(ctx: &Context) -> Result<()> {
    let Some((_, claims)) = ctx.jwt_manager()?.payload()? else {
        bail!("No JWT stored in configuration.");
    };
    for line in info_lines(&claims) {
        output::print(line);
    }
    Ok(())
}

fn info_lines(claims: &jwt::Claims) -> Vec<String> {
    claims
        .iter()
        .map(|(key, value)| {
            let rendered = if TIMESTAMP_CLAIMS.contains(&key.as_str()) && !value.is_null() {
                display::timestamp_format(Some(value)).unwrap_or_default()
            } else {
                plain(value)
            };
            format!("{}: {}", jwt::title_case(key), rendered)
        })
        .collect()
}

/// Render a claim value as bare text.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(b) => super::flag(*b).to_string(),
        other => output::json_spaced(other),
    }
}

/// Exchange the stored PAT for a new JWT and print it.
pub fn refresh(ctx: &Context, asf_uid: Option<&str>) -> Result<()> {
    let manager = ctx.jwt_manager()?;
    let token = block_on(async { Ok(manager.refresh(asf_uid).await?) })?;
    output::print(token);
    Ok(())
}

/// Print the stored JWT.
pub fn show(ctx: &Context) -> Result<()> {
    config_cmd::show(ctx, JWT_KEY)
}
