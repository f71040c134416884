//! api command - Call an API endpoint directly
//!
//! Trailing `--key value` or `--key=value` pairs become a JSON object of
//! strings that is POSTed to the endpoint with the stored JWT.

use anyhow::{bail, Result};
use serde_json::{Map, Value};

use super::block_on;
use crate::cli::Context;
use crate::ui::output;

/// Parse trailing `--key value` pairs into a JSON object.
///
/// Hyphens in keys become underscores. `--_version` is accepted as an
/// alias for `--version`, which the argument parser reserves.
pub fn parse_pairs(args: &[String]) -> Result<Map<String, Value>> {
    let mut pairs = Map::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let Some(flag) = arg.strip_prefix("--") else {
            bail!("Unexpected argument: {}", arg);
        };
        let (key, value) = match flag.split_once('=') {
            Some((key, value)) => (key, value.to_string()),
            None => match iter.next() {
                Some(value) => (flag, value.clone()),
                None => bail!("Missing value for --{}", flag),
            },
        };
        if key.is_empty() {
            bail!("Unexpected argument: {}", arg);
        }
        let mut key = key.replace('-', "_");
        if key == "_version" {
            key = "version".to_string();
        }
        pairs.insert(key, Value::String(value));
    }
    Ok(pairs)
}

/// POST the pairs to `path` and print the JSON response.
pub fn api(ctx: &Context, path: &str, args: &[String]) -> Result<()> {
    let body = Value::Object(parse_pairs(args)?);
    let api = ctx.api()?;
    let url = api.endpoint_url(path);
    tracing::debug!(%url, "calling API directly");
    let response = block_on(async { Ok(api.post_json(&url, &body).await?) })?;
    output::print(output::json_spaced(&response));
    Ok(())
}
