//! dev commands - Helpers for developing against a test server

use std::ffi::OsString;
use std::fs;

use anyhow::{bail, Context as _, Result};
use rand::Rng;

use super::block_on;
use crate::api::ProjectVersion;
use crate::cli::Context;
use crate::ui::output;

/// Public half of the shared tooling test key.
const TEST_KEY: &str = include_str!("tooling-public-test.asc");

/// File `dev key` writes in the working directory.
const TEST_KEY_FILE: &str = "tooling-public-test.asc";

/// Prefix of the environment variables `dev env` reports.
const ENV_PREFIX: &str = "ATR_";

/// Length of `dev token` output.
const TOKEN_LEN: usize = 16;

/// Delete a release of any phase.
pub fn delete(ctx: &Context, project: &str, version: &str) -> Result<()> {
    let api = ctx.api()?;
    let args = ProjectVersion::new(project, version);
    block_on(async { Ok(api.release_delete(&args).await?) })?;
    output::print(format!("{}-{}", project, version));
    Ok(())
}

/// Print the `ATR_*` environment variables.
pub fn env() -> Result<()> {
    for line in env_lines(std::env::vars_os()) {
        output::print(line);
    }
    Ok(())
}

fn env_lines(vars: impl Iterator<Item = (OsString, OsString)>) -> Vec<String> {
    let mut vars: Vec<(String, String)> = vars
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .collect();
    vars.sort();

    let mut lines: Vec<String> = vars
        .iter()
        .map(|(k, v)| format!("{}={}", k, output::json_spaced(v)))
        .collect();
    lines.push(format!(
        "There are {} ATR_* environment variables.",
        vars.len()
    ));
    lines
}

/// Write the test key to the working directory.
pub fn key() -> Result<()> {
    fs::write(TEST_KEY_FILE, TEST_KEY)
        .with_context(|| format!("failed to write '{}'", TEST_KEY_FILE))?;
    Ok(())
}

/// Print the PAT kept in `~/.atr-pat`.
pub fn pat() -> Result<()> {
    let path = dirs::home_dir().map(|home| home.join(".atr-pat"));
    let Some(path) = path.filter(|p| p.exists()) else {
        bail!("~/.atr-pat not found.");
    };
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    output::print(text.strip_suffix('\n').unwrap_or(&text));
    Ok(())
}

/// Print the working directory.
pub fn pwd() -> Result<()> {
    output::print(std::env::current_dir()?.display());
    Ok(())
}

/// Print a random token of lowercase letters.
pub fn token() -> Result<()> {
    output::print(random_token(&mut rand::rng()));
    Ok(())
}

/// Draw letters by rejection sampling five random bits, so each of the
/// 26 letters is equally likely.
fn random_token(rng: &mut impl Rng) -> String {
    let mut label = String::with_capacity(TOKEN_LEN);
    while label.len() < TOKEN_LEN {
        let bits = rng.random::<u8>() & 0b1_1111;
        if bits < 26 {
            label.push(char::from(b'a' + bits));
        }
    }
    label
}

/// Print `$USER`.
pub fn user() -> Result<()> {
    let user = std::env::var("USER").context("USER is not set")?;
    output::print(user);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn tokens_are_lowercase_letters() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let token = random_token(&mut rng);
            assert_eq!(token.len(), TOKEN_LEN);
            assert!(token.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn env_lists_sorted_atr_variables() {
        let vars = vec![
            (OsString::from("PATH"), OsString::from("/bin")),
            (OsString::from("ATR_B"), OsString::from("two")),
            (OsString::from("ATR_A"), OsString::from("say \"hi\"")),
        ];
        assert_eq!(
            env_lines(vars.into_iter()),
            vec![
                "ATR_A=\"say \\\"hi\\\"\"",
                "ATR_B=\"two\"",
                "There are 2 ATR_* environment variables.",
            ]
        );
    }

    #[test]
    fn env_counts_zero() {
        assert_eq!(
            env_lines(std::iter::empty()),
            vec!["There are 0 ATR_* environment variables."]
        );
    }

    #[test]
    fn test_key_is_armored() {
        assert!(TEST_KEY.starts_with("-----BEGIN PGP PUBLIC KEY BLOCK-----\n"));
        assert!(TEST_KEY.ends_with("-----END PGP PUBLIC KEY BLOCK-----\n"));
        use pgp::Deserializable;
        assert!(pgp::SignedPublicKey::from_string(TEST_KEY).is_ok());
    }
}
