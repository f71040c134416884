//! verify command - Check an artifact's signature against the ATR's key
//!
//! With `--verbose` every step is narrated so that the output doubles as an
//! explanation of how release verification works.

use anyhow::Result;
use serde_json::Value;

use super::block_on;
use crate::api::{self, ApiClient, SignatureProvenanceArgs};
use crate::cli::Context;
use crate::ui::display::thousands;
use crate::ui::output::{self, narrate, Verbosity};
use crate::verify::{self, ArtifactUrls, Provided, Verdict};

/// Characters of the signature text shown in the narrated request.
const SIGNATURE_PREVIEW_CHARS: usize = 32;

/// Verify the artifact at `url`, or the artifact signed by the `.asc` at
/// `url`.
pub fn verify(ctx: &Context, url: &str, verbose: bool, verify_tls: bool) -> Result<()> {
    let api = ctx.api()?;
    block_on(verify_async(
        &api,
        url,
        Verbosity::from_flag(verbose),
        verify_tls,
    ))
}

async fn verify_async(
    api: &ApiClient,
    url: &str,
    verbosity: Verbosity,
    verify_tls: bool,
) -> Result<()> {
    let say = |message: &str| narrate(message, verbosity);

    let urls = ArtifactUrls::from_url(url);
    match urls.provided {
        Provided::Signature => {
            say("You provided the signature file URL:\n");
            say(&format!("{}\n", urls.signature));
            say("And we will assume that the artifact file URL is here:\n");
            say(&urls.artifact);
        }
        Provided::Artifact => {
            say("You provided the artifact file URL:\n");
            say(&format!("{}\n", urls.artifact));
            say("And we will assume that the signature file URL is here:\n");
            say(&urls.signature);
        }
    }
    say("");

    say("We will now download the artifact and then the signature from these URLs.\n");
    let artifact = api::download(&urls.artifact, verify_tls).await?;
    let signature = api::download(&urls.signature, verify_tls).await?;
    let args = verify::provenance_args(&urls, &artifact, &signature)?;

    say(&format!(
        "The artifact file is {} bytes in size, and its SHA3-256 is:\n",
        thousands(artifact.len() as u64)
    ));
    say(&format!("{}\n", args.artifact_sha3_256));
    say(&format!(
        "The signature file is {} bytes in size, and its SHA3-256 is:\n",
        thousands(signature.len() as u64)
    ));
    say(&args.signature_sha3_256);
    say("");

    say("To verify the signature, we need the OpenPGP signing key from the ATR.\n");
    say("To get the key, we are going to send the following API request:\n");
    say(&output::json_pretty(&request_preview(&args)?));
    say("");

    let provenance = api.signature_provenance(&args).await?;
    say("The ATR found a matching OpenPGP key with the following fingerprint:\n");
    say(&format!("{}\n", provenance.fingerprint.to_uppercase()));
    say("This key is associated with these committees with a project containing the artifact:\n");
    for found in &provenance.committees_with_artifact {
        say(&format!("-- {} --", found.committee));
        say(&format!("KEYS URL: {}", found.keys_file_url));
        say(&format!("SHA3-256: {}", found.keys_file_sha3_256));
        say("");
    }

    say("We can now try to verify the signature using the OpenPGP key from the ATR.\n");
    say("Note that we ignore key expiry, so we consider expired key signatures to be valid.\n");
    let report = verify::check(&provenance.key_asc_text, &signature, &artifact)?;
    tracing::debug!(good = report.good, bad = report.bad.len(), "checked signatures");

    if report.verdict() == Verdict::Invalid {
        for issue in report.issues() {
            output::print(format!(
                "The verification package reported the following issue: {}",
                issue
            ));
        }
    }
    verify::conclude(&report)?;

    match verbosity {
        Verbosity::Verbose => {
            output::print("The signature is valid! This completes the verification process.")
        }
        Verbosity::Normal => output::print("The signature is valid!"),
    }
    Ok(())
}

/// The provenance request with the signature text shortened for display.
fn request_preview(args: &SignatureProvenanceArgs) -> Result<Value> {
    let mut value = serde_json::to_value(args)?;
    if let Some(text) = value.get_mut("signature_asc_text") {
        let preview: String = args
            .signature_asc_text
            .chars()
            .take(SIGNATURE_PREVIEW_CHARS)
            .collect();
        *text = Value::String(format!("{}...", preview));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_signature_text() {
        let args = SignatureProvenanceArgs {
            artifact_file_name: "example-1.0.tar.gz".into(),
            artifact_sha3_256: "aa".into(),
            signature_file_name: "example-1.0.tar.gz.asc".into(),
            signature_asc_text: "-----BEGIN PGP SIGNATURE-----\n\niQIzBAABCgAdFiEE".into(),
            signature_sha3_256: "bb".into(),
        };
        let preview = request_preview(&args).unwrap();
        assert_eq!(
            preview["signature_asc_text"],
            "-----BEGIN PGP SIGNATURE-----\n\ni..."
        );
        assert_eq!(preview["artifact_file_name"], "example-1.0.tar.gz");
        let keys: Vec<&String> = preview.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec![
                "artifact_file_name",
                "artifact_sha3_256",
                "signature_file_name",
                "signature_asc_text",
                "signature_sha3_256",
            ]
        );
    }

    #[test]
    fn short_signature_text_still_gets_ellipsis() {
        let args = SignatureProvenanceArgs {
            artifact_file_name: "a".into(),
            artifact_sha3_256: "b".into(),
            signature_file_name: "a.asc".into(),
            signature_asc_text: "sig".into(),
            signature_sha3_256: "c".into(),
        };
        assert_eq!(request_preview(&args).unwrap()["signature_asc_text"], "sig...");
    }
}
