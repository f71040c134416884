//! verify
//!
//! Artifact signature verification.
//!
//! # Flow
//!
//! 1. Pair the artifact URL with its detached `.asc` signature URL
//! 2. Download both and compute their SHA3-256 digests
//! 3. Ask the server which published key made the signature
//!    (`/signature/provenance`)
//! 4. Check the signature against that key with [`openpgp::check`]
//!
//! Steps 2 and 3 need network access and are driven by the `verify`
//! command; this module holds the pure parts.

pub mod openpgp;

pub use openpgp::{check, BadSignature, Report, Verdict};

use sha3::{Digest, Sha3_256};
use thiserror::Error;

use crate::api::SignatureProvenanceArgs;

/// Suffix of detached armored signatures.
pub const SIGNATURE_SUFFIX: &str = ".asc";

/// Errors from signature verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid OpenPGP data: {0}")]
    OpenPgp(#[from] pgp::errors::Error),

    #[error("no usable public key found in the key text")]
    NoKey,

    #[error("no signatures found in the signature file")]
    NoSignature,

    #[error("Signature is empty: {0}")]
    EmptySignature(String),

    #[error("There was an uncertain mixture of good and bad signatures.")]
    Mixed,

    #[error("The signature is not valid!")]
    Invalid,
}

/// Which URL the user supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provided {
    Artifact,
    Signature,
}

/// An artifact URL and its detached signature URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactUrls {
    pub artifact: String,
    pub signature: String,
    pub provided: Provided,
}

impl ArtifactUrls {
    /// Pair a URL with its counterpart.
    ///
    /// A URL ending in `.asc` is the signature and the artifact is the same
    /// URL without the suffix. Any other URL is the artifact and the
    /// signature is `<url>.asc`.
    pub fn from_url(url: &str) -> Self {
        match url.strip_suffix(SIGNATURE_SUFFIX) {
            Some(artifact) => Self {
                artifact: artifact.to_string(),
                signature: url.to_string(),
                provided: Provided::Signature,
            },
            None => Self {
                artifact: url.to_string(),
                signature: format!("{}{}", url, SIGNATURE_SUFFIX),
                provided: Provided::Artifact,
            },
        }
    }

    pub fn artifact_file_name(&self) -> &str {
        file_name(&self.artifact)
    }

    pub fn signature_file_name(&self) -> &str {
        file_name(&self.signature)
    }
}

/// The last path segment of a URL.
pub fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Lowercase hex SHA3-256 of `data`.
pub fn sha3_256_hex(data: &[u8]) -> String {
    hex::encode(Sha3_256::digest(data))
}

/// Build the provenance request for a downloaded artifact and signature.
///
/// # Errors
///
/// [`VerifyError::EmptySignature`] if the signature download was empty.
pub fn provenance_args(
    urls: &ArtifactUrls,
    artifact: &[u8],
    signature: &[u8],
) -> Result<SignatureProvenanceArgs, VerifyError> {
    if signature.is_empty() {
        return Err(VerifyError::EmptySignature(urls.signature.clone()));
    }
    Ok(SignatureProvenanceArgs {
        artifact_file_name: urls.artifact_file_name().to_string(),
        artifact_sha3_256: sha3_256_hex(artifact),
        signature_file_name: urls.signature_file_name().to_string(),
        signature_asc_text: signature.utf8_chunks().map(|c| c.valid()).collect(),
        signature_sha3_256: sha3_256_hex(signature),
    })
}

/// Map a report to the command outcome.
pub fn conclude(report: &Report) -> Result<(), VerifyError> {
    match report.verdict() {
        Verdict::Valid => Ok(()),
        Verdict::Mixed => Err(VerifyError::Mixed),
        Verdict::Invalid => Err(VerifyError::Invalid),
    }
}
