//! verify::openpgp
//!
//! Detached signature verification against a published key.
//!
//! Every signature in the signature file is checked against the primary
//! key and each subkey of the key text. Key expiry and revocation are never
//! consulted: a signature made by a key that has since expired is still
//! reported as good.

use pgp::types::PublicKeyTrait;
use pgp::{Deserializable, SignedPublicKey, StandaloneSignature};

use super::VerifyError;

/// A signature that failed to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadSignature {
    /// Issuer fingerprint or key ID as named by the signature.
    pub issuer: String,
    /// Reasons reported for each candidate key.
    pub issues: Vec<String>,
}

/// Result of checking every signature in a signature file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub good: usize,
    pub bad: Vec<BadSignature>,
}

/// Overall judgement on a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Mixed,
    Invalid,
}

impl Report {
    pub fn verdict(&self) -> Verdict {
        match (self.good, self.bad.is_empty()) {
            (_, true) => Verdict::Valid,
            (0, false) => Verdict::Invalid,
            (_, false) => Verdict::Mixed,
        }
    }

    /// Every issue across all bad signatures, in order.
    pub fn issues(&self) -> impl Iterator<Item = &str> {
        self.bad
            .iter()
            .flat_map(|bad| bad.issues.iter().map(String::as_str))
    }
}

/// Check a detached signature over `data` against `key_text`.
///
/// `key_text` holds one or more transferable public keys, armored or
/// binary. `signature` may likewise be armored or binary and may hold
/// several signature packets.
///
/// # Errors
///
/// Fails only if the key or signature cannot be decoded at all. Signatures
/// that decode but do not verify are reported in [`Report::bad`].
pub fn check(key_text: &str, signature: &[u8], data: &[u8]) -> Result<Report, VerifyError> {
    let (keys, _) = SignedPublicKey::from_reader_many(key_text.as_bytes())?;
    let keys = keys.collect::<Result<Vec<_>, _>>()?;
    if keys.is_empty() {
        return Err(VerifyError::NoKey);
    }

    let (signatures, _) = StandaloneSignature::from_reader_many(signature)?;
    let signatures = signatures.collect::<Result<Vec<_>, _>>()?;
    if signatures.is_empty() {
        return Err(VerifyError::NoSignature);
    }

    let mut report = Report::default();
    for sig in &signatures {
        match check_one(&keys, sig, data) {
            Ok(()) => report.good += 1,
            Err(issues) => report.bad.push(BadSignature {
                issuer: issuer(sig),
                issues,
            }),
        }
    }

    tracing::debug!(
        keys = keys.len(),
        good = report.good,
        bad = report.bad.len(),
        "checked signatures"
    );
    Ok(report)
}

fn check_one(
    keys: &[SignedPublicKey],
    sig: &StandaloneSignature,
    data: &[u8],
) -> Result<(), Vec<String>> {
    let mut attempts = Attempts::default();
    for key in keys {
        attempts.try_key(&key.primary_key, sig, data);
        for subkey in &key.public_subkeys {
            attempts.try_key(&subkey.key, sig, data);
        }
        if attempts.verified {
            return Ok(());
        }
    }

    if attempts.candidates == 0 {
        return Err(vec![format!(
            "issuer {} is not the signing key or one of its subkeys",
            issuer(sig)
        )]);
    }
    Err(attempts.issues)
}

/// Outcome of trying a signature against successive keys.
#[derive(Default)]
struct Attempts {
    candidates: usize,
    verified: bool,
    issues: Vec<String>,
}

impl Attempts {
    fn try_key(&mut self, key: &impl PublicKeyTrait, sig: &StandaloneSignature, data: &[u8]) {
        if self.verified || !issued_by(sig, key) {
            return;
        }
        self.candidates += 1;
        match sig.verify(key, data) {
            Ok(()) => self.verified = true,
            Err(e) => {
                let issue = e.to_string();
                if !self.issues.contains(&issue) {
                    self.issues.push(issue);
                }
            }
        }
    }
}

/// Whether the signature names `key` as its issuer.
fn issued_by(sig: &StandaloneSignature, key: &impl PublicKeyTrait) -> bool {
    let fingerprint = key.fingerprint();
    let key_id = key.key_id();
    sig.signature.issuer_fingerprint().into_iter().any(|fp| *fp == fingerprint)
        || sig.signature.issuer().into_iter().any(|id| *id == key_id)
}

/// The issuer fingerprint, or the key ID when the signature carries none.
fn issuer(sig: &StandaloneSignature) -> String {
    if let Some(fp) = sig.signature.issuer_fingerprint().first() {
        return hex::encode_upper(fp.as_bytes());
    }
    sig.signature
        .issuer()
        .first()
        .map(|id| format!("{:X}", id))
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> Vec<u8> {
        let path = format!("{}/tests/fixtures/openpgp/{}", env!("CARGO_MANIFEST_DIR"), name);
        std::fs::read(path).expect("read fixture")
    }

    fn key(name: &str) -> String {
        String::from_utf8(fixture(name)).expect("utf-8 key")
    }

    fn artifact() -> Vec<u8> {
        fixture("artifact.txt")
    }

    #[test]
    fn rsa_armored_signature_is_valid() {
        let report = check(&key("rsa.asc"), &fixture("rsa.sig.asc"), &artifact()).unwrap();
        assert_eq!(report.verdict(), Verdict::Valid);
        assert_eq!(report.good, 1);
    }

    #[test]
    fn ed25519_binary_and_armored_are_valid() {
        for sig in ["ed25519.sig", "ed25519.sig.asc"] {
            let report = check(&key("ed25519.asc"), &fixture(sig), &artifact()).unwrap();
            assert_eq!(report.verdict(), Verdict::Valid, "{}", sig);
        }
    }

    #[test]
    fn dsa_signature_is_valid() {
        let report = check(&key("dsa.asc"), &fixture("dsa.sig.asc"), &artifact()).unwrap();
        assert_eq!(report.verdict(), Verdict::Valid);
        assert_eq!(report.good, 1);
    }

    #[test]
    fn ecdsa_p256_signature_is_valid() {
        let report = check(&key("ecdsa.asc"), &fixture("ecdsa.sig.asc"), &artifact()).unwrap();
        assert_eq!(report.verdict(), Verdict::Valid);
        assert_eq!(report.good, 1);
    }

    #[test]
    fn dsa_and_ecdsa_reject_tampered_data() {
        let mut data = artifact();
        data.push(b'!');
        for (k, sig) in [("dsa.asc", "dsa.sig.asc"), ("ecdsa.asc", "ecdsa.sig.asc")] {
            let report = check(&key(k), &fixture(sig), &data).unwrap();
            assert_eq!(report.verdict(), Verdict::Invalid, "{}", sig);
        }
    }

    #[test]
    fn subkey_signature_is_valid() {
        let report = check(&key("subkey.asc"), &fixture("subkey.sig.asc"), &artifact()).unwrap();
        assert_eq!(report.verdict(), Verdict::Valid);
    }

    #[test]
    fn expired_key_is_still_valid() {
        let report = check(&key("expired.asc"), &fixture("expired.sig.asc"), &artifact()).unwrap();
        assert_eq!(report.verdict(), Verdict::Valid);
    }

    #[test]
    fn signature_over_other_data_is_invalid() {
        let report = check(&key("ed25519.asc"), &fixture("ed_other.sig"), &artifact()).unwrap();
        assert_eq!(report.verdict(), Verdict::Invalid);
        assert_eq!(report.bad.len(), 1);
        assert!(report.issues().next().is_some());
    }

    #[test]
    fn tampered_artifact_is_invalid() {
        let mut data = artifact();
        data.push(b'!');
        let report = check(&key("rsa.asc"), &fixture("rsa.sig.asc"), &data).unwrap();
        assert_eq!(report.verdict(), Verdict::Invalid);
    }

    #[test]
    fn good_and_bad_is_mixed() {
        let report = check(&key("ed25519.asc"), &fixture("mixed.sig"), &artifact()).unwrap();
        assert_eq!(report.good, 1);
        assert_eq!(report.bad.len(), 1);
        assert_eq!(report.verdict(), Verdict::Mixed);
    }

    #[test]
    fn wrong_key_reports_issuer() {
        let report = check(&key("rsa.asc"), &fixture("ed25519.sig"), &artifact()).unwrap();
        assert_eq!(report.verdict(), Verdict::Invalid);
        assert_eq!(report.bad[0].issuer, "99B06E497F81FC58ECB7F07B1625551CD29B01D7");
        let issue = report.issues().next().unwrap();
        assert!(issue.contains("99B06E497F81FC58ECB7F07B1625551CD29B01D7"));
    }

    #[test]
    fn garbage_signature_is_an_error() {
        let result = check(&key("rsa.asc"), b"\x01\x02\x03", &artifact());
        assert!(result.is_err());
    }

    #[test]
    fn signature_text_is_not_a_key() {
        let armored_sig = String::from_utf8(fixture("rsa.sig.asc")).unwrap();
        assert!(check(&armored_sig, &fixture("rsa.sig.asc"), &artifact()).is_err());
    }

    #[test]
    fn verdict_table() {
        let bad = BadSignature {
            issuer: "X".into(),
            issues: vec!["bad".into()],
        };
        let mixed = Report {
            good: 1,
            bad: vec![bad.clone()],
        };
        let invalid = Report {
            good: 0,
            bad: vec![bad],
        };
        assert_eq!(Report::default().verdict(), Verdict::Valid);
        assert_eq!(mixed.verdict(), Verdict::Mixed);
        assert_eq!(invalid.verdict(), Verdict::Invalid);
    }
}
