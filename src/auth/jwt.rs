//! auth::jwt
//!
//! Decoding of stored JWTs.
//!
//! Signatures are not verified: the server checks them, the client only
//! needs the expiry and the subject to decide when to refresh.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Header, Validation};
use serde_json::{json, Map, Value};

use super::errors::AuthError;

/// Stored token value that decodes to fixed test claims.
pub const DUMMY_TOKEN: &str = "dummy_jwt_token";

/// Subject of the dummy token.
pub const DUMMY_SUBJECT: &str = "test_asf_uid";

/// Lifetime of the dummy token from the moment it is decoded.
const DUMMY_LIFETIME_SECS: i64 = 90 * 60;

/// Decoded JWT claims.
pub type Claims = Map<String, Value>;

/// Validation that only decodes: no signature, expiry, audience or
/// required claims are checked.
fn unverified() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

// Segments are unpadded base64url; tolerate padding left by other encoders.
fn unpadded(token: &str) -> String {
    token.replace('=', "")
}

/// Decode the header without verifying the signature.
pub fn header(token: &str) -> Result<Header, AuthError> {
    Ok(jsonwebtoken::decode_header(&unpadded(token))?)
}

/// Decode the claims without verifying the signature.
///
/// [`DUMMY_TOKEN`] yields a subject of [`DUMMY_SUBJECT`] that expires 90
/// minutes from now.
pub fn claims(token: &str) -> Result<Claims, AuthError> {
    if token == DUMMY_TOKEN {
        let mut claims = Claims::new();
        claims.insert("exp".into(), json!(Utc::now().timestamp() + DUMMY_LIFETIME_SECS));
        claims.insert("sub".into(), json!(DUMMY_SUBJECT));
        return Ok(claims);
    }

    let data = jsonwebtoken::decode::<Claims>(
        &unpadded(token),
        &DecodingKey::from_secret(&[]),
        &unverified(),
    )?;
    Ok(data.claims)
}

/// Decode the claims of an HS256 token, rejecting any other header.
pub fn dump(token: &str) -> Result<Claims, AuthError> {
    if header(token)? != Header::new(Algorithm::HS256) {
        return Err(AuthError::InvalidHeader);
    }
    claims(token)
}

/// The `exp` claim in seconds, or 0 when it is absent or not a number.
pub fn expiry(claims: &Claims) -> f64 {
    claims.get("exp").and_then(Value::as_f64).unwrap_or(0.0)
}

/// Whether the token has expired at `now` (Unix seconds).
pub fn is_expired(claims: &Claims, now: f64) -> bool {
    expiry(claims) < now
}

/// The `sub` claim, if it is a non-empty string.
pub fn subject(claims: &Claims) -> Option<&str> {
    claims
        .get("sub")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Capitalize the first letter of every alphabetic run, e.g.
/// `asf_uid` becomes `Asf_Uid`.
pub fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_word = false;
    for c in key.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
