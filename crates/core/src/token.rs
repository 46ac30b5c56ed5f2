//! Access-token claims decoding
//!
//! The client never verifies token signatures; the server is the
//! authority. The payload segment is decoded only to read the expiry
//! hint used by the proactive refresh scheduler.

use crate::error::{CoreError, CoreResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried in the payload segment of an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: Option<String>,
    /// Role granted to the session
    #[serde(default)]
    pub role: Option<String>,
    /// Expiration time (as UTC timestamp in seconds)
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued at (as UTC timestamp in seconds)
    #[serde(default)]
    pub iat: Option<i64>,
}

impl AccessClaims {
    /// Expiration instant, if the token carries one
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// Decode the payload segment of a compact-form token without
/// verifying its signature.
pub fn decode_claims(token: &str) -> CoreResult<AccessClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| CoreError::invalid_token("token is not in compact form"))?;

    // Some issuers pad the segment; base64url in tokens is unpadded.
    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| CoreError::invalid_token(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| CoreError::invalid_token(format!("payload is not valid JSON: {e}")))
}

/// Expiration instant of a token, or `None` when the token is malformed
/// or carries no decodable `exp` claim.
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    decode_claims(token).ok().and_then(|c| c.expires_at())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn test_decodes_exp_and_subject() {
        let token = make_token(serde_json::json!({
            "sub": "42",
            "role": "USER",
            "exp": 1_900_000_000i64,
            "iat": 1_899_990_000i64,
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.role.as_deref(), Some("USER"));
        assert_eq!(claims.exp, Some(1_900_000_000));
        assert_eq!(
            claims.expires_at().unwrap(),
            DateTime::from_timestamp(1_900_000_000, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_exp_yields_no_expiry() {
        let token = make_token(serde_json::json!({ "sub": "42" }));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.exp.is_none());
        assert!(claims.expires_at().is_none());
        assert!(expires_at(&token).is_none());
    }

    #[test]
    fn test_malformed_tokens_do_not_panic() {
        assert!(decode_claims("not-a-token").is_err());
        assert!(decode_claims("a.!!!.c").is_err());
        assert!(expires_at("").is_none());

        let garbage = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"not json"));
        assert!(decode_claims(&garbage).is_err());
    }

    #[test]
    fn test_tolerates_padded_payload_segment() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"exp":1900000000}"#);
        let token = format!("h.{payload}==.s");
        assert_eq!(decode_claims(&token).unwrap().exp, Some(1_900_000_000));
    }
}
