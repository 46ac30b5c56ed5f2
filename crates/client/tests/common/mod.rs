//! Shared helpers for client integration tests

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use forno_client::FornoClient;
use std::time::Duration;

/// Unsigned compact-form token expiring at the given unix timestamp
pub fn token_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({ "sub": "1", "role": "USER", "exp": exp })
            .to_string()
            .as_bytes(),
    );
    format!("{header}.{payload}.sig")
}

/// Token expiring `secs` seconds from now
pub fn token_expiring_in(secs: i64) -> String {
    token_with_exp(chrono::Utc::now().timestamp() + secs)
}

pub fn client_with_margin(base_url: &str, margin: Duration) -> FornoClient {
    FornoClient::builder()
        .base_url(base_url)
        .early_margin(margin)
        .build()
        .expect("client should build")
}

/// Matcher asserting the request carries no Authorization header
pub struct NoAuthHeader;

impl wiremock::Match for NoAuthHeader {
    fn matches(&self, request: &wiremock::Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}
