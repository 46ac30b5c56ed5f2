//! Client error types

use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Context attached to an error response: status, parsed body and the
/// request that produced it, for caller-side branching on upstream
/// error codes.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    /// HTTP status code
    pub status: u16,
    /// Human-readable message, taken from the response body when present
    pub message: String,
    /// Parsed JSON body, if the server sent one
    pub body: Option<Value>,
    /// Request method
    pub method: String,
    /// Request URL
    pub url: String,
}

impl ApiFailure {
    /// Upstream error code (the `error` or `code` field of the body),
    /// e.g. `BAD_CREDENTIALS` or `USERNAME_TAKEN`
    pub fn code(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.get("code").or_else(|| b.get("error")))
            .and_then(Value::as_str)
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} returned {}: {}",
            self.method, self.url, self.status, self.message
        )
    }
}

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request timed out before the server responded
    #[error("Request timed out: {method} {url}")]
    Timeout { method: String, url: String },

    /// Authentication failed (401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(ApiFailure),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(ApiFailure),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(ApiFailure),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(ApiFailure),

    /// Server returned an error status
    #[error("Server error: {0}")]
    ServerError(ApiFailure),

    /// Token refresh failed; stored credentials have been cleared
    #[error("Token refresh failed: {0}")]
    RefreshFailed(Arc<ClientError>),

    /// Token store error
    #[error("Token store error: {0}")]
    Store(#[from] forno_core::CoreError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: StatusCode, failure: ApiFailure) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(failure),
            401 => Self::AuthenticationFailed(failure),
            403 => Self::Forbidden(failure),
            404 => Self::NotFound(failure),
            _ => Self::ServerError(failure),
        }
    }

    /// Build an error from a non-success response, consuming its body
    pub(crate) async fn from_response(method: &Method, response: Response) -> Self {
        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await.unwrap_or_default();

        let body: Option<Value> = serde_json::from_str(&text).ok();
        let message = body
            .as_ref()
            .and_then(|b| b.get("message").or_else(|| b.get("error")))
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text.clone()
                }
            });

        Self::from_status(
            status,
            ApiFailure {
                status: status.as_u16(),
                message,
                body,
                method: method.to_string(),
                url,
            },
        )
    }

    /// Whether this error means the session's credentials are no longer
    /// accepted
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed(_) | Self::RefreshFailed(_)
        )
    }

    /// Context of the failing call, when the server responded
    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            Self::AuthenticationFailed(f)
            | Self::BadRequest(f)
            | Self::Forbidden(f)
            | Self::NotFound(f)
            | Self::ServerError(f) => Some(f),
            Self::RefreshFailed(inner) => inner.failure(),
            _ => None,
        }
    }
}
