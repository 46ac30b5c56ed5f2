//! Forno API client

pub mod admin;
pub mod admin_orders;
pub mod admin_users;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod orders;

use crate::session::{SessionManager, DEFAULT_EARLY_MARGIN};
use error::ClientError;
use forno_core::{MemoryTokenStore, TokenStore};
use reqwest::{header, ClientBuilder, Method, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Forno API client
///
/// Cheap to clone; clones share the HTTP connection pool, the cookie
/// jar carrying the refresh credential, and the session manager.
#[derive(Clone)]
pub struct FornoClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl FornoClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> FornoClientBuilder {
        FornoClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session manager owning the access token and refresh scheduling
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Create a request builder; credentials are attached at dispatch
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http.request(method, url)
    }

    /// Execute a request and parse its JSON response
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.dispatch(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request, accepting a success response with no body
    pub async fn execute_empty(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), ClientError> {
        self.dispatch(request).await?;
        Ok(())
    }

    /// Send a request with the current token attached, recovering from
    /// a single 401 by refreshing the session and retrying once. A
    /// second 401, or a refresh failure, surfaces to the caller.
    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, ClientError> {
        let retry = request.try_clone();

        let (method, response) = self.send_authorized(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_status(&method, response).await;
        }

        // streaming bodies cannot be replayed; surface the 401 as-is
        let Some(retry) = retry else {
            return Err(ClientError::from_response(&method, response).await);
        };

        debug!("received 401, refreshing session and retrying once");
        self.session.refresh().await?;

        let (method, response) = self.send_authorized(retry).await?;
        Self::check_status(&method, response).await
    }

    async fn send_authorized(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(Method, Response), ClientError> {
        let mut request = request.build().map_err(ClientError::Request)?;

        if let Some(token) = self.session.token().await? {
            let value = header::HeaderValue::from_str(&format!("Bearer {token}")).map_err(
                |_| {
                    ClientError::Configuration(
                        "stored access token is not a valid header value".into(),
                    )
                },
            )?;
            request.headers_mut().insert(header::AUTHORIZATION, value);
        }

        let method = request.method().clone();
        let url = request.url().to_string();

        let response = self.http.execute(request).await.map_err(|err| {
            if err.is_timeout() {
                ClientError::Timeout {
                    method: method.to_string(),
                    url: url.clone(),
                }
            } else {
                ClientError::Request(err)
            }
        })?;

        Ok((method, response))
    }

    async fn check_status(method: &Method, response: Response) -> Result<Response, ClientError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ClientError::from_response(method, response).await)
        }
    }
}

/// Builder for [`FornoClient`]
pub struct FornoClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    token_store: Option<Arc<dyn TokenStore>>,
    early_margin: Duration,
}

impl Default for FornoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            token_store: None,
            early_margin: DEFAULT_EARLY_MARGIN,
        }
    }
}

impl FornoClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the token store; defaults to an in-memory slot
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Set how long before token expiry the scheduler refreshes
    pub fn early_margin(mut self, margin: Duration) -> Self {
        self.early_margin = margin;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FornoClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| "forno-client/0.1.0".to_string());

        // one shared client so refresh calls reuse the cookie jar
        let http = ClientBuilder::new()
            .user_agent(user_agent)
            .cookie_store(true)
            .timeout(self.timeout)
            .build()?;

        let store = self
            .token_store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        let session = SessionManager::new(
            http.clone(),
            base_url.clone(),
            store,
            self.early_margin,
        );

        Ok(FornoClient {
            http,
            base_url,
            session: Arc::new(session),
        })
    }
}
