//! Session lifecycle and proactive token refresh
//!
//! The `SessionManager` owns the stored access token, renews it ahead
//! of expiry from a background timer, and coalesces every concurrent
//! refresh trigger (timer fire, 401 recovery) into a single network
//! call. A failed refresh clears the stored token and parks the
//! scheduler until a new login; there is no retry loop.

mod single_flight;

pub use single_flight::SingleFlight;

use crate::client::error::ClientError;
use crate::types::TokenResponse;
use chrono::{DateTime, Utc};
use forno_core::{token, TokenStore};
use futures::FutureExt;
use reqwest::Method;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Refresh endpoint; the refresh credential rides in an HttpOnly
/// cookie, so the request carries no body.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Default time subtracted from token expiry when arming the timer
pub const DEFAULT_EARLY_MARGIN: Duration = Duration::from_secs(15);

/// Owns the access token and keeps it fresh
pub struct SessionManager {
    inner: Arc<SessionInner>,
    scheduler: Mutex<Option<JoinHandle<()>>>,
}

struct SessionInner {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    early_margin: Duration,
    refresh: SingleFlight<String, Arc<ClientError>>,
    changes: watch::Sender<()>,
}

impl SessionManager {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: String,
        store: Arc<dyn TokenStore>,
        early_margin: Duration,
    ) -> Self {
        let (changes, _) = watch::channel(());
        Self {
            inner: Arc::new(SessionInner {
                http,
                base_url,
                store,
                early_margin,
                refresh: SingleFlight::new(),
                changes,
            }),
            scheduler: Mutex::new(None),
        }
    }

    /// Start the proactive refresh scheduler. Restarting replaces the
    /// running task; at most one timer is ever pending.
    pub fn start(&self) {
        let mut slot = self.scheduler.lock().expect("scheduler slot poisoned");
        if let Some(task) = slot.take() {
            task.abort();
        }
        let inner = Arc::clone(&self.inner);
        *slot = Some(tokio::spawn(run_scheduler(inner)));
    }

    /// Cancel the pending timer and stop the scheduler
    pub fn stop(&self) {
        if let Some(task) = self
            .scheduler
            .lock()
            .expect("scheduler slot poisoned")
            .take()
        {
            task.abort();
        }
    }

    /// Current access token, if one is stored
    pub async fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.inner.store.load().await?)
    }

    /// Store a token obtained from login or registration and re-arm the
    /// scheduler against its expiry
    pub async fn set_session(&self, token: &str) -> Result<(), ClientError> {
        self.inner.store.store(token).await?;
        self.inner.notify();
        Ok(())
    }

    /// Drop the stored token; the scheduler parks until the next login
    pub async fn clear_session(&self) -> Result<(), ClientError> {
        self.inner.store.clear().await?;
        self.inner.notify();
        Ok(())
    }

    /// Obtain a fresh access token.
    ///
    /// Concurrent callers share one in-flight attempt and observe the
    /// same outcome. On success the new token is persisted and
    /// broadcast; on failure the stored token is cleared and the error
    /// propagates as [`ClientError::RefreshFailed`].
    pub async fn refresh(&self) -> Result<String, ClientError> {
        self.inner.refresh_shared().await
    }

    /// Receiver notified whenever the stored token changes
    pub fn subscribe(&self) -> watch::Receiver<()> {
        self.inner.changes.subscribe()
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.stop();
    }
}

impl SessionInner {
    async fn refresh_shared(self: &Arc<Self>) -> Result<String, ClientError> {
        let inner = Arc::clone(self);
        self.refresh
            .run(move || {
                async move { inner.refresh_once().await.map_err(Arc::new) }.boxed()
            })
            .await
            .map_err(ClientError::RefreshFailed)
    }

    async fn refresh_once(&self) -> Result<String, ClientError> {
        match self.request_token().await {
            Ok(token) => {
                self.store.store(&token).await?;
                self.notify();
                debug!("access token refreshed");
                Ok(token)
            }
            Err(err) => {
                warn!("token refresh failed, clearing stored credentials: {err}");
                if let Err(clear_err) = self.store.clear().await {
                    warn!("failed to clear token store: {clear_err}");
                }
                self.notify();
                Err(err)
            }
        }
    }

    async fn request_token(&self) -> Result<String, ClientError> {
        let url = format!("{}{REFRESH_PATH}", self.base_url);
        let response = self.http.post(&url).send().await.map_err(|err| {
            if err.is_timeout() {
                ClientError::Timeout {
                    method: Method::POST.to_string(),
                    url: url.clone(),
                }
            } else {
                ClientError::Request(err)
            }
        })?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(&Method::POST, response).await);
        }

        let body: TokenResponse = response.json().await?;
        Ok(body.access_token)
    }

    async fn next_refresh_delay(&self) -> Option<Duration> {
        let token = match self.store.load().await {
            Ok(token) => token?,
            Err(err) => {
                warn!("failed to read token store: {err}");
                return None;
            }
        };
        // tokens without a decodable expiry never arm a timer
        let expires_at = token::expires_at(&token)?;
        Some(refresh_delay(expires_at, self.early_margin, Utc::now()))
    }

    fn notify(&self) {
        self.changes.send_replace(());
    }
}

/// Timer delay: `max(0, expires_at - now - margin)`
fn refresh_delay(expires_at: DateTime<Utc>, margin: Duration, now: DateTime<Utc>) -> Duration {
    let until_expiry = (expires_at - now).to_std().unwrap_or(Duration::ZERO);
    until_expiry.saturating_sub(margin)
}

async fn run_scheduler(inner: Arc<SessionInner>) {
    let mut changes = inner.changes.subscribe();
    loop {
        // consume any notification that arrived while we were busy so
        // the delay below reflects the latest token
        changes.borrow_and_update();

        match inner.next_refresh_delay().await {
            Some(delay) => {
                debug!(delay_ms = delay.as_millis() as u64, "refresh timer armed");
                tokio::select! {
                    () = tokio::time::sleep(delay) => {
                        if let Err(err) = inner.refresh_shared().await {
                            // the failed attempt cleared the token; the
                            // next iteration parks until a new login
                            warn!("scheduled refresh failed: {err}");
                        }
                    }
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            None => {
                if changes.changed().await.is_err() {
                    break;
                }
            }
        }
    }
}
