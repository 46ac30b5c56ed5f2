//! Authentication and profile API client methods

use super::{ClientError, FornoClient};
use crate::types::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, TokenResponse, UpdateFullNameRequest,
    UpdateUsernameRequest,
};
use forno_core::types::User;
use reqwest::Method;

impl FornoClient {
    /// Create an account. The returned access token is stored and the
    /// refresh scheduler re-armed.
    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ClientError> {
        let req = self.request(Method::POST, "/auth/register").json(request);
        let response: TokenResponse = self.execute(req).await?;
        self.session().set_session(&response.access_token).await?;
        Ok(response)
    }

    /// Authenticate with username and password. The returned access
    /// token is stored and the refresh scheduler re-armed.
    ///
    /// A rejected login carries the upstream `BAD_CREDENTIALS` code in
    /// the error body.
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let req = self.request(Method::POST, "/auth/login").json(request);
        let response: TokenResponse = self.execute(req).await?;
        self.session().set_session(&response.access_token).await?;
        Ok(response)
    }

    /// End the session. The server call is best-effort; the local
    /// token is cleared either way.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self
            .execute_empty(self.request(Method::POST, "/auth/logout"))
            .await;
        self.session().clear_session().await?;
        result
    }

    /// Profile of the authenticated user
    pub async fn me(&self) -> Result<User, ClientError> {
        let req = self.request(Method::GET, "/users/me");
        self.execute(req).await
    }

    pub async fn update_full_name(&self, full_name: impl Into<String>) -> Result<User, ClientError> {
        let req = self
            .request(Method::PATCH, "/users/me/fullname")
            .json(&UpdateFullNameRequest {
                full_name: full_name.into(),
            });
        self.execute(req).await
    }

    pub async fn update_username(&self, username: impl Into<String>) -> Result<User, ClientError> {
        let req = self
            .request(Method::PATCH, "/users/me/username")
            .json(&UpdateUsernameRequest {
                username: username.into(),
            });
        self.execute(req).await
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::PATCH, "/users/me/password")
            .json(request);
        self.execute_empty(req).await
    }
}
