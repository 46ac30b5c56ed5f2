//! Admin user API client methods

use super::{ClientError, FornoClient};
use crate::types::{ChangeRoleRequest, UserQuery};
use forno_core::types::{Page, Role, User};
use reqwest::Method;

impl FornoClient {
    /// Page through users, including soft-deleted ones when requested
    pub async fn list_users(&self, query: &UserQuery) -> Result<Page<User>, ClientError> {
        let req = self
            .request(Method::GET, "/admin/users")
            .query(&query.to_pairs());
        self.execute(req).await
    }

    pub async fn change_role(&self, user_id: i64, role: Role) -> Result<(), ClientError> {
        let req = self
            .request(Method::PATCH, &format!("/admin/users/{user_id}/role"))
            .json(&ChangeRoleRequest { role });
        self.execute_empty(req).await
    }

    /// Soft-delete a user account
    pub async fn delete_user(&self, user_id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/admin/users/{user_id}"));
        self.execute_empty(req).await
    }

    pub async fn restore_user(&self, user_id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::POST, &format!("/admin/users/{user_id}/restore"));
        self.execute_empty(req).await
    }
}
