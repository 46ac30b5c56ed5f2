//! Admin order API client methods
//!
//! Status transitions are validated server-side; the client only
//! requests them and surfaces a `BadRequest` when a transition is not
//! allowed from the current state.

use super::{ClientError, FornoClient};
use crate::types::AdminOrderQuery;
use forno_core::types::{AdminOrderSummary, Order, Page};
use reqwest::Method;

impl FornoClient {
    /// Page through all orders, filtered by status, customer or text
    pub async fn list_orders(
        &self,
        query: &AdminOrderQuery,
    ) -> Result<Page<AdminOrderSummary>, ClientError> {
        let req = self
            .request(Method::GET, "/admin/orders")
            .query(&query.to_pairs());
        self.execute(req).await
    }

    /// Full order detail including lines and status history
    pub async fn get_order(&self, id: i64) -> Result<Order, ClientError> {
        let req = self.request(Method::GET, &format!("/admin/orders/{id}"));
        self.execute(req).await
    }

    pub async fn start_preparing(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::POST, &format!("/orders/{id}/start-preparing"));
        self.execute_empty(req).await
    }

    pub async fn out_for_delivery(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::POST, &format!("/orders/{id}/out-for-delivery"));
        self.execute_empty(req).await
    }

    pub async fn deliver(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::POST, &format!("/orders/{id}/deliver"));
        self.execute_empty(req).await
    }

    pub async fn cancel_order(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::POST, &format!("/orders/{id}/cancel"));
        self.execute_empty(req).await
    }
}
