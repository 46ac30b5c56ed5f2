//! Order history API client methods

use super::{ClientError, FornoClient};
use forno_core::types::{Cart, Order, OrderStatusChange};
use reqwest::Method;

impl FornoClient {
    /// Orders placed by the authenticated user
    pub async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        let req = self.request(Method::GET, "/orders/my");
        self.execute(req).await
    }

    /// Copy a past order's lines into a fresh cart
    pub async fn reorder(&self, order_id: i64) -> Result<Cart, ClientError> {
        let req = self
            .request(Method::POST, &format!("/orders/{order_id}/reorder"))
            .json(&serde_json::json!({}));
        self.execute(req).await
    }

    pub async fn order_status_history(
        &self,
        order_id: i64,
    ) -> Result<Vec<OrderStatusChange>, ClientError> {
        let req = self.request(Method::GET, &format!("/orders/{order_id}/statusHistory"));
        self.execute(req).await
    }
}
