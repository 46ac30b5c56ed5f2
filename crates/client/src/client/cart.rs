//! Cart API client methods
//!
//! Every mutation returns the updated server-side cart, which is the
//! source of truth for prices and availability.

use super::{ClientError, FornoClient};
use crate::types::{AddDrinkRequest, AddPizzaRequest, CartItemPatch, CheckoutRequest};
use forno_core::types::Cart;
use reqwest::Method;

impl FornoClient {
    /// Current cart of the authenticated user
    pub async fn cart(&self) -> Result<Cart, ClientError> {
        let req = self.request(Method::GET, "/cart");
        self.execute(req).await
    }

    pub async fn add_pizza(&self, request: &AddPizzaRequest) -> Result<Cart, ClientError> {
        let req = self
            .request(Method::POST, "/cart/items/pizza")
            .json(request);
        self.execute(req).await
    }

    pub async fn add_drink(&self, request: &AddDrinkRequest) -> Result<Cart, ClientError> {
        let req = self
            .request(Method::POST, "/cart/items/drink")
            .json(request);
        self.execute(req).await
    }

    /// Patch one cart line; only the fields present in `patch` change
    pub async fn update_cart_item(
        &self,
        item_id: i64,
        patch: &CartItemPatch,
    ) -> Result<Cart, ClientError> {
        let req = self
            .request(Method::PATCH, &format!("/cart/items/{item_id}"))
            .json(patch);
        self.execute(req).await
    }

    pub async fn remove_cart_item(&self, item_id: i64) -> Result<Cart, ClientError> {
        let req = self.request(Method::DELETE, &format!("/cart/items/{item_id}"));
        self.execute(req).await
    }

    /// Place the order; the returned cart has moved to `ORDERED`
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Cart, ClientError> {
        let req = self.request(Method::POST, "/cart/checkout").json(request);
        self.execute(req).await
    }
}
