//! Catalog API client methods

use super::{ClientError, FornoClient};
use forno_core::types::{AllowedIngredient, Drink, Pizza, PizzaIngredient};
use reqwest::Method;

impl FornoClient {
    /// List active pizzas, optionally with their size/dough variants
    pub async fn list_pizzas(&self, with_variants: bool) -> Result<Vec<Pizza>, ClientError> {
        let req = self.request(
            Method::GET,
            &format!("/pizzas?withVariants={with_variants}"),
        );
        self.execute(req).await
    }

    pub async fn get_pizza(&self, id: i64, with_variants: bool) -> Result<Pizza, ClientError> {
        let req = self.request(
            Method::GET,
            &format!("/pizzas/{id}?withVariants={with_variants}"),
        );
        self.execute(req).await
    }

    /// Base ingredients of a pizza, with removability flags
    pub async fn pizza_ingredients(&self, id: i64) -> Result<Vec<PizzaIngredient>, ClientError> {
        let req = self.request(Method::GET, &format!("/pizzas/{id}/ingredients"));
        self.execute(req).await
    }

    /// Extra ingredients allowed on a pizza, with surcharges
    pub async fn pizza_allowed_ingredients(
        &self,
        id: i64,
    ) -> Result<Vec<AllowedIngredient>, ClientError> {
        let req = self.request(Method::GET, &format!("/pizzas/{id}/allowed-ingredients"));
        self.execute(req).await
    }

    pub async fn list_drinks(&self) -> Result<Vec<Drink>, ClientError> {
        let req = self.request(Method::GET, "/drinks");
        self.execute(req).await
    }

    pub async fn get_drink(&self, id: i64) -> Result<Drink, ClientError> {
        let req = self.request(Method::GET, &format!("/drinks/{id}"));
        self.execute(req).await
    }
}
