//! Admin catalog API client methods
//!
//! CRUD over pizzas, drinks, ingredients and ingredient types. Catalog
//! entities are soft-deleted; deleted rows stay listable and
//! restorable.

use super::{ClientError, FornoClient};
use crate::types::{
    DrinkUpsert, IngredientTypeUpsert, IngredientUpsert, PizzaUpsert, SetAllowedIngredient,
    SetPizzaIngredient, ShowFilter,
};
use forno_core::types::{Drink, Ingredient, IngredientType, Pizza};
use reqwest::Method;

impl FornoClient {
    // ---- Pizzas ----

    pub async fn list_deleted_pizzas(
        &self,
        with_variants: bool,
    ) -> Result<Vec<Pizza>, ClientError> {
        let req = self.request(
            Method::GET,
            &format!("/pizzas/deleted?withVariants={with_variants}"),
        );
        self.execute(req).await
    }

    pub async fn create_pizza(&self, pizza: &PizzaUpsert) -> Result<Pizza, ClientError> {
        let req = self.request(Method::POST, "/pizzas").json(pizza);
        self.execute(req).await
    }

    pub async fn update_pizza(&self, id: i64, pizza: &PizzaUpsert) -> Result<Pizza, ClientError> {
        let req = self.request(Method::PUT, &format!("/pizzas/{id}")).json(pizza);
        self.execute(req).await
    }

    pub async fn delete_pizza(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/pizzas/{id}"));
        self.execute_empty(req).await
    }

    pub async fn restore_pizza(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::POST, &format!("/pizzas/{id}/restore"));
        self.execute_empty(req).await
    }

    /// Replace the base ingredient list of a pizza
    pub async fn set_pizza_ingredients(
        &self,
        pizza_id: i64,
        items: &[SetPizzaIngredient],
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::PUT, &format!("/pizzas/{pizza_id}/ingredients"))
            .json(&items);
        self.execute_empty(req).await
    }

    /// Replace the allowed extra ingredients of a pizza
    pub async fn set_pizza_allowed_ingredients(
        &self,
        pizza_id: i64,
        items: &[SetAllowedIngredient],
    ) -> Result<(), ClientError> {
        let req = self
            .request(
                Method::PUT,
                &format!("/pizzas/{pizza_id}/allowed-ingredients"),
            )
            .json(&items);
        self.execute_empty(req).await
    }

    // ---- Drinks ----

    pub async fn list_deleted_drinks(&self) -> Result<Vec<Drink>, ClientError> {
        let req = self.request(Method::GET, "/drinks/deleted");
        self.execute(req).await
    }

    pub async fn create_drink(&self, drink: &DrinkUpsert) -> Result<Drink, ClientError> {
        let req = self.request(Method::POST, "/drinks").json(drink);
        self.execute(req).await
    }

    pub async fn update_drink(&self, id: i64, drink: &DrinkUpsert) -> Result<Drink, ClientError> {
        let req = self.request(Method::PUT, &format!("/drinks/{id}")).json(drink);
        self.execute(req).await
    }

    pub async fn delete_drink(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/drinks/{id}"));
        self.execute_empty(req).await
    }

    pub async fn restore_drink(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::POST, &format!("/drinks/{id}/restore"));
        self.execute_empty(req).await
    }

    // ---- Ingredients ----

    /// Ingredients with their type embedded, filtered by deletion state
    pub async fn list_ingredients_with_type(
        &self,
        show: ShowFilter,
    ) -> Result<Vec<Ingredient>, ClientError> {
        let req = self.request(
            Method::GET,
            &format!("/ingredients/with-type?show={}", show.as_str()),
        );
        self.execute(req).await
    }

    pub async fn create_ingredient(
        &self,
        ingredient: &IngredientUpsert,
    ) -> Result<Ingredient, ClientError> {
        let req = self.request(Method::POST, "/ingredients").json(ingredient);
        self.execute(req).await
    }

    pub async fn update_ingredient(
        &self,
        id: i64,
        ingredient: &IngredientUpsert,
    ) -> Result<Ingredient, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/ingredients/{id}"))
            .json(ingredient);
        self.execute(req).await
    }

    pub async fn delete_ingredient(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/ingredients/{id}"));
        self.execute_empty(req).await
    }

    pub async fn restore_ingredient(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::POST, &format!("/ingredients/{id}/restore"));
        self.execute_empty(req).await
    }

    // ---- Ingredient types ----

    pub async fn list_ingredient_types(&self) -> Result<Vec<IngredientType>, ClientError> {
        let req = self.request(Method::GET, "/ingredient-types");
        self.execute(req).await
    }

    pub async fn create_ingredient_type(
        &self,
        ingredient_type: &IngredientTypeUpsert,
    ) -> Result<IngredientType, ClientError> {
        let req = self
            .request(Method::POST, "/ingredient-types")
            .json(ingredient_type);
        self.execute(req).await
    }

    pub async fn update_ingredient_type(
        &self,
        id: i64,
        ingredient_type: &IngredientTypeUpsert,
    ) -> Result<IngredientType, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/ingredient-types/{id}"))
            .json(ingredient_type);
        self.execute(req).await
    }

    pub async fn delete_ingredient_type(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/ingredient-types/{id}"));
        self.execute_empty(req).await
    }
}
