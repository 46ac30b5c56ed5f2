//! Request and response types for the Forno API

use forno_core::types::{DoughType, OrderStatus, PizzaSize, Role, SpicyLevel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tokens returned by login, registration and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    /// Present only when the server rotates the refresh credential in
    /// the body rather than the cookie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFullNameRequest {
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Add a pizza line to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPizzaRequest {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub remove_ingredient_ids: Vec<i64>,
    #[serde(default)]
    pub add_ingredient_ids: Vec<i64>,
}

impl AddPizzaRequest {
    /// One pizza, default variant, no customizations
    pub fn new(product_id: i64) -> Self {
        Self {
            product_id,
            variant_id: None,
            quantity: 1,
            note: String::new(),
            remove_ingredient_ids: Vec::new(),
            add_ingredient_ids: Vec::new(),
        }
    }
}

/// Add a drink line to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDrinkRequest {
    pub product_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
}

impl AddDrinkRequest {
    pub fn new(product_id: i64) -> Self {
        Self {
            product_id,
            quantity: 1,
            note: String::new(),
        }
    }
}

/// Partial update of a cart line; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_ingredient_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_ingredient_ids: Option<Vec<i64>>,
}

impl CartItemPatch {
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::default()
        }
    }

    pub fn variant(variant_id: i64) -> Self {
        Self {
            variant_id: Some(variant_id),
            ..Self::default()
        }
    }

    pub fn customizations(add_ids: Vec<i64>, remove_ids: Vec<i64>) -> Self {
        Self {
            add_ingredient_ids: Some(add_ids),
            remove_ingredient_ids: Some(remove_ids),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub phone: String,
    pub address: String,
}

/// Pizza create/update form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaUpsert {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_price: Decimal,
    pub spicy_level: SpicyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub variants: Vec<PizzaVariantUpsert>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaVariantUpsert {
    pub size: PizzaSize,
    pub dough: DoughType,
    pub extra_price: Decimal,
}

/// Drink create/update form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkUpsert {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUpsert {
    pub name: String,
    pub type_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientTypeUpsert {
    pub name: String,
}

/// Base ingredient assignment for a pizza
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPizzaIngredient {
    pub ingredient_id: i64,
    pub removable: bool,
}

/// Allowed extra ingredient assignment for a pizza
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAllowedIngredient {
    pub ingredient_id: i64,
    pub extra_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleRequest {
    pub role: Role,
}

/// Soft-deletion visibility filter for admin listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowFilter {
    #[default]
    Active,
    All,
    Deleted,
}

impl ShowFilter {
    /// Query parameter value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::All => "all",
            Self::Deleted => "deleted",
        }
    }
}

/// Filters for the admin order listing
#[derive(Debug, Clone, Default)]
pub struct AdminOrderQuery {
    /// Restrict to one status; `None` lists every status
    pub status: Option<OrderStatus>,
    /// Free-text search over customer and address fields
    pub q: Option<String>,
    /// Restrict to one customer
    pub user_id: Option<i64>,
    /// Zero-based page number
    pub page: u32,
    /// Page size; `None` uses the server default
    pub size: Option<u32>,
}

impl AdminOrderQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(
            "status",
            self.status
                .map_or_else(|| "all".to_string(), |s| s.as_str().to_string()),
        )];
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(user_id) = self.user_id {
            pairs.push(("userId", user_id.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        pairs
    }
}

/// Filters for the admin user listing
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Free-text search over username and full name
    pub q: Option<String>,
    pub show: ShowFilter,
    /// Zero-based page number
    pub page: u32,
    pub size: Option<u32>,
    /// Sort expression, e.g. `id,desc`
    pub sort: Option<String>,
}

impl UserQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("show", self.show.as_str().to_string())];
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_patch_serializes_only_present_fields() {
        let patch = CartItemPatch::quantity(3);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"quantity": 3}));

        let patch = CartItemPatch::customizations(vec![1, 2], vec![]);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"addIngredientIds": [1, 2], "removeIngredientIds": []})
        );
    }

    #[test]
    fn test_add_pizza_request_uses_camel_case() {
        let mut request = AddPizzaRequest::new(5);
        request.variant_id = Some(2);
        request.add_ingredient_ids = vec![7];

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["productId"], 5);
        assert_eq!(json["variantId"], 2);
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["addIngredientIds"], serde_json::json!([7]));
        assert_eq!(json["removeIngredientIds"], serde_json::json!([]));
    }

    #[test]
    fn test_admin_order_query_defaults_to_all_statuses() {
        let pairs = AdminOrderQuery::default().to_pairs();
        assert!(pairs.contains(&("status", "all".to_string())));
        assert!(pairs.contains(&("page", "0".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "q"));

        let query = AdminOrderQuery {
            status: Some(OrderStatus::OutForDelivery),
            user_id: Some(12),
            ..Default::default()
        };
        let pairs = query.to_pairs();
        assert!(pairs.contains(&("status", "OUT_FOR_DELIVERY".to_string())));
        assert!(pairs.contains(&("userId", "12".to_string())));
    }
}
