//! Domain model shared across the Forno client crates
//!
//! Field casing and enum wire values match the upstream REST API, which
//! serves camelCase JSON and uppercase enum constants. Monetary amounts
//! arrive as decimal strings and are modeled with `rust_decimal`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product discriminator for cart and order lines
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Pizza,
    Drink,
}

/// Pizza sizes offered as variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
}

/// Dough types offered as variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DoughType {
    Thin,
    Classic,
    Wholegrain,
}

/// Spiciness rating on a pizza
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpicyLevel {
    Mild,
    Medium,
    Hot,
}

impl Default for SpicyLevel {
    fn default() -> Self {
        Self::Mild
    }
}

/// Size/dough combination with its price adjustment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PizzaVariant {
    pub id: i64,
    pub size: PizzaSize,
    pub dough: DoughType,
    pub extra_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_price: Decimal,
    #[serde(default)]
    pub spicy_level: SpicyLevel,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Present only when the catalog is queried with variants
    #[serde(default)]
    pub variants: Vec<PizzaVariant>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// Grouping for ingredients (cheeses, meats, vegetables, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub ingredient_type: Option<IngredientType>,
    #[serde(default)]
    pub deleted: bool,
}

/// Base ingredient of a pizza, with whether the customer may remove it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaIngredient {
    pub ingredient_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub removable: bool,
}

/// Extra ingredient allowed on a pizza, with its surcharge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowedIngredient {
    pub ingredient_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub extra_price: Decimal,
}

/// Per-line ingredient customization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomizationAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCustomization {
    #[serde(default)]
    pub ingredient_id: Option<i64>,
    #[serde(default)]
    pub ingredient_name: Option<String>,
    pub action: CustomizationAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    #[serde(default)]
    pub product_id: Option<i64>,
    pub product_type: ProductType,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub pizza_variant_id: Option<i64>,
    #[serde(default)]
    pub variant_label: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub line_total: Option<Decimal>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub customizations: Vec<CartCustomization>,
}

/// Lifecycle of the server-side cart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CartStatus {
    Cart,
    Ordered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: Option<CartStatus>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: Option<Decimal>,
}

impl Cart {
    /// Total quantity across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Server-owned order lifecycle; the client only requests transitions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Ordered,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order can no longer change state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Wire constant served and accepted by the API
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "ORDERED",
            Self::Preparing => "PREPARING",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusChange {
    pub status: OrderStatus,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(default)]
    pub variant_label: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub line_total: Option<Decimal>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub customizations: Vec<CartCustomization>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub total: Decimal,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status_history: Vec<OrderStatusChange>,
}

/// Row in the admin order listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderSummary {
    pub order_id: i64,
    #[serde(default)]
    pub customer_username: Option<String>,
    pub status: OrderStatus,
    pub item_count: u32,
    pub total: Decimal,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub delivery_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub deleted: bool,
}

/// One page of a paginated listing (zero-based page numbers upstream)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}
