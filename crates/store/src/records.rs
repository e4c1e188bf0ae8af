//! Record types exchanged with the store.

use common::{CustomerId, MenuId, Money, OrderId, RestaurantId};
use serde::Serialize;

/// Data required to register a new customer. The password arrives here
/// already hashed; plaintext never reaches the store.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A customer record as loaded for credential checks.
#[derive(Debug, Clone)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
}

/// The public profile fields of a customer. No credential material.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub customer_id: CustomerId,
    pub username: String,
    pub fullname: String,
    pub email: Option<String>,
}

/// A menu item joined with its restaurant, as listed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct MenuListing {
    pub menu_id: MenuId,
    pub menu_name: String,
    pub restaurant_name: String,
    pub price: Money,
}

/// Order placement request as seen by the store. Quantity is validated
/// positive at the API boundary.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub menu_id: MenuId,
    pub quantity: u32,
}

/// The outcome of a successful order placement.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    /// Unit price snapshot multiplied by quantity.
    pub total: Money,
}

/// Aggregated order totals for one customer.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub customer_name: String,
    pub total_amount: Money,
}

/// Lifecycle status of an order.
///
/// Orders are only ever created in `Pending` here; transitions are an
/// extension point with no endpoint yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
