use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::CustomerId;

use crate::error::Result;
use crate::records::{
    Customer, CustomerProfile, MenuListing, NewCustomer, NewOrder, OrderSummary, PlacedOrder,
};

/// Core trait for store implementations.
///
/// All implementations must be thread-safe (Send + Sync); one store instance
/// is shared across all in-flight requests.
#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trips the store and returns its clock. Used by the health check.
    async fn ping(&self) -> Result<DateTime<Utc>>;

    /// Persists a new customer record.
    ///
    /// Fails with `UsernameTaken` when the username is already registered.
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerId>;

    /// Loads the customer record for a username, if one exists.
    async fn customer_by_username(&self, username: &str) -> Result<Option<Customer>>;

    /// Lists customer profiles, ordered by username.
    async fn list_customers(&self) -> Result<Vec<CustomerProfile>>;

    /// Lists menu items joined with their restaurant names.
    async fn list_menus(&self) -> Result<Vec<MenuListing>>;

    /// Places an order: snapshots the menu item's current unit price,
    /// computes `total = price * quantity`, and persists the order with
    /// status `Pending`.
    ///
    /// Fails with `MenuNotFound` when the menu item does not exist; in that
    /// case no order row is persisted. The price read and the order insert
    /// are atomic with respect to each other.
    async fn place_order(&self, order: NewOrder) -> Result<PlacedOrder>;

    /// Sums order totals for a customer, joined with the display name.
    ///
    /// A customer with no orders yields a zero total, not an absent record.
    async fn order_summary(&self, customer_id: CustomerId) -> Result<OrderSummary>;
}
