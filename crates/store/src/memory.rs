//! In-memory store implementation for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, MenuId, Money, OrderId, RestaurantId};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::records::{
    Customer, CustomerProfile, MenuListing, NewCustomer, NewOrder, OrderStatus, OrderSummary,
    PlacedOrder,
};
use crate::store::Store;

struct MenuRecord {
    restaurant_id: RestaurantId,
    name: String,
    price: Money,
}

struct CustomerRecord {
    customer_id: CustomerId,
    username: String,
    password_hash: String,
    fullname: String,
    email: Option<String>,
}

#[allow(dead_code)]
struct OrderRecord {
    order_id: OrderId,
    customer_id: CustomerId,
    restaurant_id: RestaurantId,
    menu_id: MenuId,
    quantity: u32,
    price: Money,
    total: Money,
    status: OrderStatus,
}

#[derive(Default)]
struct Inner {
    customers: Vec<CustomerRecord>,
    restaurants: HashMap<RestaurantId, String>,
    menus: HashMap<MenuId, MenuRecord>,
    orders: Vec<OrderRecord>,
}

/// In-memory store implementation.
///
/// Holds all records behind one lock and provides the same semantics as the
/// PostgreSQL implementation, including atomic price-read-then-insert on
/// order placement.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a restaurant, standing in for externally managed data.
    pub async fn seed_restaurant(&self, name: &str) -> RestaurantId {
        let id = RestaurantId::new();
        self.inner
            .write()
            .await
            .restaurants
            .insert(id, name.to_string());
        id
    }

    /// Seeds a menu item under a restaurant.
    pub async fn seed_menu(&self, restaurant_id: RestaurantId, name: &str, price: Money) -> MenuId {
        let id = MenuId::new();
        self.inner.write().await.menus.insert(
            id,
            MenuRecord {
                restaurant_id,
                name: name.to_string(),
                price,
            },
        );
        id
    }

    /// Returns the number of persisted orders.
    pub async fn order_count(&self) -> usize {
        self.inner.read().await.orders.len()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn ping(&self) -> Result<DateTime<Utc>> {
        Ok(Utc::now())
    }

    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerId> {
        let mut inner = self.inner.write().await;

        if inner.customers.iter().any(|c| c.username == customer.username) {
            return Err(StoreError::UsernameTaken(customer.username));
        }

        let customer_id = CustomerId::new();
        inner.customers.push(CustomerRecord {
            customer_id,
            username: customer.username,
            password_hash: customer.password_hash,
            fullname: customer.fullname,
            email: customer.email,
        });

        Ok(customer_id)
    }

    async fn customer_by_username(&self, username: &str) -> Result<Option<Customer>> {
        let inner = self.inner.read().await;
        Ok(inner
            .customers
            .iter()
            .find(|c| c.username == username)
            .map(|c| Customer {
                customer_id: c.customer_id,
                username: c.username.clone(),
                password_hash: c.password_hash.clone(),
                fullname: c.fullname.clone(),
            }))
    }

    async fn list_customers(&self) -> Result<Vec<CustomerProfile>> {
        let inner = self.inner.read().await;
        let mut profiles: Vec<_> = inner
            .customers
            .iter()
            .map(|c| CustomerProfile {
                customer_id: c.customer_id,
                username: c.username.clone(),
                fullname: c.fullname.clone(),
                email: c.email.clone(),
            })
            .collect();
        profiles.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(profiles)
    }

    async fn list_menus(&self) -> Result<Vec<MenuListing>> {
        let inner = self.inner.read().await;
        let mut listings: Vec<_> = inner
            .menus
            .iter()
            .filter_map(|(menu_id, menu)| {
                inner
                    .restaurants
                    .get(&menu.restaurant_id)
                    .map(|restaurant_name| MenuListing {
                        menu_id: *menu_id,
                        menu_name: menu.name.clone(),
                        restaurant_name: restaurant_name.clone(),
                        price: menu.price,
                    })
            })
            .collect();
        listings.sort_by(|a, b| {
            (a.restaurant_name.as_str(), a.menu_name.as_str())
                .cmp(&(b.restaurant_name.as_str(), b.menu_name.as_str()))
        });
        Ok(listings)
    }

    async fn place_order(&self, order: NewOrder) -> Result<PlacedOrder> {
        // One write guard covers the price read and the insert.
        let mut inner = self.inner.write().await;

        let price = inner
            .menus
            .get(&order.menu_id)
            .map(|m| m.price)
            .ok_or(StoreError::MenuNotFound(order.menu_id))?;

        if !inner.restaurants.contains_key(&order.restaurant_id) {
            return Err(StoreError::RestaurantNotFound(order.restaurant_id));
        }
        if !inner
            .customers
            .iter()
            .any(|c| c.customer_id == order.customer_id)
        {
            return Err(StoreError::CustomerNotFound(order.customer_id));
        }

        let total = price.multiply(order.quantity);
        let order_id = OrderId::new();

        inner.orders.push(OrderRecord {
            order_id,
            customer_id: order.customer_id,
            restaurant_id: order.restaurant_id,
            menu_id: order.menu_id,
            quantity: order.quantity,
            price,
            total,
            status: OrderStatus::Pending,
        });

        Ok(PlacedOrder { order_id, total })
    }

    async fn order_summary(&self, customer_id: CustomerId) -> Result<OrderSummary> {
        let inner = self.inner.read().await;

        let customer = inner
            .customers
            .iter()
            .find(|c| c.customer_id == customer_id)
            .ok_or(StoreError::CustomerNotFound(customer_id))?;

        let total_amount = inner
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .map(|o| o.total)
            .sum();

        Ok(OrderSummary {
            customer_name: customer.fullname.clone(),
            total_amount,
        })
    }
}
