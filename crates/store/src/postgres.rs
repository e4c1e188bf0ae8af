//! PostgreSQL-backed store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, MenuId, Money, OrderId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::records::{
    Customer, CustomerProfile, MenuListing, NewCustomer, NewOrder, OrderStatus, OrderSummary,
    PlacedOrder,
};
use crate::store::Store;

/// Store backed by a pooled PostgreSQL connection set.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database at `url` and wraps the resulting pool.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(Self { pool })
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_profile(row: &PgRow) -> Result<CustomerProfile> {
        Ok(CustomerProfile {
            customer_id: CustomerId::from_uuid(row.try_get::<Uuid, _>("customer_id")?),
            username: row.try_get("username")?,
            fullname: row.try_get("fullname")?,
            email: row.try_get("email")?,
        })
    }

    fn row_to_menu(row: &PgRow) -> Result<MenuListing> {
        Ok(MenuListing {
            menu_id: MenuId::from_uuid(row.try_get::<Uuid, _>("menu_id")?),
            menu_name: row.try_get("menu_name")?,
            restaurant_name: row.try_get("restaurant_name")?,
            price: Money::from_cents(row.try_get("price_cents")?),
        })
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn ping(&self) -> Result<DateTime<Utc>> {
        let now: DateTime<Utc> = sqlx::query_scalar("SELECT now()")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }

    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerId> {
        let customer_id = CustomerId::new();

        sqlx::query(
            r#"
            INSERT INTO customers (customer_id, username, password_hash, fullname, address, phone, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(customer_id.as_uuid())
        .bind(&customer.username)
        .bind(&customer.password_hash)
        .bind(&customer.fullname)
        .bind(&customer.address)
        .bind(&customer.phone)
        .bind(&customer.email)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("customers_username_key")
            {
                return StoreError::UsernameTaken(customer.username.clone());
            }
            StoreError::Database(e)
        })?;

        Ok(customer_id)
    }

    async fn customer_by_username(&self, username: &str) -> Result<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT customer_id, username, password_hash, fullname
            FROM customers
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(Customer {
                customer_id: CustomerId::from_uuid(row.try_get::<Uuid, _>("customer_id")?),
                username: row.try_get("username")?,
                password_hash: row.try_get("password_hash")?,
                fullname: row.try_get("fullname")?,
            })
        })
        .transpose()
    }

    async fn list_customers(&self) -> Result<Vec<CustomerProfile>> {
        let rows = sqlx::query(
            r#"
            SELECT customer_id, username, fullname, email
            FROM customers
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_profile).collect()
    }

    async fn list_menus(&self) -> Result<Vec<MenuListing>> {
        let rows = sqlx::query(
            r#"
            SELECT m.menu_id, m.name AS menu_name, r.name AS restaurant_name, m.price_cents
            FROM menus m
            JOIN restaurants r ON m.restaurant_id = r.restaurant_id
            ORDER BY r.name, m.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_menu).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn place_order(&self, order: NewOrder) -> Result<PlacedOrder> {
        // Price read and order insert share one transaction so the snapshot
        // price cannot change between them.
        let mut tx = self.pool.begin().await?;

        let price_cents: Option<i64> =
            sqlx::query_scalar("SELECT price_cents FROM menus WHERE menu_id = $1")
                .bind(order.menu_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;

        let price = Money::from_cents(price_cents.ok_or(StoreError::MenuNotFound(order.menu_id))?);
        let total = price.multiply(order.quantity);
        let order_id = OrderId::new();

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, customer_id, restaurant_id, menu_id, quantity, price_cents, total_cents, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(order.customer_id.as_uuid())
        .bind(order.restaurant_id.as_uuid())
        .bind(order.menu_id.as_uuid())
        .bind(i64::from(order.quantity))
        .bind(price.cents())
        .bind(total.cents())
        .bind(OrderStatus::Pending.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.constraint() == Some("orders_restaurant_id_fkey") {
                    return StoreError::RestaurantNotFound(order.restaurant_id);
                }
                if db_err.constraint() == Some("orders_customer_id_fkey") {
                    return StoreError::CustomerNotFound(order.customer_id);
                }
            }
            StoreError::Database(e)
        })?;

        tx.commit().await?;
        Ok(PlacedOrder { order_id, total })
    }

    #[tracing::instrument(skip(self))]
    async fn order_summary(&self, customer_id: CustomerId) -> Result<OrderSummary> {
        let row = sqlx::query(
            r#"
            SELECT c.fullname AS customer_name,
                   COALESCE(SUM(o.total_cents), 0)::BIGINT AS total_cents
            FROM customers c
            LEFT JOIN orders o ON o.customer_id = c.customer_id
            WHERE c.customer_id = $1
            GROUP BY c.fullname
            "#,
        )
        .bind(customer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::CustomerNotFound(customer_id))?;

        Ok(OrderSummary {
            customer_name: row.try_get("customer_name")?,
            total_amount: Money::from_cents(row.try_get("total_cents")?),
        })
    }
}
