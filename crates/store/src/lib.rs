//! Persistence layer for the food-ordering backend.
//!
//! The [`Store`] trait is the single seam between the HTTP layer and the
//! database. Two implementations are provided:
//! - [`PostgresStore`] — the production store backed by a pooled
//!   PostgreSQL connection set
//! - [`InMemoryStore`] — an in-process store with the same semantics,
//!   used by the API integration tests
//!
//! Menu and restaurant data is externally seeded; this crate only reads it.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod records;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use records::{
    Customer, CustomerProfile, MenuListing, NewCustomer, NewOrder, OrderStatus, OrderSummary,
    PlacedOrder,
};
pub use store::Store;
