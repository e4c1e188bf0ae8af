//! Shared types for the food-ordering backend.
//!
//! Provides the typed identifiers used across the store and API layers and
//! the fixed-point [`Money`] representation for prices and totals.

pub mod money;
pub mod types;

pub use money::Money;
pub use types::{CustomerId, MenuId, OrderId, RestaurantId};
