//! Authentication primitives for the food-ordering backend.
//!
//! This crate provides:
//! - bcrypt password hashing and verification
//! - issuance and verification of signed, time-limited identity tokens
//!
//! Passwords are hashed before storage and never leave the store. Tokens are
//! stateless: the signed claim set is the only session state, verified on
//! every protected request. The signing secret comes exclusively from
//! configuration; there is no fallback.

pub mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenService};
